//! Solve, differentiate, integrate, extrema and area over canonical expressions.
//!
//! Single-equation operations fail fast with an [`OperationError`]; the area batch
//! records a skipped entry per failing equation and carries on.

pub mod area;
pub mod extrema;
pub mod solve;

use std::fmt;

use crate::calculus::{IntegrationResult, ReasonCode, differentiate, integrate};
use crate::equation::{CanonicalExpression, ParseError};
use crate::eval::eval_constant;
use crate::expr::Expr;
use crate::format::pretty;
use crate::simplify::simplify_fully;
use thiserror::Error;

pub use area::{AreaEntry, AreaReport, AreaRequest, area_under_curves};
pub use extrema::{CriticalPoint, Extrema, Nature, StationaryAnalysis, maximum, minimum, stationary_points};
pub use solve::{Intercepts, YIntercept, solve};

/// Values this close to zero are treated as zero when classifying signs.
pub(crate) const ZERO_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum OperationError {
    #[error("could not evaluate: {0}")]
    Evaluation(String),
    #[error("found {intercepts} real x-intercept(s); two are needed to infer bounds")]
    BoundInference { intercepts: usize },
    #[error("lower bound {lower} must be less than upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// A computed number: exact when a closed form is known, always with a decimal value.
#[derive(Debug, Clone, PartialEq)]
pub struct Value {
    pub exact: Option<Expr>,
    pub approx: f64,
}

impl Value {
    /// Simplify a constant expression and evaluate it; `None` when it is not a finite real.
    pub fn from_expr(expr: Expr) -> Option<Self> {
        let exact = simplify_fully(expr);
        let approx = eval_constant(&exact)?;
        Some(Value {
            exact: Some(exact),
            approx,
        })
    }

    pub fn approximate(approx: f64) -> Self {
        Value {
            exact: None,
            approx,
        }
    }

    /// Whether the exact form is a rational number.
    pub fn is_rational(&self) -> bool {
        matches!(self.exact, Some(Expr::Constant(_)))
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.exact {
            Some(Expr::Constant(r)) if r.is_integer() => write!(f, "{}", r.numer()),
            Some(exact) => write!(f, "{} ≈ {}", pretty(exact), format_decimal(self.approx)),
            None => f.write_str(&format_decimal(self.approx)),
        }
    }
}

/// Up to six decimal places without trailing zeros.
pub fn format_decimal(value: f64) -> String {
    let text = format!("{value:.6}");
    let trimmed = text.trim_end_matches('0').trim_end_matches('.');
    match trimmed {
        "-0" | "" => "0".to_string(),
        other => other.to_string(),
    }
}

/// First derivative of the canonical expression.
pub fn derivative(equation: &CanonicalExpression) -> Result<Expr, OperationError> {
    Ok(differentiate(&equation.symbol(), &equation.expr))
}

/// An antiderivative of the canonical expression, without the constant of integration.
pub fn integral(equation: &CanonicalExpression) -> Result<Expr, OperationError> {
    antiderivative(equation)
}

pub(crate) fn antiderivative(equation: &CanonicalExpression) -> Result<Expr, OperationError> {
    match integrate(&equation.symbol(), &equation.expr) {
        IntegrationResult::Integrated { result, .. } => Ok(result),
        IntegrationResult::NotIntegrable(report) => {
            let reason = match report.reason {
                Some(ReasonCode::NonElementary(kind)) => {
                    format!("{} has no elementary antiderivative ({kind:?})", pretty(&equation.expr))
                }
                Some(ReasonCode::SizeLimit(size)) => {
                    format!("integrand grew too large ({size} nodes)")
                }
                Some(ReasonCode::UnknownStructure) | None => {
                    format!("no integration rule applies to {}", pretty(&equation.expr))
                }
            };
            Err(OperationError::Evaluation(reason))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decimals_drop_trailing_zeros() {
        assert_eq!(format_decimal(1.5), "1.5");
        assert_eq!(format_decimal(2.0), "2");
        assert_eq!(format_decimal(-0.0000001), "0");
        assert_eq!(format_decimal(1.0 / 3.0), "0.333333");
    }

    #[test]
    fn fractions_show_their_decimal() {
        let value = Value::from_expr(Expr::constant(3, 2)).unwrap();
        assert_eq!(value.to_string(), "3/2 ≈ 1.5");
    }
}
