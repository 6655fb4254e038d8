//! Definite integrals over a batch of equations.

use std::fmt;

use super::solve::x_intercepts;
use super::{OperationError, Value, antiderivative, format_decimal};
use crate::equation::{CanonicalExpression, ParseMode, canonical, try_parse_equation};
use crate::eval::eval_at;
use crate::expr::{Expr, Rational};
use crate::simplify::{evaluate_at, simplify_fully};
use num_traits::{Signed, Zero};

/// Subintervals for Simpson's rule; also the grid checked for points where the
/// integrand is undefined. Must be even.
const SIMPSON_INTERVALS: usize = 1000;
const QUADRATURE_TOLERANCE: f64 = 1e-4;

#[derive(Debug, Clone, PartialEq)]
pub struct AreaRequest {
    pub equation: String,
    /// Explicit `(lower, upper)`; inferred from the x-intercepts when absent.
    pub bounds: Option<(Expr, Expr)>,
}

impl AreaRequest {
    /// Bounds inferred from the smallest and largest real x-intercepts.
    pub fn inferred(equation: impl Into<String>) -> Self {
        AreaRequest {
            equation: equation.into(),
            bounds: None,
        }
    }

    pub fn between(equation: impl Into<String>, lower: Expr, upper: Expr) -> Self {
        AreaRequest {
            equation: equation.into(),
            bounds: Some((lower, upper)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AreaEntry {
    Computed {
        equation: String,
        lower: Value,
        upper: Value,
        area: Value,
    },
    Skipped {
        equation: String,
        reason: OperationError,
    },
}

impl fmt::Display for AreaEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaEntry::Computed {
                equation,
                lower,
                upper,
                area,
            } => write!(f, "{equation} from {lower} to {upper}: {area}"),
            AreaEntry::Skipped { equation, reason } => write!(f, "{equation}: skipped ({reason})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AreaReport {
    pub entries: Vec<AreaEntry>,
    pub total: Value,
}

impl fmt::Display for AreaReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(f, "{entry}")?;
        }
        write!(f, "Total area: {}", self.total)
    }
}

/// Area between each curve and the horizontal axis. A failing equation is skipped
/// with its reason; the others still contribute to the total.
pub fn area_under_curves(requests: &[AreaRequest]) -> AreaReport {
    let entries: Vec<AreaEntry> = requests
        .iter()
        .map(|request| match area_of(request) {
            Ok((lower, upper, area)) => AreaEntry::Computed {
                equation: request.equation.clone(),
                lower,
                upper,
                area,
            },
            Err(reason) => {
                log::warn!("skipping area under {:?}: {reason}", request.equation);
                AreaEntry::Skipped {
                    equation: request.equation.clone(),
                    reason,
                }
            }
        })
        .collect();

    let areas: Vec<&Value> = entries
        .iter()
        .filter_map(|entry| match entry {
            AreaEntry::Computed { area, .. } => Some(area),
            AreaEntry::Skipped { .. } => None,
        })
        .collect();
    let total = sum_values(&areas);

    AreaReport { entries, total }
}

fn sum_values(values: &[&Value]) -> Value {
    let approx = values.iter().map(|v| v.approx).sum::<f64>();
    let exact = values
        .iter()
        .map(|v| match &v.exact {
            Some(Expr::Constant(r)) => Some(r.clone()),
            _ => None,
        })
        .try_fold(Rational::zero(), |acc, r| Some(acc + r?));
    Value {
        exact: exact.map(Expr::Constant),
        approx,
    }
}

fn area_of(request: &AreaRequest) -> Result<(Value, Value, Value), OperationError> {
    let parsed = try_parse_equation(&request.equation, ParseMode::General)?;
    let equation = canonical(&parsed);

    let (lower, upper) = match &request.bounds {
        Some((lower, upper)) => (bound(lower)?, bound(upper)?),
        None => inferred_bounds(&equation)?,
    };
    if lower.approx >= upper.approx {
        return Err(OperationError::InvalidBounds {
            lower: lower.approx,
            upper: upper.approx,
        });
    }

    let area = definite_integral(&equation, &lower, &upper)?;
    Ok((lower, upper, absolute(area)))
}

fn bound(expr: &Expr) -> Result<Value, OperationError> {
    Value::from_expr(expr.clone()).ok_or_else(|| {
        OperationError::Evaluation(format!("bound {expr} is not a finite real number"))
    })
}

fn inferred_bounds(equation: &CanonicalExpression) -> Result<(Value, Value), OperationError> {
    let mut roots = x_intercepts(equation)?;
    if roots.len() < 2 {
        return Err(OperationError::BoundInference {
            intercepts: roots.len(),
        });
    }
    let upper = roots.pop();
    let lower = roots.into_iter().next();
    lower
        .zip(upper)
        .ok_or(OperationError::BoundInference { intercepts: 0 })
}

/// `F(upper) - F(lower)` when an antiderivative exists, Simpson's rule otherwise.
fn definite_integral(
    equation: &CanonicalExpression,
    lower: &Value,
    upper: &Value,
) -> Result<Value, OperationError> {
    let var = equation.symbol();
    let nodes = simpson_nodes(&equation.expr, &var, lower.approx, upper.approx)?;

    let exact = antiderivative(equation).ok().and_then(|f| {
        let at = |bound: &Value| {
            let point = bound.exact.clone()?;
            Some(evaluate_at(&f, &var, &point))
        };
        Value::from_expr(simplify_fully(Expr::Sub(at(upper)?.boxed(), at(lower)?.boxed())))
    });

    let numeric = simpson(&nodes, upper.approx - lower.approx);
    match exact {
        // an antiderivative that jumps inside the interval disagrees with the quadrature
        Some(value) if (value.approx - numeric).abs() <= QUADRATURE_TOLERANCE * (1.0 + numeric.abs()) => {
            Ok(value)
        }
        _ => {
            log::debug!("no closed form for the area under {}; using Simpson's rule", equation.expr);
            Ok(Value::approximate(numeric))
        }
    }
}

/// Integrand values on an even grid over `[a, b]`; errors if any are undefined.
fn simpson_nodes(expr: &Expr, var: &str, a: f64, b: f64) -> Result<Vec<f64>, OperationError> {
    let h = (b - a) / SIMPSON_INTERVALS as f64;
    (0..=SIMPSON_INTERVALS)
        .map(|i| {
            let x = a + h * i as f64;
            eval_at(expr, var, x).ok_or_else(|| {
                OperationError::Evaluation(format!(
                    "integrand is undefined at x = {} within [{}, {}]",
                    format_decimal(x),
                    format_decimal(a),
                    format_decimal(b)
                ))
            })
        })
        .collect()
}

fn simpson(nodes: &[f64], width: f64) -> f64 {
    let n = nodes.len() - 1;
    let h = width / n as f64;
    let interior: f64 = nodes[1..n]
        .iter()
        .enumerate()
        .map(|(i, y)| if i % 2 == 0 { 4.0 * y } else { 2.0 * y })
        .sum();
    h / 3.0 * (nodes[0] + interior + nodes[n])
}

fn absolute(value: Value) -> Value {
    let approx = value.approx.abs();
    let exact = match value.exact {
        Some(Expr::Constant(r)) => Some(Expr::Constant(r.abs())),
        // irrational areas are reported as decimals
        _ => None,
    };
    Value { exact, approx }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simpson_is_exact_for_cubics() {
        let expr = crate::parser::parse_expr("x^3").unwrap();
        let nodes = simpson_nodes(&expr, "x", 0.0, 2.0).unwrap();
        assert!((simpson(&nodes, 2.0) - 4.0).abs() < 1e-9);
    }

    #[test]
    fn total_is_exact_when_every_area_is_rational() {
        let a = Value::from_expr(Expr::constant(1, 2)).unwrap();
        let b = Value::from_expr(Expr::integer(2)).unwrap();
        let total = sum_values(&[&a, &b]);
        assert_eq!(total.exact, Some(Expr::constant(5, 2)));
    }
}
