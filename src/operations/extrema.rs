use std::fmt;

use super::{OperationError, Value, ZERO_TOLERANCE};
use crate::calculus::differentiate;
use crate::equation::{CanonicalExpression, EquationKind};
use crate::eval::eval_at;
use crate::expr::Expr;
use crate::simplify::evaluate_at;
use crate::solver::{Solution, solve_zeros};
use num_traits::Zero;

/// Classification of a critical point by the sign of the second derivative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nature {
    Maximum,
    Minimum,
    Inflection,
}

impl fmt::Display for Nature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Nature::Maximum => "maximum",
            Nature::Minimum => "minimum",
            Nature::Inflection => "point of inflection",
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CriticalPoint {
    pub x: Value,
    pub y: Value,
    pub nature: Nature,
}

impl fmt::Display for CriticalPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}) {}", self.x, self.y, self.nature)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Extrema {
    /// A straight line has neither a maximum nor a minimum.
    NotApplicable,
    None,
    Points(Vec<CriticalPoint>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct StationaryAnalysis {
    pub first_derivative: Expr,
    pub second_derivative: Expr,
    pub points: Vec<CriticalPoint>,
}

pub fn maximum(equation: &CanonicalExpression) -> Result<Extrema, OperationError> {
    extrema_of(equation, Nature::Maximum)
}

pub fn minimum(equation: &CanonicalExpression) -> Result<Extrema, OperationError> {
    extrema_of(equation, Nature::Minimum)
}

fn extrema_of(equation: &CanonicalExpression, wanted: Nature) -> Result<Extrema, OperationError> {
    if equation.kind == EquationKind::Linear {
        return Ok(Extrema::NotApplicable);
    }
    let points: Vec<CriticalPoint> = stationary_points(equation)?
        .points
        .into_iter()
        .filter(|p| p.nature == wanted)
        .collect();
    Ok(if points.is_empty() {
        Extrema::None
    } else {
        Extrema::Points(points)
    })
}

/// Zeros of the first derivative, each classified by the second derivative.
pub fn stationary_points(equation: &CanonicalExpression) -> Result<StationaryAnalysis, OperationError> {
    let var = equation.symbol();
    let first_derivative = differentiate(&var, &equation.expr);
    let second_derivative = differentiate(&var, &first_derivative);

    let candidates = if first_derivative.contains_var(&var) {
        solve_zeros(&first_derivative, &var)
            .map_err(|err| OperationError::Evaluation(err.to_string()))?
    } else {
        // constant slope: no isolated critical points
        Vec::new()
    };

    let points = candidates
        .into_iter()
        .map(|candidate| classify(equation, &second_derivative, candidate))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(StationaryAnalysis {
        first_derivative,
        second_derivative,
        points,
    })
}

fn classify(
    equation: &CanonicalExpression,
    second_derivative: &Expr,
    candidate: Solution,
) -> Result<CriticalPoint, OperationError> {
    let var = equation.symbol();
    let curvature = value_at(second_derivative, &var, &candidate).ok_or_else(|| {
        OperationError::Evaluation(format!("could not evaluate point x = {}", candidate.approx))
    })?;
    let nature = match &curvature.exact {
        Some(Expr::Constant(c)) if c.is_zero() => Nature::Inflection,
        _ if curvature.approx.abs() < ZERO_TOLERANCE => Nature::Inflection,
        _ if curvature.approx < 0.0 => Nature::Maximum,
        _ => Nature::Minimum,
    };
    let y = value_at(&equation.expr, &var, &candidate).ok_or_else(|| {
        OperationError::Evaluation(format!("could not evaluate point x = {}", candidate.approx))
    })?;

    Ok(CriticalPoint {
        x: Value {
            exact: candidate.exact,
            approx: candidate.approx,
        },
        y,
        nature,
    })
}

/// `expr` at the candidate, exactly when the candidate has a closed form.
fn value_at(expr: &Expr, var: &str, at: &Solution) -> Option<Value> {
    let approx = eval_at(expr, var, at.approx)?;
    at.exact
        .as_ref()
        .and_then(|x| Value::from_expr(evaluate_at(expr, var, x)))
        .or(Some(Value::approximate(approx)))
}
