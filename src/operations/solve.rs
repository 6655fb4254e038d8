use std::fmt;

use super::{OperationError, Value};
use crate::equation::CanonicalExpression;
use crate::eval::eval_at;
use crate::expr::Expr;
use crate::simplify::evaluate_at;
use crate::solver::solve_zeros;

/// Value of the curve where it meets the vertical axis.
#[derive(Debug, Clone, PartialEq)]
pub enum YIntercept {
    Value(Value),
    /// The expression has no finite value at zero.
    Undefined,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Intercepts {
    /// Real roots in ascending order.
    pub x_intercepts: Vec<Value>,
    pub y_intercept: YIntercept,
}

impl fmt::Display for Intercepts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.x_intercepts.is_empty() {
            writeln!(f, "When y=0: No Real Solution")?;
        } else {
            let roots: Vec<String> = self.x_intercepts.iter().map(Value::to_string).collect();
            writeln!(f, "When y=0: {}", roots.join(", "))?;
        }
        match &self.y_intercept {
            YIntercept::Value(value) => write!(f, "When x=0: {value}"),
            YIntercept::Undefined => write!(f, "When x=0: undefined (division by zero)"),
        }
    }
}

pub fn solve(equation: &CanonicalExpression) -> Result<Intercepts, OperationError> {
    Ok(Intercepts {
        x_intercepts: x_intercepts(equation)?,
        y_intercept: y_intercept(equation),
    })
}

pub(crate) fn x_intercepts(equation: &CanonicalExpression) -> Result<Vec<Value>, OperationError> {
    let roots = solve_zeros(&equation.expr, &equation.symbol())
        .map_err(|err| OperationError::Evaluation(err.to_string()))?;
    Ok(roots
        .into_iter()
        .map(|root| Value {
            exact: root.exact,
            approx: root.approx,
        })
        .collect())
}

fn y_intercept(equation: &CanonicalExpression) -> YIntercept {
    let var = equation.symbol();
    let Some(approx) = eval_at(&equation.expr, &var, 0.0) else {
        return YIntercept::Undefined;
    };
    let exact = evaluate_at(&equation.expr, &var, &Expr::integer(0));
    YIntercept::Value(Value::from_expr(exact).unwrap_or(Value::approximate(approx)))
}
