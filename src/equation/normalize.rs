use super::{Base, EquationKind, InverseTrigFunction, ParsedEquation, Payload, TrigFunction};
use crate::expr::{Expr, Rational};
use crate::polynomial::Poly;
use crate::simplify::simplify_fully;

/// The single symbolic form every equation kind is lifted into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanonicalExpression {
    pub kind: EquationKind,
    pub var: char,
    pub expr: Expr,
}

impl CanonicalExpression {
    /// Name of the independent variable inside `expr`.
    pub fn symbol(&self) -> String {
        self.var.to_string()
    }
}

pub fn canonical(equation: &ParsedEquation) -> CanonicalExpression {
    let var = equation.independent_var;
    let x = Expr::var(var.to_string());
    let expr = match &equation.payload {
        Payload::Symbolic(expr) => expr.clone(),
        Payload::Linear { m, b } => simplify_fully(
            Poly::from_coefficients(&[m.clone(), b.clone()]).to_expr(&var.to_string()),
        ),
        Payload::Polynomial(coeffs) => {
            simplify_fully(Poly::from_coefficients(coeffs).to_expr(&var.to_string()))
        }
        Payload::Reciprocal {
            numerator,
            exponent,
        } => simplify_fully(Expr::Div(
            Expr::Constant(numerator.clone()).boxed(),
            Expr::Pow(x.boxed(), Expr::integer(*exponent).boxed()).boxed(),
        )),
        Payload::Exponential { base, rate } => {
            let exponent = scaled(rate, x);
            simplify_fully(match base {
                Base::E => Expr::Exp(exponent.boxed()),
                Base::Real(b) => Expr::Pow(Expr::Constant(b.clone()).boxed(), exponent.boxed()),
            })
        }
        Payload::Logarithmic { base } => match base {
            Base::E => Expr::Log(x.boxed()),
            Base::Real(b) => Expr::Div(
                Expr::Log(x.boxed()).boxed(),
                Expr::Log(Expr::Constant(b.clone()).boxed()).boxed(),
            ),
        },
        Payload::Trigonometric(function) => match function {
            TrigFunction::Sin => Expr::Sin(x.boxed()),
            TrigFunction::Cos => Expr::Cos(x.boxed()),
            TrigFunction::Tan => Expr::Tan(x.boxed()),
        },
        Payload::InverseTrigonometric(function) => match function {
            InverseTrigFunction::Arcsin => Expr::Asin(x.boxed()),
            InverseTrigFunction::Arccos => Expr::Acos(x.boxed()),
            InverseTrigFunction::Arctan => Expr::Atan(x.boxed()),
        },
    };

    CanonicalExpression {
        kind: equation.kind(),
        var,
        expr,
    }
}

fn scaled(rate: &Rational, x: Expr) -> Expr {
    Expr::Mul(Expr::Constant(rate.clone()).boxed(), x.boxed())
}
