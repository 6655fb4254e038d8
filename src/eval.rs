//! Floating-point evaluation of expressions over the reals.

use crate::expr::{Expr, Rational};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use std::f64::consts::{E, PI};

/// Evaluate `expr` with `var` bound to `x`.
///
/// Returns `None` outside the real domain: division by zero, logarithms of
/// non-positive values, inverse sine/cosine outside `[-1, 1]`, even roots of negative
/// numbers, and any non-finite intermediate.
pub fn eval_at(expr: &Expr, var: &str, x: f64) -> Option<f64> {
    eval_with(expr, &|name| (name == var).then_some(x))
}

/// Evaluate an expression that has no free variables.
pub fn eval_constant(expr: &Expr) -> Option<f64> {
    eval_with(expr, &|_| None)
}

fn eval_with(expr: &Expr, bind: &dyn Fn(&str) -> Option<f64>) -> Option<f64> {
    let value = match expr {
        Expr::Constant(c) => rational_to_f64(c),
        Expr::Pi => PI,
        Expr::Variable(v) => bind(v)?,
        Expr::Add(a, b) => eval_with(a, bind)? + eval_with(b, bind)?,
        Expr::Sub(a, b) => eval_with(a, bind)? - eval_with(b, bind)?,
        Expr::Mul(a, b) => eval_with(a, bind)? * eval_with(b, bind)?,
        Expr::Div(a, b) => {
            let denom = eval_with(b, bind)?;
            if denom == 0.0 {
                return None;
            }
            eval_with(a, bind)? / denom
        }
        Expr::Pow(base, exp) => real_pow(eval_with(base, bind)?, exp, bind)?,
        Expr::Neg(inner) => -eval_with(inner, bind)?,
        Expr::Sin(inner) => eval_with(inner, bind)?.sin(),
        Expr::Cos(inner) => eval_with(inner, bind)?.cos(),
        Expr::Tan(inner) => {
            let v = eval_with(inner, bind)?;
            if v.cos().abs() < 1e-12 {
                return None;
            }
            v.tan()
        }
        Expr::Asin(inner) => inverse_unit(eval_with(inner, bind)?)?.asin(),
        Expr::Acos(inner) => inverse_unit(eval_with(inner, bind)?)?.acos(),
        Expr::Atan(inner) => eval_with(inner, bind)?.atan(),
        Expr::Exp(inner) => match inner.as_constant() {
            Some(c) if c == &Rational::from_integer(1.into()) => E,
            _ => eval_with(inner, bind)?.exp(),
        },
        Expr::Log(inner) => {
            let v = eval_with(inner, bind)?;
            if v <= 0.0 {
                return None;
            }
            v.ln()
        }
    };
    value.is_finite().then_some(value)
}

fn inverse_unit(v: f64) -> Option<f64> {
    (-1.0..=1.0).contains(&v).then_some(v)
}

/// Real power; odd roots of negative bases stay real.
fn real_pow(base: f64, exp: &Expr, bind: &dyn Fn(&str) -> Option<f64>) -> Option<f64> {
    if let Expr::Constant(e) = exp {
        if base < 0.0 && !e.is_integer() {
            let odd_root = e.denom() % BigInt::from(2) != BigInt::from(0);
            if !odd_root {
                return None;
            }
            let magnitude = base.abs().powf(rational_to_f64(e));
            let odd_power = e.numer().abs() % BigInt::from(2) == BigInt::from(1);
            return Some(if odd_power { -magnitude } else { magnitude });
        }
        if base == 0.0 && e.is_negative() {
            return None;
        }
        if e.is_integer() {
            if let Some(k) = e.to_integer().to_i32() {
                return Some(base.powi(k));
            }
        }
        return Some(base.powf(rational_to_f64(e)));
    }
    let e = eval_with(exp, bind)?;
    if base < 0.0 && e.fract() != 0.0 {
        return None;
    }
    Some(base.powf(e))
}

pub(crate) fn rational_to_f64(r: &Rational) -> f64 {
    crate::polynomial::rational_to_f64(r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    #[test]
    fn logarithm_outside_domain_is_none() {
        let expr = parse_expr("ln(x)").unwrap();
        assert!(eval_at(&expr, "x", -1.0).is_none());
        assert!((eval_at(&expr, "x", E).unwrap() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn cube_root_of_negative_is_real() {
        let expr = crate::simplify::simplify_fully(parse_expr("x^(1/3)").unwrap());
        let value = eval_at(&expr, "x", -8.0).unwrap();
        assert!((value + 2.0).abs() < 1e-12);
    }
}
