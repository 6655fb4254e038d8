use crate::expr::{Expr, Rational};
use crate::polynomial::Poly;
use num_traits::Zero;

use super::polynomial::{antiderivative, power};

pub fn is_rational(expr: &Expr, var: &str) -> bool {
    match expr {
        Expr::Div(num, den) => {
            Poly::from_expr(num, var).is_some()
                && Poly::from_expr(den, var).is_some_and(|d| !d.is_constant())
        }
        _ => false,
    }
}

/// Polynomials over a linear or monomial denominator.
pub fn integrate(expr: &Expr, var: &str) -> Option<Expr> {
    let Expr::Div(num, den) = expr else {
        return None;
    };
    let numer = Poly::from_expr(num, var)?;
    let denom = Poly::from_expr(den, var)?;

    match denom.degree()? {
        0 => None,
        1 => {
            // N/D = Q + R/D with constant R
            let (quotient, remainder) = numer.div_rem(&denom);
            let slope = denom.coeff(1);
            let log_coeff = remainder.coeff(0) / slope;
            let log_term = Expr::Mul(
                Expr::Constant(log_coeff).boxed(),
                Expr::Log(denom.to_expr(var).boxed()).boxed(),
            );
            Some(Expr::Add(antiderivative(&quotient).to_expr(var).boxed(), log_term.boxed()))
        }
        d if denom.coeffs.len() == 1 => {
            let lead = denom.leading_coeff();
            let terms: Vec<Expr> = numer
                .coeffs
                .iter()
                .map(|(exp, coeff)| {
                    let shifted = Rational::from_integer((*exp as i64 - d as i64).into());
                    Expr::Mul(Expr::Constant(coeff / &lead).boxed(), power(var, &shifted).boxed())
                })
                .collect();
            terms
                .into_iter()
                .reduce(|a, b| Expr::Add(a.boxed(), b.boxed()))
                .or_else(|| Some(Expr::Constant(Rational::zero())))
        }
        _ => None,
    }
}
