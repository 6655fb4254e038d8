use crate::expr::{Expr, Rational};
use crate::polynomial::Poly;
use num_bigint::BigInt;
use num_traits::{One, Zero};

pub fn is_polynomial(expr: &Expr, var: &str) -> bool {
    Poly::from_expr(expr, var).is_some()
}

pub fn degree(expr: &Expr, var: &str) -> Option<usize> {
    Poly::from_expr(expr, var).map(|p| p.degree().unwrap_or(0))
}

/// Termwise antiderivative of a polynomial.
pub fn antiderivative(poly: &Poly) -> Poly {
    poly.coeffs
        .iter()
        .fold(Poly::zero(), |acc, (exp, coeff)| {
            let next = exp + 1;
            acc + Poly::monomial(next, coeff / Rational::from_integer(BigInt::from(next)))
        })
}

pub fn integrate(expr: &Expr, var: &str) -> Option<Expr> {
    if let Some(poly) = Poly::from_expr(expr, var) {
        return Some(antiderivative(&poly).to_expr(var));
    }
    match expr {
        Expr::Pow(base, exp) => match (&**base, &**exp) {
            (Expr::Variable(name), Expr::Constant(n)) if name == var => Some(power(var, n)),
            _ => None,
        },
        Expr::Div(num, den) => {
            let c = match &**num {
                Expr::Constant(c) => c.clone(),
                _ => return None,
            };
            let n = match &**den {
                Expr::Variable(name) if name == var => Rational::one(),
                Expr::Pow(base, exp) => match (&**base, &**exp) {
                    (Expr::Variable(name), Expr::Constant(n)) if name == var => n.clone(),
                    _ => return None,
                },
                _ => return None,
            };
            Some(Expr::Mul(Expr::Constant(c).boxed(), power(var, &-n).boxed()))
        }
        _ => None,
    }
}

/// `∫ var^n`, the logarithm when `n = -1`.
pub(super) fn power(var: &str, n: &Rational) -> Expr {
    if *n == -Rational::one() {
        return Expr::Log(Expr::var(var).boxed());
    }
    let k = n + Rational::one();
    if k.is_zero() {
        return Expr::var(var);
    }
    Expr::Div(
        Expr::Pow(Expr::var(var).boxed(), Expr::Constant(k.clone()).boxed()).boxed(),
        Expr::Constant(k).boxed(),
    )
}
