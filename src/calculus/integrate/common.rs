use crate::expr::{Expr, Rational};
use crate::polynomial::Poly;
use num_traits::Zero;

/// Split `a*var + b` into `(a, b)`.
pub fn linear_parts(expr: &Expr, var: &str) -> Option<(Rational, Rational)> {
    let poly = Poly::from_expr(expr, var)?;
    match poly.degree() {
        None | Some(0) | Some(1) => Some((poly.coeff(1), poly.coeff(0))),
        _ => None,
    }
}

/// Slope of an argument that is linear in `var`; constant arguments have none.
pub fn coeff_of_var(expr: &Expr, var: &str) -> Option<Rational> {
    linear_parts(expr, var)
        .map(|(coef, _)| coef)
        .filter(|coef| !coef.is_zero())
}

/// `result / k`, skipping the division when `k` is one.
pub fn divide_by(result: Expr, k: Rational) -> Expr {
    if k == Rational::from_integer(1.into()) {
        result
    } else {
        Expr::Div(result.boxed(), Expr::Constant(k).boxed())
    }
}
