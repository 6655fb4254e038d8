use crate::expr::Expr;

use super::common::{coeff_of_var, divide_by};

pub fn is_log(expr: &Expr) -> bool {
    matches!(expr, Expr::Log(_))
}

/// `∫ ln(u) = (u ln u - u) / u'` for linear `u`.
pub fn integrate(expr: &Expr, var: &str) -> Option<Expr> {
    match expr {
        Expr::Log(u) => {
            let k = coeff_of_var(u, var)?;
            let u_log = Expr::Mul(u.clone(), Expr::Log(u.clone()).boxed());
            Some(divide_by(Expr::Sub(u_log.boxed(), u.clone()), k))
        }
        _ => None,
    }
}
