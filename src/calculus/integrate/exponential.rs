use crate::expr::{Expr, Rational};
use num_traits::{One, Signed};

use super::common::{coeff_of_var, divide_by};

pub fn is_exp(expr: &Expr) -> bool {
    matches!(expr, Expr::Exp(_)) || matches!(expr, Expr::Pow(base, _) if matches!(**base, Expr::Constant(_)))
}

pub fn integrate(expr: &Expr, var: &str) -> Option<Expr> {
    match expr {
        Expr::Exp(arg) => {
            let k = coeff_of_var(arg, var)?;
            Some(divide_by(Expr::Exp(arg.clone()), k))
        }
        // b^(kx + c) integrates to b^(kx + c) / (k ln b)
        Expr::Pow(base, exp) => match &**base {
            Expr::Constant(b) if b.is_positive() && !b.is_one() => {
                let k = coeff_of_var(exp, var)?;
                Some(Expr::Div(
                    expr.clone().boxed(),
                    Expr::Mul(Expr::Constant(k).boxed(), Expr::Log(base.clone()).boxed()).boxed(),
                ))
            }
            _ => None,
        },
        Expr::Mul(a, b) => match (&**a, &**b) {
            (Expr::Exp(arg), trig) | (trig, Expr::Exp(arg)) => integrate_exp_trig(arg, trig, var),
            _ => None,
        },
        _ => None,
    }
}

/// `e^(ax+b)` times `sin` or `cos` of `cx+d`, from integrating by parts twice:
/// `∫ e^u sin v = e^u (a sin v - c cos v) / (a² + c²)` and
/// `∫ e^u cos v = e^u (a cos v + c sin v) / (a² + c²)`.
fn integrate_exp_trig(exp_arg: &Expr, trig: &Expr, var: &str) -> Option<Expr> {
    let a = coeff_of_var(exp_arg, var)?;
    let (Expr::Sin(arg) | Expr::Cos(arg)) = trig else {
        return None;
    };
    let c = coeff_of_var(arg, var)?;
    let scaled = |k: &Rational, e: Expr| Expr::Mul(Expr::Constant(k.clone()).boxed(), e.boxed());
    let sin = Expr::Sin(arg.clone());
    let cos = Expr::Cos(arg.clone());
    let combination = match trig {
        Expr::Sin(_) => Expr::Sub(scaled(&a, sin).boxed(), scaled(&c, cos).boxed()),
        _ => Expr::Add(scaled(&a, cos).boxed(), scaled(&c, sin).boxed()),
    };
    let norm = &a * &a + &c * &c;
    Some(Expr::Div(
        Expr::Mul(Expr::Exp(Box::new(exp_arg.clone())).boxed(), combination.boxed()).boxed(),
        Expr::Constant(norm).boxed(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculus::differentiate;
    use crate::eval::eval_at;
    use crate::parser::parse_expr;

    #[test]
    fn exp_times_trig_differentiates_back() {
        for input in ["exp(x)*sin(x)", "cos(3x)*exp(2x)"] {
            let expr = parse_expr(input).unwrap();
            let result = integrate(&expr, "x").unwrap();
            let back = differentiate("x", &result);
            for x in [0.1, 0.7, 1.3] {
                let want = eval_at(&expr, "x", x).unwrap();
                let got = eval_at(&back, "x", x).unwrap();
                assert!((want - got).abs() < 1e-9, "{input} at {x}: {got} vs {want}");
            }
        }
    }
}
