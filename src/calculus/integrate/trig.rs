use crate::expr::{Expr, one};

use super::common::{coeff_of_var, divide_by};

pub fn is_trig(expr: &Expr) -> bool {
    matches!(expr, Expr::Sin(_) | Expr::Cos(_) | Expr::Tan(_))
}

pub fn is_inverse_trig(expr: &Expr) -> bool {
    matches!(expr, Expr::Asin(_) | Expr::Acos(_) | Expr::Atan(_))
}

pub fn integrate(expr: &Expr, var: &str) -> Option<Expr> {
    match expr {
        Expr::Sin(arg) => {
            let k = coeff_of_var(arg, var)?;
            Some(divide_by(Expr::Neg(Expr::Cos(arg.clone()).boxed()), k))
        }
        Expr::Cos(arg) => {
            let k = coeff_of_var(arg, var)?;
            Some(divide_by(Expr::Sin(arg.clone()), k))
        }
        Expr::Tan(arg) => {
            let k = coeff_of_var(arg, var)?;
            let base = Expr::Neg(Expr::Log(Expr::Cos(arg.clone()).boxed()).boxed());
            Some(divide_by(base, k))
        }
        Expr::Asin(arg) => {
            let k = coeff_of_var(arg, var)?;
            let u = (**arg).clone();
            let result = Expr::Add(
                Expr::Mul(u.clone().boxed(), Expr::Asin(arg.clone()).boxed()).boxed(),
                sqrt_one_minus_square(u).boxed(),
            );
            Some(divide_by(result, k))
        }
        Expr::Acos(arg) => {
            let k = coeff_of_var(arg, var)?;
            let u = (**arg).clone();
            let result = Expr::Sub(
                Expr::Mul(u.clone().boxed(), Expr::Acos(arg.clone()).boxed()).boxed(),
                sqrt_one_minus_square(u).boxed(),
            );
            Some(divide_by(result, k))
        }
        Expr::Atan(arg) => {
            let k = coeff_of_var(arg, var)?;
            let u = (**arg).clone();
            let log_term = Expr::Div(
                Expr::Log(
                    Expr::Add(one().boxed(), Expr::Pow(u.clone().boxed(), Expr::integer(2).boxed()).boxed())
                        .boxed(),
                )
                .boxed(),
                Expr::integer(2).boxed(),
            );
            let result = Expr::Sub(
                Expr::Mul(u.boxed(), Expr::Atan(arg.clone()).boxed()).boxed(),
                log_term.boxed(),
            );
            Some(divide_by(result, k))
        }
        _ => None,
    }
}

fn sqrt_one_minus_square(u: Expr) -> Expr {
    Expr::Pow(
        Expr::Sub(one().boxed(), Expr::Pow(u.boxed(), Expr::integer(2).boxed()).boxed()).boxed(),
        Expr::constant(1, 2).boxed(),
    )
}
