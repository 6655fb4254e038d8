//! LaTeX rendering in the house style of typeset calculator output.

use crate::expr::{Expr, Rational};
use num_traits::{One, Signed};

use super::expr::split_neg;

pub fn latex(expr: &Expr) -> String {
    tex(0, expr)
}

fn tex(ctx: u8, expr: &Expr) -> String {
    match expr {
        Expr::Variable(v) => v.clone(),
        Expr::Constant(r) => {
            let body = tex_rational(r);
            if ctx > 1 && r.is_negative() {
                format!("\\left({body}\\right)")
            } else {
                body
            }
        }
        Expr::Pi => "\\pi".to_string(),

        Expr::Add(a, b) | Expr::Sub(a, b) => {
            let subtract = matches!(expr, Expr::Sub(_, _));
            let (neg_b, b_inner) = split_neg(b);
            let op = if neg_b ^ subtract { "-" } else { "+" };
            bracket(ctx, 1, format!("{} {op} {}", tex(1, a), tex(2, &b_inner)))
        }

        Expr::Mul(a, b) => {
            let (na, a_inner) = split_neg(a);
            let (nb, b_inner) = split_neg(b);
            let body = match (&a_inner, &b_inner) {
                (Expr::Constant(c), Expr::Div(num, den)) if num.is_one() => {
                    format!("\\frac{{{}}}{{{}}}", tex_rational(c), tex(0, den))
                }
                (Expr::Constant(c), rest) if !c.is_integer() && c.numer().is_one() => {
                    format!("\\frac{{{}}}{{{}}}", tex(2, rest), c.denom())
                }
                (a_inner, b_inner) if a_inner.is_one() => tex(2, b_inner),
                (Expr::Constant(_), _) => format!("{} {}", tex(2, &a_inner), tex(2, &b_inner)),
                _ => format!("{} \\cdot {}", tex(2, &a_inner), tex(2, &b_inner)),
            };
            let signed = if na ^ nb { format!("- {body}") } else { body };
            bracket(ctx, 2, signed)
        }

        Expr::Div(a, b) => {
            let (na, a_inner) = split_neg(a);
            let (nb, b_inner) = split_neg(b);
            let body = format!("\\frac{{{}}}{{{}}}", tex(0, &a_inner), tex(0, &b_inner));
            if na ^ nb {
                bracket(ctx, 2, format!("- {body}"))
            } else {
                body
            }
        }

        Expr::Pow(base, exp) => match &**exp {
            Expr::Constant(e) if *e == Rational::new(1.into(), 2.into()) => {
                format!("\\sqrt{{{}}}", tex(0, base))
            }
            _ => {
                let base_tex = match &**base {
                    Expr::Sin(_) | Expr::Cos(_) | Expr::Tan(_) | Expr::Log(_) => {
                        format!("\\left({}\\right)", tex(0, base))
                    }
                    other => tex(4, other),
                };
                format!("{base_tex}^{{{}}}", tex(0, exp))
            }
        },

        Expr::Neg(a) => bracket(ctx, 2, format!("- {}", tex(3, a))),

        Expr::Sin(a) => func("\\sin", a),
        Expr::Cos(a) => func("\\cos", a),
        Expr::Tan(a) => func("\\tan", a),
        Expr::Asin(a) => func("\\operatorname{asin}", a),
        Expr::Acos(a) => func("\\operatorname{acos}", a),
        Expr::Atan(a) => func("\\operatorname{atan}", a),
        Expr::Exp(a) if a.is_one() => "e".to_string(),
        Expr::Exp(a) => format!("e^{{{}}}", tex(0, a)),
        Expr::Log(a) => func("\\ln", a),
    }
}

fn func(name: &str, arg: &Expr) -> String {
    format!("{name}{{\\left({} \\right)}}", tex(0, arg))
}

fn tex_rational(r: &Rational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else if r.is_negative() {
        format!("- \\frac{{{}}}{{{}}}", -r.numer(), r.denom())
    } else {
        format!("\\frac{{{}}}{{{}}}", r.numer(), r.denom())
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("\\left({body}\\right)")
    } else {
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn x() -> Expr {
        Expr::var("x")
    }

    #[test]
    fn quotients_and_roots() {
        assert_eq!(latex(&Expr::Div(Expr::integer(1).boxed(), x().boxed())), "\\frac{1}{x}");
        assert_eq!(
            latex(&Expr::Pow(x().boxed(), Expr::constant(1, 2).boxed())),
            "\\sqrt{x}"
        );
        assert_eq!(latex(&Expr::constant(-1, 2)), "- \\frac{1}{2}");
    }

    #[test]
    fn logarithm_with_base() {
        let log2 = Expr::Div(
            Expr::Log(x().boxed()).boxed(),
            Expr::Log(Expr::integer(2).boxed()).boxed(),
        );
        assert_eq!(
            latex(&log2),
            "\\frac{\\ln{\\left(x \\right)}}{\\ln{\\left(2 \\right)}}"
        );
    }

    #[test]
    fn exponentials() {
        let rate = Expr::Mul(Expr::integer(3).boxed(), x().boxed());
        assert_eq!(latex(&Expr::Exp(rate.boxed())), "e^{3 x}");
        assert_eq!(latex(&Expr::e()), "e");
    }
}
