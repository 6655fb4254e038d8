use crate::expr::{Expr, Rational};
use num_traits::{One, Signed};

/// Plain-text rendering that the expression parser reads back.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable(v) => v.clone(),
            Expr::Constant(r) => bracket_constant(ctx, r),
            Expr::Pi => "pi".to_string(),

            Expr::Add(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let body = format!("{s_a} {} {}", if neg_b { "-" } else { "+" }, pp(2, &b_inner));
                bracket(ctx, 1, body)
            }

            Expr::Sub(a, b) => {
                let s_a = pp(1, a);
                let (neg_b, b_inner) = split_neg(b);
                let body = format!("{s_a} {} {}", if neg_b { "+" } else { "-" }, pp(2, &b_inner));
                bracket(ctx, 1, body)
            }

            Expr::Mul(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = match (&a_inner, &b_inner) {
                    (Expr::Constant(c), Expr::Div(num, den)) if num.is_one() => {
                        format!("{}/{}", show_rational(c), pp(3, den))
                    }
                    (a_inner, b_inner) if a_inner.is_one() => pp(2, b_inner),
                    _ => format!("{}*{}", pp(2, &a_inner), pp(2, &b_inner)),
                };
                if na ^ nb {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Div(a, b) => {
                let (na, a_inner) = split_neg(a);
                let (nb, b_inner) = split_neg(b);
                let body = format!("{}/{}", pp(2, &a_inner), pp(3, &b_inner));
                if na ^ nb {
                    bracket(ctx, 2, format!("-{body}"))
                } else {
                    bracket(ctx, 2, body)
                }
            }

            Expr::Pow(a, b) => bracket(ctx, 3, format!("{}^{}", pp(4, a), pp(4, b))),

            Expr::Neg(a) => {
                let (is_neg, inner) = split_neg(a);
                if is_neg {
                    pp(ctx, &inner)
                } else {
                    bracket(ctx, 2, format!("-{}", pp(3, &inner)))
                }
            }

            Expr::Sin(a) => format!("sin({})", pp(0, a)),
            Expr::Cos(a) => format!("cos({})", pp(0, a)),
            Expr::Tan(a) => format!("tan({})", pp(0, a)),
            Expr::Atan(a) => format!("arctan({})", pp(0, a)),
            Expr::Asin(a) => format!("arcsin({})", pp(0, a)),
            Expr::Acos(a) => format!("arccos({})", pp(0, a)),
            Expr::Exp(a) if a.is_one() => "e".to_string(),
            Expr::Exp(a) => format!("exp({})", pp(0, a)),
            Expr::Log(a) => format!("ln({})", pp(0, a)),
        }
    }

    pp(0, expr)
}

/// Peel a leading minus sign off negations, negative constants and products.
pub(crate) fn split_neg(expr: &Expr) -> (bool, Expr) {
    match expr {
        Expr::Neg(inner) => (true, *inner.clone()),
        Expr::Constant(r) if r.is_negative() => (true, Expr::Constant(-r)),
        Expr::Mul(a, b) => match &**a {
            Expr::Constant(c) if c.is_negative() => {
                let positive = -c;
                if positive.is_one() {
                    (true, *b.clone())
                } else {
                    (true, Expr::Mul(Expr::Constant(positive).boxed(), b.clone()))
                }
            }
            _ => (false, expr.clone()),
        },
        other => (false, other.clone()),
    }
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}

fn bracket_constant(ctx: u8, r: &Rational) -> String {
    let body = show_rational(r);
    if (ctx > 1 && r.is_negative()) || (ctx > 2 && !r.is_integer()) {
        format!("({body})")
    } else {
        body
    }
}

pub(crate) fn show_rational(r: &Rational) -> String {
    if r.is_integer() {
        format!("{}", r.numer())
    } else {
        format!("{}/{}", r.numer(), r.denom())
    }
}
