use crate::expr::{Expr, Rational, one};
use crate::simplify::{simplify, simplify_add, simplify_fully, simplify_sub};
use num_traits::{One, Zero};

/// Symbolic derivative of `expr` with respect to `var`, simplified.
pub fn differentiate(var: &str, expr: &Expr) -> Expr {
    simplify_fully(Differentiator { var }.derive(expr))
}

struct Differentiator<'a> {
    var: &'a str,
}

impl Differentiator<'_> {
    fn derive(&self, expr: &Expr) -> Expr {
        if !expr.contains_var(self.var) {
            return Expr::Constant(Rational::zero());
        }
        match expr {
            Expr::Variable(_) => Expr::Constant(Rational::one()),
            Expr::Constant(_) | Expr::Pi => Expr::Constant(Rational::zero()),

            Expr::Add(a, b) => simplify_add(self.derive(a), self.derive(b)),
            Expr::Sub(a, b) => simplify_sub(self.derive(a), self.derive(b)),
            Expr::Mul(a, b) => self.product_rule(a, b),
            Expr::Div(a, b) => self.quotient_rule(a, b),
            Expr::Pow(a, b) => self.power_rule(a, b),
            Expr::Neg(a) => simplify(Expr::Neg(self.derive(a).boxed())),

            Expr::Sin(a) => self.chain_rule(a, |inner| Expr::Cos(inner.boxed())),
            Expr::Cos(a) => simplify(Expr::Neg(
                self.chain_rule(a, |inner| Expr::Sin(inner.boxed())).boxed(),
            )),
            Expr::Tan(a) => self.chain_rule(a, |inner| {
                Expr::Div(one().boxed(), square(Expr::Cos(inner.boxed())).boxed())
            }),

            // d/du asin(u) = 1/sqrt(1 - u^2)
            Expr::Asin(a) => self.chain_rule(a, |inner| {
                Expr::Div(one().boxed(), sqrt(one_minus_square(inner)).boxed())
            }),
            Expr::Acos(a) => simplify(Expr::Neg(
                self.chain_rule(a, |inner| {
                    Expr::Div(one().boxed(), sqrt(one_minus_square(inner)).boxed())
                })
                .boxed(),
            )),
            Expr::Atan(a) => self.chain_rule(a, |inner| {
                Expr::Div(
                    one().boxed(),
                    Expr::Add(one().boxed(), square(inner).boxed()).boxed(),
                )
            }),

            Expr::Exp(a) => self.chain_rule(a, |inner| Expr::Exp(inner.boxed())),
            Expr::Log(a) => simplify(Expr::Div(self.derive(a).boxed(), a.clone().boxed())),
        }
    }

    fn product_rule(&self, a: &Expr, b: &Expr) -> Expr {
        let da = self.derive(a);
        let db = self.derive(b);
        simplify(Expr::Add(
            Expr::Mul(da.boxed(), b.clone().boxed()).boxed(),
            Expr::Mul(a.clone().boxed(), db.boxed()).boxed(),
        ))
    }

    fn quotient_rule(&self, a: &Expr, b: &Expr) -> Expr {
        if !b.contains_var(self.var) {
            return simplify(Expr::Div(self.derive(a).boxed(), b.clone().boxed()));
        }
        simplify(Expr::Div(
            Expr::Sub(
                Expr::Mul(self.derive(a).boxed(), b.clone().boxed()).boxed(),
                Expr::Mul(a.clone().boxed(), self.derive(b).boxed()).boxed(),
            )
            .boxed(),
            square(b.clone()).boxed(),
        ))
    }

    fn power_rule(&self, base: &Expr, exp: &Expr) -> Expr {
        if !exp.contains_var(self.var) {
            // n * u^(n-1) * u'
            let lowered = simplify(Expr::Sub(exp.clone().boxed(), one().boxed()));
            return simplify(Expr::Mul(
                Expr::Mul(
                    exp.clone().boxed(),
                    Expr::Pow(base.clone().boxed(), lowered.boxed()).boxed(),
                )
                .boxed(),
                self.derive(base).boxed(),
            ));
        }

        // u^v * (v' ln u + v u'/u)
        let f = Expr::Pow(base.clone().boxed(), exp.clone().boxed());
        let da = self.derive(base);
        let db = self.derive(exp);
        simplify(Expr::Mul(
            f.boxed(),
            Expr::Add(
                Expr::Mul(db.boxed(), Expr::Log(base.clone().boxed()).boxed()).boxed(),
                Expr::Div(
                    Expr::Mul(exp.clone().boxed(), da.boxed()).boxed(),
                    base.clone().boxed(),
                )
                .boxed(),
            )
            .boxed(),
        ))
    }

    fn chain_rule<F>(&self, arg: &Expr, outer: F) -> Expr
    where
        F: Fn(Expr) -> Expr,
    {
        let da = self.derive(arg);
        simplify(Expr::Mul(da.boxed(), outer(arg.clone()).boxed()))
    }
}

fn square(expr: Expr) -> Expr {
    Expr::Pow(expr.boxed(), Expr::integer(2).boxed())
}

fn sqrt(expr: Expr) -> Expr {
    Expr::Pow(expr.boxed(), Expr::constant(1, 2).boxed())
}

fn one_minus_square(expr: Expr) -> Expr {
    Expr::Sub(one().boxed(), square(expr).boxed())
}
