//! `∫ g(u(x)) u'(x) dx = G(u(x))`: find a factor whose argument's derivative makes up
//! the rest of the integrand, integrate the outer function in a fresh variable and
//! substitute back.

use crate::calculus::differentiate;
use crate::expr::{Expr, Rational};
use crate::polynomial::Poly;
use crate::simplify::{simplify, simplify_fully, substitute};
use num_traits::{One, Zero};

use super::{flatten_product, integrate_table, polynomial, rebuild_product};

pub(super) fn integrate_by_substitution(expr: &Expr, var: &str) -> Option<Expr> {
    let u_name = fresh_var_name(expr);
    let product = gather_common_factor(expr, var).unwrap_or_else(|| expr.clone());
    let (constant, factors) = flatten_product(&product);

    for (idx, factor) in factors.iter().enumerate() {
        let rest = rebuild_product(
            constant.clone(),
            factors
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != idx)
                .map(|(_, f)| f.clone())
                .collect(),
        );
        for (inner, outer) in candidates(factor, var, &u_name) {
            let inner_derivative = simplify_fully(differentiate(var, &inner));
            if inner_derivative.is_zero() {
                continue;
            }
            let Some(multiplier) = constant_ratio(&rest, &inner_derivative, var) else {
                continue;
            };
            let Some(antiderivative) = integrate_table(&outer, &u_name) else {
                continue;
            };
            let back = substitute(&antiderivative, &u_name, &inner);
            return Some(simplify(Expr::Mul(multiplier.boxed(), back.boxed())));
        }
    }
    None
}

/// Ways to read `factor` as `outer(inner)`, with `outer` written in `u`.
fn candidates(factor: &Expr, var: &str, u: &str) -> Vec<(Expr, Expr)> {
    let u_var = || Expr::var(u).boxed();
    let mut out = Vec::new();
    let composed = match factor {
        Expr::Sin(arg) => Some((arg, Expr::Sin(u_var()))),
        Expr::Cos(arg) => Some((arg, Expr::Cos(u_var()))),
        Expr::Tan(arg) => Some((arg, Expr::Tan(u_var()))),
        Expr::Asin(arg) => Some((arg, Expr::Asin(u_var()))),
        Expr::Acos(arg) => Some((arg, Expr::Acos(u_var()))),
        Expr::Atan(arg) => Some((arg, Expr::Atan(u_var()))),
        Expr::Exp(arg) => Some((arg, Expr::Exp(u_var()))),
        Expr::Log(arg) => Some((arg, Expr::Log(u_var()))),
        Expr::Pow(base, exp) if matches!(**exp, Expr::Constant(_)) => {
            Some((base, Expr::Pow(u_var(), exp.clone())))
        }
        Expr::Pow(base, exp) if !base.contains_var(var) => Some((exp, Expr::Pow(base.clone(), u_var()))),
        _ => None,
    };
    if let Some((inner, outer)) = composed {
        if inner.contains_var(var) && !matches!(&**inner, Expr::Variable(_)) {
            out.push(((**inner).clone(), outer));
        }
    }
    // the factor itself as u, for products like sin(x) cos(x)
    if !matches!(factor, Expr::Variable(_)) && !polynomial::is_polynomial(factor, var) {
        out.push((factor.clone(), Expr::var(u)));
    }
    out
}

/// `rest / target` when it does not depend on `var`.
fn constant_ratio(rest: &Expr, target: &Expr, var: &str) -> Option<Expr> {
    if let (Some(p), Some(q)) = (Poly::from_expr(rest, var), Poly::from_expr(target, var)) {
        if q.is_zero() || p.degree() != q.degree() {
            return None;
        }
        let k = p.leading_coeff() / q.leading_coeff();
        return (p == q.scale(&k)).then(|| Expr::Constant(k));
    }
    let rest = simplify_fully(rest.clone());
    if rest == *target {
        return Some(Expr::Constant(Rational::one()));
    }
    let ratio = simplify_fully(Expr::Div(rest.boxed(), target.clone().boxed()));
    (!ratio.contains_var(var)).then_some(ratio)
}

/// Rewrite `p1(x) g + p2(x) g + ...` as `(p1 + p2 + ...) g` when every term shares
/// the same non-polynomial part `g`.
fn gather_common_factor(expr: &Expr, var: &str) -> Option<Expr> {
    let mut terms = Vec::new();
    collect_terms(expr, false, &mut terms);
    if terms.len() < 2 {
        return None;
    }

    let mut shared: Option<Expr> = None;
    let mut coefficient = Poly::zero();
    for (negated, term) in terms {
        let (c, factors) = flatten_product(&term);
        let (algebraic, others): (Vec<Expr>, Vec<Expr>) = factors
            .into_iter()
            .partition(|f| polynomial::is_polynomial(f, var));
        let poly = algebraic
            .iter()
            .try_fold(Poly::from_constant(c), |acc, f| Some(acc * Poly::from_expr(f, var)?))?;
        let rest = rebuild_product(Rational::one(), others);
        match &shared {
            Some(g) if *g != rest => return None,
            Some(_) => {}
            None => shared = Some(rest),
        }
        coefficient = if negated { coefficient - poly } else { coefficient + poly };
    }

    let shared = shared.filter(|g| g.contains_var(var))?;
    if coefficient.is_zero() {
        return Some(Expr::Constant(Rational::zero()));
    }
    Some(Expr::Mul(coefficient.to_expr(var).boxed(), shared.boxed()))
}

fn collect_terms(expr: &Expr, negated: bool, out: &mut Vec<(bool, Expr)>) {
    match expr {
        Expr::Add(a, b) => {
            collect_terms(a, negated, out);
            collect_terms(b, negated, out);
        }
        Expr::Sub(a, b) => {
            collect_terms(a, negated, out);
            collect_terms(b, !negated, out);
        }
        Expr::Neg(inner) => collect_terms(inner, !negated, out),
        other => out.push((negated, other.clone())),
    }
}

fn fresh_var_name(expr: &Expr) -> String {
    let taken = expr.free_variables();
    ["u", "v", "w", "t"]
        .into_iter()
        .map(str::to_string)
        .chain((1..).map(|i| format!("u{i}")))
        .find(|name| !taken.contains(name))
        .unwrap_or_else(|| "u".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    #[test]
    fn sums_sharing_a_factor_are_gathered() {
        let expr = parse_expr("2*x*exp(x^2+x) + exp(x^2+x)").unwrap();
        let gathered = gather_common_factor(&expr, "x").unwrap();
        let (_, factors) = flatten_product(&gathered);
        assert_eq!(factors.len(), 2);
        assert!(factors.contains(&parse_expr("exp(x^2+x)").unwrap()));
        assert!(gather_common_factor(&parse_expr("x*exp(x) + sin(x)").unwrap(), "x").is_none());
    }

    #[test]
    fn polynomial_ratio_is_exact() {
        let rest = parse_expr("x").unwrap();
        let target = parse_expr("2x").unwrap();
        assert_eq!(
            constant_ratio(&rest, &target, "x"),
            Some(Expr::Constant(Rational::new(1.into(), 2.into())))
        );
        assert_eq!(constant_ratio(&Expr::integer(1), &target, "x"), None);
    }

    #[test]
    fn fresh_name_avoids_free_variables() {
        let uses_u = Expr::Mul(Expr::var("u").boxed(), Expr::var("x").boxed());
        assert_eq!(fresh_var_name(&uses_u), "v");
        assert_eq!(fresh_var_name(&parse_expr("x").unwrap()), "u");
    }
}
