use num_traits::One;

use crate::calculus::differentiate;
use crate::expr::{Expr, Rational};
use crate::format::pretty;
use crate::simplify::{simplify, simplify_fully};

use super::{
    IBP_RECURSION_LIMIT, TRANSFORM_SIZE_LIMIT, apply_constant_factor, integrate_table, polynomial,
    rebuild_product, split_constant_factors,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
enum LiateRank {
    Log,
    InverseTrig,
    Algebraic,
    Trig,
    Exponential,
}

fn factor_rank(expr: &Expr, var: &str) -> Option<LiateRank> {
    match expr {
        Expr::Log(_) => Some(LiateRank::Log),
        Expr::Atan(_) | Expr::Asin(_) | Expr::Acos(_) => Some(LiateRank::InverseTrig),
        e if polynomial::is_polynomial(e, var) => Some(LiateRank::Algebraic),
        Expr::Sin(_) | Expr::Cos(_) | Expr::Tan(_) => Some(LiateRank::Trig),
        Expr::Exp(_) => Some(LiateRank::Exponential),
        Expr::Pow(base, _) if matches!(**base, Expr::Constant(_)) => Some(LiateRank::Exponential),
        Expr::Pow(base, _) => factor_rank(base, var),
        _ => None,
    }
}

/// `∫ u dv = u v - ∫ v du`, choosing `u` by LIATE order.
pub(super) fn integration_by_parts(expr: &Expr, var: &str) -> Option<(Expr, String)> {
    integrate_by_parts_recursive(expr, var, 0)
}

fn integrate_by_parts_recursive(expr: &Expr, var: &str, depth: usize) -> Option<(Expr, String)> {
    if depth >= IBP_RECURSION_LIMIT {
        return None;
    }

    let (const_expr, factors) = split_constant_factors(expr, var);
    let factors = combine_algebraic_factors(factors, var);
    if factors.len() < 2 {
        return None;
    }

    let mut candidates: Vec<(usize, LiateRank)> = factors
        .iter()
        .enumerate()
        .filter_map(|(i, f)| factor_rank(f, var).map(|r| (i, r)))
        .collect();
    candidates.sort_by_key(|(_, rank)| *rank);

    for (u_idx, u_kind) in candidates {
        let u = factors[u_idx].clone();
        let dv_factors: Vec<Expr> = factors
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != u_idx)
            .map(|(_, f)| f.clone())
            .collect();
        let dv_expr = rebuild_product(Rational::one(), dv_factors);
        let Some(v) = integrate_table(&dv_expr, var) else {
            continue;
        };
        let v = simplify_fully(v);
        let du = differentiate(var, &u);
        let vdu = simplify_fully(Expr::Mul(v.clone().boxed(), du.boxed()));

        let integral_vdu = integrate_table(&vdu, var).or_else(|| {
            if vdu.size() > TRANSFORM_SIZE_LIMIT {
                return None;
            }
            integrate_by_parts_recursive(&vdu, var, depth + 1).map(|(r, _)| r)
        });
        let Some(integral_vdu) = integral_vdu else {
            continue;
        };

        let uv = Expr::Mul(u.clone().boxed(), v.boxed());
        let result = simplify(Expr::Sub(uv.boxed(), integral_vdu.boxed()));
        let note = format!("u={} ({u_kind:?}), dv={}", pretty(&u), pretty(&dv_expr));
        return Some((apply_constant_factor(const_expr, result), note));
    }

    None
}

/// Multiply polynomial factors together so `x*x*e^x` is split as `x^2` and `e^x`.
fn combine_algebraic_factors(factors: Vec<Expr>, var: &str) -> Vec<Expr> {
    let (algebraic, mut others): (Vec<Expr>, Vec<Expr>) = factors
        .into_iter()
        .partition(|f| polynomial::is_polynomial(f, var));
    if let Some(combined) = algebraic
        .into_iter()
        .reduce(|a, b| Expr::Mul(a.boxed(), b.boxed()))
    {
        others.push(simplify(combined));
    }
    others
}
