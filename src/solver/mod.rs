//! Real zeros of single-variable expressions.
//!
//! Polynomials and rational functions go through exact root isolation. Otherwise the
//! one term that mentions the variable is peeled back through the inverse of each
//! operation (`exp`↔`ln`, powers↔roots, trig↔inverse trig plus whole turns). When
//! neither applies, sign changes on a fixed window are refined by bisection.
//!
//! Zeros of an expression with a trig function of the variable repeat without end,
//! so those are reported for the variable in one turn, `[0, 2π)`.

use crate::error::{CasError, Result};
use crate::eval::{eval_at, eval_constant};
use crate::expr::{Expr, Rational, one};
use crate::polynomial::{Poly, Root};
use crate::simplify::simplify_fully;
use num_integer::Integer;
use num_traits::{One, Signed, Zero};
use std::f64::consts::TAU;

const SCAN_MIN: f64 = -50.0;
const SCAN_MAX: f64 = 50.0;
const SCAN_STEPS: usize = 4000;
const BISECTION_STEPS: usize = 200;
const RESIDUAL_TOLERANCE: f64 = 1e-7;
const DUPLICATE_TOLERANCE: f64 = 1e-9;
/// Whole periods added either side of a principal inverse-trig value.
const PERIOD_TURNS: i64 = 6;

/// A real solution: exact when a closed form was found, always with a decimal value.
#[derive(Clone, Debug, PartialEq)]
pub struct Solution {
    pub exact: Option<Expr>,
    pub approx: f64,
}

impl Solution {
    fn from_closed_form(expr: Expr) -> Option<Self> {
        let expr = simplify_fully(expr);
        let approx = eval_constant(&expr)?;
        Some(Solution {
            exact: Some(expr),
            approx,
        })
    }
}

impl From<Root> for Solution {
    fn from(root: Root) -> Self {
        Solution {
            exact: root.to_expr(),
            approx: root.approx(),
        }
    }
}

/// Real `x` with `expr(x) = 0`, ascending.
///
/// An expression that vanishes identically has every real as a solution and is
/// reported as [`CasError::Unsupported`].
pub fn solve_zeros(expr: &Expr, var: &str) -> Result<Vec<Solution>> {
    let expr = simplify_fully(expr.clone());
    if !expr.contains_var(var) {
        if expr.is_zero() {
            return Err(CasError::Unsupported(format!(
                "equation holds for every value of {var}"
            )));
        }
        return Ok(Vec::new());
    }

    let candidates = if let Some(poly) = Poly::from_expr(&expr, var) {
        poly.real_roots().into_iter().map(Solution::from).collect()
    } else if let Some(roots) = rational_function_zeros(&expr, var) {
        roots
    } else if let Some(roots) = isolate(&expr, var) {
        roots
    } else {
        log::debug!("no closed form for zeros of {expr}; scanning numerically");
        let (lo, hi) = if is_periodic(&expr, var) { (0.0, TAU) } else { (SCAN_MIN, SCAN_MAX) };
        scan_numeric(&expr, var, lo, hi)
    };

    Ok(finish(&expr, var, candidates))
}

/// Drop candidates outside the domain of `expr`, then sort and dedupe.
fn finish(expr: &Expr, var: &str, candidates: Vec<Solution>) -> Vec<Solution> {
    let periodic = is_periodic(expr, var);
    let mut out: Vec<Solution> = candidates
        .into_iter()
        .filter(|s| !periodic || (-DUPLICATE_TOLERANCE..TAU - DUPLICATE_TOLERANCE).contains(&s.approx))
        .filter(|s| {
            eval_at(expr, var, s.approx)
                .is_some_and(|v| v.abs() <= RESIDUAL_TOLERANCE * (1.0 + s.approx.abs()))
        })
        .collect();
    out.sort_by(|a, b| a.approx.total_cmp(&b.approx));
    out.dedup_by(|a, b| (a.approx - b.approx).abs() < DUPLICATE_TOLERANCE);
    out
}

/// Whether `var` appears inside `sin`, `cos` or `tan`.
fn is_periodic(expr: &Expr, var: &str) -> bool {
    match expr {
        Expr::Sin(inner) | Expr::Cos(inner) | Expr::Tan(inner) if inner.contains_var(var) => true,
        _ => match (expr.unary_arg(), expr.binary_args()) {
            (Some(inner), _) => is_periodic(inner, var),
            (_, Some((a, b))) => is_periodic(a, var) || is_periodic(b, var),
            _ => false,
        },
    }
}

/// Numerator and denominator of a simplified quotient.
pub(crate) fn as_fraction(expr: &Expr) -> (Expr, Expr) {
    match expr {
        Expr::Div(num, den) => ((**num).clone(), (**den).clone()),
        Expr::Mul(a, b) => match &**b {
            Expr::Div(num, den) => (
                Expr::Mul(a.clone(), num.clone()),
                (**den).clone(),
            ),
            _ => (expr.clone(), one()),
        },
        Expr::Neg(inner) => {
            let (num, den) = as_fraction(inner);
            (Expr::Neg(num.boxed()), den)
        }
        other => (other.clone(), one()),
    }
}

fn rational_function_zeros(expr: &Expr, var: &str) -> Option<Vec<Solution>> {
    let (num, den) = as_fraction(expr);
    let numer = Poly::from_expr(&num, var)?;
    let denom = Poly::from_expr(&den, var)?;
    if denom.is_constant() {
        return None;
    }
    Some(
        numer
            .real_roots()
            .into_iter()
            .filter(|root| match root {
                Root::Rational(r) => !denom.evaluate(r).is_zero(),
                other => denom.evaluate_f64(other.approx()).abs() > RESIDUAL_TOLERANCE,
            })
            .map(Solution::from)
            .collect(),
    )
}

/// Solve `expr = 0` when the variable sits in a single additive term.
fn isolate(expr: &Expr, var: &str) -> Option<Vec<Solution>> {
    let mut terms = Vec::new();
    collect_terms(expr, false, &mut terms);
    let (with_var, constant): (Vec<_>, Vec<_>) =
        terms.into_iter().partition(|(_, t)| t.contains_var(var));
    let [(negated, target)] = with_var.as_slice() else {
        return None;
    };

    let rest = constant
        .into_iter()
        .map(|(neg, t)| if neg { Expr::Neg(t.boxed()) } else { t })
        .fold(Expr::Constant(Rational::zero()), |acc, t| {
            Expr::Add(acc.boxed(), t.boxed())
        });
    // target = -rest, or rest when the term itself was subtracted
    let rhs = if *negated {
        rest
    } else {
        Expr::Neg(rest.boxed())
    };

    let values = peel(target, simplify_fully(rhs), var)?;
    Some(values.into_iter().filter_map(Solution::from_closed_form).collect())
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

/// Invert `lhs = rhs` step by step until the bare variable remains.
fn peel(lhs: &Expr, rhs: Expr, var: &str) -> Option<Vec<Expr>> {
    let value = eval_constant(&rhs)?;

    match lhs {
        Expr::Variable(v) if v == var => Some(vec![rhs]),
        Expr::Neg(inner) => descend(inner, Expr::Neg(rhs.boxed()), var),
        Expr::Mul(a, b) if !a.contains_var(var) => descend(b, Expr::Div(rhs.boxed(), a.clone()), var),
        Expr::Mul(a, b) if !b.contains_var(var) => descend(a, Expr::Div(rhs.boxed(), b.clone()), var),
        Expr::Div(a, b) if !b.contains_var(var) => descend(a, Expr::Mul(rhs.boxed(), b.clone()), var),
        Expr::Div(a, b) if !a.contains_var(var) => {
            if value == 0.0 {
                return Some(Vec::new());
            }
            descend(b, Expr::Div(a.clone(), rhs.boxed()), var)
        }
        Expr::Add(_, _) | Expr::Sub(_, _) => {
            // a nested sum: move its constant terms across
            let shifted = Expr::Sub(lhs.clone().boxed(), rhs.boxed());
            let roots = isolate(&simplify_fully(shifted), var)?;
            roots.into_iter().map(|s| s.exact).collect()
        }
        Expr::Exp(inner) => {
            if value <= 0.0 {
                return Some(Vec::new());
            }
            descend(inner, Expr::Log(rhs.boxed()), var)
        }
        Expr::Log(inner) => descend(inner, Expr::Exp(rhs.boxed()), var),
        Expr::Pow(base, exp) if !base.contains_var(var) => {
            if value <= 0.0 {
                return Some(Vec::new());
            }
            descend(
                exp,
                Expr::Div(Expr::Log(rhs.boxed()).boxed(), Expr::Log(base.clone()).boxed()),
                var,
            )
        }
        Expr::Pow(base, exp) => {
            let n = exp.as_constant()?.clone();
            invert_power(&n, rhs, value)
                .into_iter()
                .map(|branch| descend(base, branch, var))
                .collect::<Option<Vec<_>>>()
                .map(|v| v.into_iter().flatten().collect())
        }
        Expr::Sin(inner) => {
            if value.abs() > 1.0 {
                return Some(Vec::new());
            }
            let principal = Expr::Asin(rhs.boxed());
            let mirror = Expr::Sub(Expr::Pi.boxed(), principal.clone().boxed());
            let full_turn = || Expr::Mul(Expr::integer(2).boxed(), Expr::Pi.boxed());
            let mut values = turns(principal, full_turn());
            values.extend(turns(mirror, full_turn()));
            descend_all(inner, values, var)
        }
        Expr::Cos(inner) => {
            if value.abs() > 1.0 {
                return Some(Vec::new());
            }
            let principal = Expr::Acos(rhs.boxed());
            let mirror = Expr::Neg(principal.clone().boxed());
            let full_turn = || Expr::Mul(Expr::integer(2).boxed(), Expr::Pi.boxed());
            let mut values = turns(principal, full_turn());
            values.extend(turns(mirror, full_turn()));
            descend_all(inner, values, var)
        }
        Expr::Tan(inner) => descend_all(inner, turns(Expr::Atan(rhs.boxed()), Expr::Pi), var),
        Expr::Asin(inner) => {
            if value.abs() > std::f64::consts::FRAC_PI_2 {
                return Some(Vec::new());
            }
            descend(inner, Expr::Sin(rhs.boxed()), var)
        }
        Expr::Acos(inner) => {
            if !(0.0..=std::f64::consts::PI).contains(&value) {
                return Some(Vec::new());
            }
            descend(inner, Expr::Cos(rhs.boxed()), var)
        }
        Expr::Atan(inner) => {
            if value.abs() >= std::f64::consts::FRAC_PI_2 {
                return Some(Vec::new());
            }
            descend(inner, Expr::Tan(rhs.boxed()), var)
        }
        _ => None,
    }
}

fn descend(inner: &Expr, next: Expr, var: &str) -> Option<Vec<Expr>> {
    peel(inner, simplify_fully(next), var)
}

/// Peel every value in turn, keeping the first occurrence of each solution.
fn descend_all(inner: &Expr, values: Vec<Expr>, var: &str) -> Option<Vec<Expr>> {
    let mut out = Vec::new();
    for value in values {
        for e in descend(inner, value, var)? {
            if !out.contains(&e) {
                out.push(e);
            }
        }
    }
    Some(out)
}

/// `base + k·period` for `k` in `-PERIOD_TURNS..=PERIOD_TURNS`.
fn turns(base: Expr, period: Expr) -> Vec<Expr> {
    (-PERIOD_TURNS..=PERIOD_TURNS)
        .map(|k| {
            let shift = Expr::Mul(Expr::integer(k).boxed(), period.clone().boxed());
            Expr::Add(base.clone().boxed(), shift.boxed())
        })
        .collect()
}

/// Real branches of `u^n = rhs`.
fn invert_power(n: &Rational, rhs: Expr, value: f64) -> Vec<Expr> {
    if n.is_zero() {
        return Vec::new();
    }
    let inverse = Expr::Constant(Rational::one() / n);
    let root = |r: Expr| Expr::Pow(r.boxed(), inverse.clone().boxed());
    let even_numerator = n.numer().is_even();
    let odd_denominator = n.denom().is_odd();

    if value == 0.0 {
        return if n.is_positive() { vec![Expr::Constant(Rational::zero())] } else { Vec::new() };
    }
    match (even_numerator, value > 0.0) {
        (true, true) => {
            let positive = root(rhs);
            vec![Expr::Neg(positive.clone().boxed()), positive]
        }
        (true, false) => Vec::new(),
        (false, true) => vec![root(rhs)],
        // odd power of a negative value: -(|rhs|^(1/n)), real only for odd denominators
        (false, false) if odd_denominator => vec![Expr::Neg(root(Expr::Neg(rhs.boxed())).boxed())],
        (false, false) => Vec::new(),
    }
}

fn scan_numeric(expr: &Expr, var: &str, lo: f64, hi: f64) -> Vec<Solution> {
    let step = (hi - lo) / SCAN_STEPS as f64;
    let mut roots = Vec::new();
    let mut prev: Option<(f64, f64)> = None;
    for i in 0..=SCAN_STEPS {
        let x = lo + step * i as f64;
        let Some(fx) = eval_at(expr, var, x) else {
            prev = None;
            continue;
        };
        if fx == 0.0 {
            roots.push(Solution { exact: None, approx: x });
        } else if let Some((px, pf)) = prev {
            if pf != 0.0 && pf.signum() != fx.signum() {
                if let Some(r) = bisect(expr, var, px, x) {
                    roots.push(Solution { exact: None, approx: r });
                }
            }
        }
        prev = Some((x, fx));
    }
    roots
}

fn bisect(expr: &Expr, var: &str, mut lo: f64, mut hi: f64) -> Option<f64> {
    let lo_sign = eval_at(expr, var, lo)?.signum();
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        let value = eval_at(expr, var, mid)?;
        if value == 0.0 {
            return Some(mid);
        }
        if value.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    // sign changes across a pole do not shrink the residual
    let mid = 0.5 * (lo + hi);
    let residual = eval_at(expr, var, mid)?;
    (residual.abs() <= RESIDUAL_TOLERANCE).then_some(mid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    #[test]
    fn even_powers_have_two_branches() {
        let branches = invert_power(&Rational::from_integer(2.into()), Expr::integer(9), 9.0);
        assert_eq!(branches.len(), 2);
    }

    fn approx_roots(input: &str) -> Vec<f64> {
        let expr = parse_expr(input).unwrap();
        solve_zeros(&expr, "x").unwrap().iter().map(|s| s.approx).collect()
    }

    fn assert_roots(input: &str, want: &[f64]) {
        let got = approx_roots(input);
        assert_eq!(got.len(), want.len(), "{input}: {got:?}");
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() < 1e-7, "{input}: {got:?}");
        }
    }

    #[test]
    fn periodic_zeros_cover_one_turn() {
        use std::f64::consts::{FRAC_PI_2, FRAC_PI_6, PI};
        // closed form and numeric scan agree on the window
        assert_roots("sin(x)", &[0.0, PI]);
        assert_roots("x*sin(x)", &[0.0, PI]);
        assert_roots("cos(x)", &[FRAC_PI_2, 3.0 * FRAC_PI_2]);
        assert_roots("cos(x)-1", &[0.0]);
        assert_roots("2*sin(x)+1", &[7.0 * FRAC_PI_6, 11.0 * FRAC_PI_6]);
        assert_roots("tan(x)-1", &[PI / 4.0, 5.0 * PI / 4.0]);
        assert_roots("sin(2x)", &[0.0, FRAC_PI_2, PI, 3.0 * FRAC_PI_2]);
    }

    #[test]
    fn periodic_zeros_stay_exact() {
        let expr = parse_expr("2*sin(x)-1").unwrap();
        let roots = solve_zeros(&expr, "x").unwrap();
        assert_eq!(roots.len(), 2);
        assert!(roots.iter().all(|s| s.exact.is_some()));
    }

    #[test]
    fn aperiodic_scan_keeps_the_wide_window() {
        assert!(!is_periodic(&parse_expr("exp(x)-x-2").unwrap(), "x"));
        assert!(is_periodic(&parse_expr("x*sin(x)").unwrap(), "x"));
        assert!(!is_periodic(&parse_expr("x+sin(2)").unwrap(), "x"));
        let roots = approx_roots("exp(x)-x-2");
        assert_eq!(roots.len(), 2);
        assert!(roots[0] < 0.0 && roots[1] > 0.0);
    }

    #[test]
    fn as_fraction_reads_scaled_quotients() {
        let expr = Expr::Mul(
            Expr::integer(3).boxed(),
            Expr::Div(one().boxed(), Expr::var("x").boxed()).boxed(),
        );
        let (num, den) = as_fraction(&expr);
        assert_eq!(den, Expr::var("x"));
        assert!(!num.contains_var("x"));
    }
}
