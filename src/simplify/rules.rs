use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

use crate::expr::{Expr, Rational, one, zero};
use num_bigint::BigInt;
use num_integer::Roots;
use num_traits::{One, Signed, ToPrimitive, Zero};

const DISTRIBUTE_TERM_LIMIT: usize = 64;
const EXPAND_POWER_LIMIT: u32 = 4;
const SIMPLIFY_ITERATIONS: usize = 64;
const RADICAL_EXTRACTION_LIMIT: u64 = 1_000_000_000_000;

#[derive(Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
struct CanonKey(Vec<Expr>);

pub fn simplify(expr: Expr) -> Expr {
    let mut cache = HashMap::new();
    simplify_cached(expr, &mut cache)
}

fn simplify_cached(expr: Expr, cache: &mut HashMap<Expr, Expr>) -> Expr {
    if let Some(hit) = cache.get(&expr) {
        return hit.clone();
    }

    let key = expr.clone();
    let result = match expr {
        Expr::Add(a, b) => simplify_add(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Sub(a, b) => simplify_sub(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Mul(a, b) => simplify_mul(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Div(a, b) => simplify_div(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Pow(a, b) => simplify_pow(simplify_cached(*a, cache), simplify_cached(*b, cache)),
        Expr::Neg(a) => simplify_neg(simplify_cached(*a, cache)),

        Expr::Sin(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Sin(inner)),
            x => pi_multiple(&x)
                .and_then(|k| exact_sin(&k))
                .unwrap_or_else(|| Expr::Sin(x.boxed())),
        },

        Expr::Cos(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => one(),
            Expr::Neg(inner) => Expr::Cos(inner),
            x => pi_multiple(&x)
                .and_then(|k| exact_sin(&(k + Rational::new(1.into(), 2.into()))))
                .unwrap_or_else(|| Expr::Cos(x.boxed())),
        },

        Expr::Tan(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Tan(inner)),
            x => pi_multiple(&x)
                .and_then(|k| exact_tan(&k))
                .unwrap_or_else(|| Expr::Tan(x.boxed())),
        },

        Expr::Asin(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Asin(inner)),
            Expr::Constant(c) if c.is_one() => pi_times(Rational::new(1.into(), 2.into())),
            Expr::Constant(c) if c == -Rational::one() => {
                pi_times(Rational::new((-1).into(), 2.into()))
            }
            x => Expr::Asin(x.boxed()),
        },

        Expr::Acos(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => pi_times(Rational::new(1.into(), 2.into())),
            Expr::Constant(c) if c.is_one() => zero(),
            Expr::Constant(c) if c == -Rational::one() => Expr::Pi,
            x => Expr::Acos(x.boxed()),
        },

        Expr::Atan(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => zero(),
            Expr::Neg(inner) => simplify_neg(Expr::Atan(inner)),
            Expr::Constant(c) if c.is_one() => pi_times(Rational::new(1.into(), 4.into())),
            Expr::Constant(c) if c == -Rational::one() => {
                pi_times(Rational::new((-1).into(), 4.into()))
            }
            x => Expr::Atan(x.boxed()),
        },

        Expr::Exp(a) => match simplify_cached(*a, cache) {
            x if is_zero(&x) => one(),
            Expr::Log(inner) => *inner,
            x => Expr::Exp(x.boxed()),
        },

        Expr::Log(a) => match simplify_cached(*a, cache) {
            x if is_one(&x) => zero(),
            Expr::Exp(inner) => *inner,
            x => Expr::Log(x.boxed()),
        },

        e => e,
    };

    cache.insert(key, result.clone());
    result
}

/// Apply simplification passes until the expression stops changing or we hit the iteration cap.
pub fn simplify_fully(expr: Expr) -> Expr {
    simplify_with_limit(expr, SIMPLIFY_ITERATIONS)
}

/// Apply simplification passes up to `max_iters`, returning the last value if convergence is not reached.
pub fn simplify_with_limit(expr: Expr, max_iters: usize) -> Expr {
    let mut cache = HashMap::new();
    let mut current = expr;
    for _ in 0..max_iters {
        let next = simplify_cached(current.clone(), &mut cache);
        if next == current {
            return current;
        }
        current = next;
    }
    current
}

pub fn simplify_add(x: Expr, y: Expr) -> Expr {
    rebuild_sum(collect_sum(flatten_sum(&x).into_iter().chain(flatten_sum(&y))))
}

pub fn simplify_sub(x: Expr, y: Expr) -> Expr {
    simplify_add(x, simplify_neg(y))
}

fn flatten_sum(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Add(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b));
            out
        }
        Expr::Sub(a, b) => {
            let mut out = flatten_sum(a);
            out.extend(flatten_sum(b).into_iter().map(simplify_neg));
            out
        }
        Expr::Neg(a) => flatten_sum(a).into_iter().map(simplify_neg).collect(),
        other => vec![other.clone()],
    }
}

fn count_sum_terms(expr: &Expr) -> usize {
    match expr {
        Expr::Add(a, b) | Expr::Sub(a, b) => count_sum_terms(a) + count_sum_terms(b),
        Expr::Neg(inner) => count_sum_terms(inner),
        _ => 1,
    }
}

fn split_coeff(expr: &Expr) -> (Rational, Expr) {
    match expr {
        Expr::Constant(c) => (c.clone(), one()),
        Expr::Neg(e) => {
            let (c, b) = split_coeff(e);
            (-c, b)
        }
        Expr::Mul(a, b) => {
            let (ca, ba) = split_coeff(a);
            let (cb, bb) = split_coeff(b);
            let (cm, core) = combine_factors(factors(&ba).into_iter().chain(factors(&bb)));
            (ca * cb * cm, core)
        }
        Expr::Div(a, b) => {
            let (ca, ba) = split_coeff(a);
            let (cb, bb) = split_coeff(b);
            if cb.is_zero() {
                return (Rational::one(), expr.clone());
            }
            let (cm, core) = combine_factors(
                factors(&ba)
                    .into_iter()
                    .chain(factors(&bb).into_iter().map(invert)),
            );
            (ca / cb * cm, core)
        }
        other => (Rational::one(), other.clone()),
    }
}

/// Merge factors sharing a base by adding their constant exponents.
fn combine_factors<I>(items: I) -> (Rational, Expr)
where
    I: IntoIterator<Item = Expr>,
{
    let mut grouped: BTreeMap<Expr, Rational> = BTreeMap::new();
    for item in items {
        let (base, exp) = match item {
            Expr::Pow(base, exp) => match *exp {
                Expr::Constant(e) => (*base, e),
                other => (Expr::Pow(base, other.boxed()), Rational::one()),
            },
            other => (other, Rational::one()),
        };
        grouped
            .entry(base)
            .and_modify(|acc| *acc += &exp)
            .or_insert(exp);
    }

    let mut coeff = Rational::one();
    let mut out = Vec::new();
    for (base, exp) in grouped {
        if exp.is_zero() {
            continue;
        }
        let merged = simplify_pow(base, Expr::Constant(exp));
        let (c, core) = split_power_coeff(merged);
        coeff *= c;
        out.extend(factors(&core));
    }
    (coeff, mk_product(out))
}

fn split_power_coeff(expr: Expr) -> (Rational, Expr) {
    match expr {
        Expr::Constant(c) => (c, one()),
        Expr::Mul(a, b) => match *a {
            Expr::Constant(c) => (c, *b),
            other => (Rational::one(), Expr::Mul(other.boxed(), b)),
        },
        other => (Rational::one(), other),
    }
}

/// Multiplicative factors, with divisors turned into negative powers.
fn factors(expr: &Expr) -> Vec<Expr> {
    match expr {
        Expr::Mul(a, b) => {
            let mut out = factors(a);
            out.extend(factors(b));
            out
        }
        Expr::Div(a, b) => {
            let mut out = factors(a);
            out.extend(factors(b).into_iter().map(invert));
            out
        }
        t if is_one(t) => vec![],
        t => vec![t.clone()],
    }
}

fn invert(factor: Expr) -> Expr {
    match factor {
        Expr::Pow(base, exp) => match *exp {
            Expr::Constant(e) => Expr::Pow(base, Expr::Constant(-e).boxed()),
            other => Expr::Pow(
                Expr::Pow(base, other.boxed()).boxed(),
                Expr::Constant(-Rational::one()).boxed(),
            ),
        },
        other => Expr::Pow(other.boxed(), Expr::Constant(-Rational::one()).boxed()),
    }
}

/// Rebuild a factor list, moving negative powers under a single division.
fn mk_product(items: Vec<Expr>) -> Expr {
    let mut numer = Vec::new();
    let mut denom = Vec::new();
    for factor in items {
        match factor {
            Expr::Pow(base, exp) => match *exp {
                Expr::Constant(e) if e.is_negative() => {
                    denom.push(simplify_pow(*base, Expr::Constant(-e)))
                }
                other => numer.push(Expr::Pow(base, other.boxed())),
            },
            other => numer.push(other),
        }
    }
    if denom.is_empty() {
        mk_mul_list(numer)
    } else {
        Expr::Div(mk_mul_list(numer).boxed(), mk_mul_list(denom).boxed())
    }
}

fn collect_sum<I>(terms: I) -> HashMap<CanonKey, Rational>
where
    I: IntoIterator<Item = Expr>,
{
    let mut map = HashMap::new();
    for term in terms {
        let (c, b) = split_coeff(&term);
        if c.is_zero() {
            continue;
        }
        let mut key = factors(&b);
        key.sort();
        map.entry(CanonKey(key))
            .and_modify(|acc| *acc += &c)
            .or_insert(c);
    }
    map
}

/// Total power of bare variables in a product, used to order sums highest degree first.
fn term_degree(factors: &[Expr]) -> Rational {
    factors
        .iter()
        .map(|f| match f {
            Expr::Variable(_) => Rational::one(),
            Expr::Pow(base, exp) => match (&**base, &**exp) {
                (Expr::Variable(_), Expr::Constant(e)) => e.clone(),
                _ => Rational::zero(),
            },
            _ => Rational::zero(),
        })
        .fold(Rational::zero(), |acc, d| acc + d)
}

fn rebuild_sum(map: HashMap<CanonKey, Rational>) -> Expr {
    let mut map = map;
    let const_term = map
        .remove(&CanonKey(Vec::new()))
        .unwrap_or_else(Rational::zero);
    let mut items: Vec<(CanonKey, Rational)> = map.into_iter().collect();
    items.sort_by_key(|(key, _)| (Reverse(term_degree(&key.0)), key.clone()));

    let mut terms: Vec<Expr> = items
        .into_iter()
        .filter_map(|(CanonKey(factors), coef)| {
            if coef.is_zero() {
                None
            } else {
                Some(term_from(&coef, mk_product(factors)))
            }
        })
        .collect();

    if !const_term.is_zero() {
        terms.push(Expr::Constant(const_term));
    }

    match terms.len() {
        0 => zero(),
        1 => terms.remove(0),
        _ => mk_add_list(terms),
    }
}

fn term_from(coef: &Rational, base: Expr) -> Expr {
    if coef.is_zero() {
        return zero();
    }

    if is_one(&base) {
        return Expr::Constant(coef.clone());
    }

    if coef.is_one() {
        return base;
    }

    if coef == &-Rational::one() {
        return simplify_neg(base);
    }

    Expr::Mul(Expr::Constant(coef.clone()).boxed(), base.boxed())
}

pub fn simplify_mul(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Add(a, b), t) => {
            let term_count = (count_sum_terms(&a) + count_sum_terms(&b)) * count_sum_terms(&t);
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_add(simplify_mul(*a, t.clone()), simplify_mul(*b, t))
            } else {
                Expr::Mul(Expr::Add(a, b).boxed(), t.boxed())
            }
        }
        (Expr::Sub(a, b), t) => {
            let term_count = (count_sum_terms(&a) + count_sum_terms(&b)) * count_sum_terms(&t);
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_sub(simplify_mul(*a, t.clone()), simplify_mul(*b, t))
            } else {
                Expr::Mul(Expr::Sub(a, b).boxed(), t.boxed())
            }
        }
        (t, Expr::Add(a, b)) => {
            let term_count = count_sum_terms(&t) * (count_sum_terms(&a) + count_sum_terms(&b));
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_add(simplify_mul(t.clone(), *a), simplify_mul(t, *b))
            } else {
                Expr::Mul(t.boxed(), Expr::Add(a, b).boxed())
            }
        }
        (t, Expr::Sub(a, b)) => {
            let term_count = count_sum_terms(&t) * (count_sum_terms(&a) + count_sum_terms(&b));
            if term_count <= DISTRIBUTE_TERM_LIMIT {
                simplify_sub(simplify_mul(t.clone(), *a), simplify_mul(t, *b))
            } else {
                Expr::Mul(t.boxed(), Expr::Sub(a, b).boxed())
            }
        }
        (Expr::Constant(xc), Expr::Constant(yc)) => Expr::Constant(xc * yc),
        (x, y) if is_zero(&x) || is_zero(&y) => zero(),
        (x, y) if is_one(&x) => y,
        (x, y) if is_one(&y) => x,
        (x, y) => {
            let (c, b) = split_coeff(&Expr::Mul(x.boxed(), y.boxed()));
            term_from(&c, b)
        }
    }
}

pub fn simplify_div(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (Expr::Constant(n), Expr::Constant(d)) => {
            if d.is_zero() {
                Expr::Div(Expr::Constant(n).boxed(), Expr::Constant(d).boxed())
            } else {
                Expr::Constant(n / d)
            }
        }
        (x, _) if is_zero(&x) => zero(),
        (x, y) if is_one(&y) => x,
        (x, y) => {
            let (cx, bx) = split_coeff(&x);
            let (cy, by) = split_coeff(&y);
            if cy.is_zero() {
                return Expr::Div(x.boxed(), y.boxed());
            }
            let (cm, core) = combine_factors(
                factors(&bx)
                    .into_iter()
                    .chain(factors(&by).into_iter().map(invert)),
            );
            term_from(&(cx / cy * cm), core)
        }
    }
}

pub fn simplify_pow(x: Expr, y: Expr) -> Expr {
    match (x, y) {
        (_, Expr::Constant(e)) if e.is_zero() => one(),
        (base, Expr::Constant(e)) if e.is_one() => base,
        (Expr::Constant(b), Expr::Constant(e)) => constant_pow(b, e),
        (Expr::Pow(inner, inner_exp), Expr::Constant(e)) if e.is_integer() => {
            match *inner_exp {
                Expr::Constant(k) => simplify_pow(*inner, Expr::Constant(k * e)),
                other => Expr::Pow(Expr::Pow(inner, other.boxed()).boxed(), Expr::Constant(e).boxed()),
            }
        }
        (Expr::Exp(a), y) => Expr::Exp(simplify_mul(*a, y).boxed()),
        (base @ (Expr::Mul(_, _) | Expr::Div(_, _)), Expr::Constant(e)) if e.is_integer() => {
            let (c, core) = split_coeff(&base);
            let powered: Vec<Expr> = factors(&core)
                .into_iter()
                .map(|f| simplify_pow(f, Expr::Constant(e.clone())))
                .collect();
            let scale = constant_pow(c, e);
            powered.into_iter().fold(scale, simplify_mul)
        }
        (base @ (Expr::Add(_, _) | Expr::Sub(_, _)), Expr::Constant(e))
            if e.is_integer() && e.is_positive() && e.to_integer() <= BigInt::from(EXPAND_POWER_LIMIT) =>
        {
            let n = e.to_integer().to_u32().unwrap_or(1);
            (1..n).fold(base.clone(), |acc, _| simplify_mul(acc, base.clone()))
        }
        (x, y) => Expr::Pow(x.boxed(), y.boxed()),
    }
}

fn constant_pow(b: Rational, e: Rational) -> Expr {
    if e.is_integer() {
        let k: BigInt = e.to_integer();
        if let Some(power) = k.abs().to_u32() {
            if k >= BigInt::zero() {
                let num = b.numer().pow(power);
                let den = b.denom().pow(power);
                return Expr::Constant(Rational::new(num, den));
            } else if b.is_zero() {
                return Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed());
            } else {
                let num = b.denom().pow(power);
                let den = b.numer().pow(power);
                return Expr::Constant(Rational::new(num, den));
            }
        }
        return Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed());
    }

    if b.is_zero() && e.is_positive() {
        return zero();
    }
    if b.is_positive() {
        if let Some(expr) = rational_radical(&b, &e) {
            return expr;
        }
    }
    Expr::Pow(Expr::Constant(b).boxed(), Expr::Constant(e).boxed())
}

/// `b^(p/q)` for positive `b`, pulling perfect `q`-th powers out of the radical.
fn rational_radical(b: &Rational, e: &Rational) -> Option<Expr> {
    let q = e.denom().to_u32()?;
    let p = e.numer().clone();
    let whole = p.div_floor_big(q);
    let rem = (p - &whole * BigInt::from(q)).to_u32()?;

    // b^(rem/q) = (n*d^(q-1))^(1/q) / d
    let n = b.numer().to_u64()?;
    let d = b.denom().to_u64()?;
    let radicand = (n as u128).checked_mul((d as u128).checked_pow(q - 1)?)?;
    let radicand = u64::try_from(radicand).ok()?;
    if radicand > RADICAL_EXTRACTION_LIMIT {
        return None;
    }
    let radicand = radicand.checked_pow(rem)?;
    let (outside, inside) = extract_power(radicand, q);

    let whole_part = match constant_pow(b.clone(), Rational::from_integer(whole)) {
        Expr::Constant(c) => c,
        _ => return None,
    };
    let coeff = whole_part * Rational::new(BigInt::from(outside), BigInt::from(d));
    if inside == 1 {
        return Some(Expr::Constant(coeff));
    }
    let radical = Expr::Pow(
        Expr::integer(inside).boxed(),
        Expr::Constant(Rational::new(1.into(), BigInt::from(q))).boxed(),
    );
    Some(term_from(&coeff, radical))
}

fn extract_power(mut value: u64, q: u32) -> (u64, u64) {
    let mut outside = 1u64;
    let mut k = value.nth_root(q);
    while k > 1 {
        let Some(kq) = k.checked_pow(q) else {
            k -= 1;
            continue;
        };
        if value % kq == 0 {
            outside *= k;
            value /= kq;
            k = value.nth_root(q);
        } else {
            k -= 1;
        }
    }
    (outside, value)
}

trait DivFloorBig {
    fn div_floor_big(&self, q: u32) -> BigInt;
}

impl DivFloorBig for BigInt {
    fn div_floor_big(&self, q: u32) -> BigInt {
        num_integer::Integer::div_floor(self, &BigInt::from(q))
    }
}

pub fn simplify_neg(expr: Expr) -> Expr {
    match expr {
        Expr::Constant(x) => Expr::Constant(-x),
        Expr::Neg(x) => *x,
        Expr::Mul(a, b) => match *a {
            Expr::Constant(c) => term_from(&-c, *b),
            other => Expr::Neg(Expr::Mul(other.boxed(), b).boxed()),
        },
        other => Expr::Neg(other.boxed()),
    }
}

/// Recognize `k*pi` and return `k`.
pub(crate) fn pi_multiple(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Pi => Some(Rational::one()),
        Expr::Neg(inner) => pi_multiple(inner).map(|k| -k),
        Expr::Mul(a, b) => match (&**a, &**b) {
            (Expr::Constant(c), other) | (other, Expr::Constant(c)) => {
                pi_multiple(other).map(|k| k * c)
            }
            _ => None,
        },
        Expr::Div(a, b) => match &**b {
            Expr::Constant(c) if !c.is_zero() => pi_multiple(a).map(|k| k / c),
            _ => None,
        },
        _ => None,
    }
}

fn pi_times(k: Rational) -> Expr {
    term_from(&k, Expr::Pi)
}

/// `sin(k*pi)` when the value is rational.
fn exact_sin(k: &Rational) -> Option<Expr> {
    let sixths = k * Rational::from_integer(6.into());
    if !sixths.is_integer() {
        return None;
    }
    let step = sixths.to_integer().mod_floor_i64(12)?;
    let (num, den) = match step {
        0 | 6 => (0, 1),
        1 | 5 => (1, 2),
        3 => (1, 1),
        7 | 11 => (-1, 2),
        9 => (-1, 1),
        _ => return None,
    };
    Some(Expr::constant(num, den))
}

/// `tan(k*pi)` when the value is rational and defined.
fn exact_tan(k: &Rational) -> Option<Expr> {
    let quarters = k * Rational::from_integer(4.into());
    if !quarters.is_integer() {
        return None;
    }
    match quarters.to_integer().mod_floor_i64(4)? {
        0 => Some(zero()),
        1 => Some(one()),
        3 => Some(Expr::integer(-1)),
        _ => None,
    }
}

trait ModFloorI64 {
    fn mod_floor_i64(&self, m: i64) -> Option<i64>;
}

impl ModFloorI64 for BigInt {
    fn mod_floor_i64(&self, m: i64) -> Option<i64> {
        num_integer::Integer::mod_floor(self, &BigInt::from(m)).to_i64()
    }
}

fn is_zero(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_zero())
}

fn is_one(expr: &Expr) -> bool {
    matches!(expr, Expr::Constant(r) if r.is_one())
}

fn mk_add_list(items: Vec<Expr>) -> Expr {
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return zero();
    };
    iter.fold(first, |acc, item| Expr::Add(acc.boxed(), item.boxed()))
}

fn mk_mul_list(mut items: Vec<Expr>) -> Expr {
    items.retain(|e| !is_one(e));
    items.sort();
    let mut iter = items.into_iter();
    let Some(first) = iter.next() else {
        return one();
    };
    iter.fold(first, |acc, item| Expr::Mul(acc.boxed(), item.boxed()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_square_factors() {
        assert_eq!(extract_power(8, 2), (2, 2));
        assert_eq!(extract_power(72, 2), (6, 2));
        assert_eq!(extract_power(7, 2), (1, 7));
        assert_eq!(extract_power(54, 3), (3, 2));
    }

    #[test]
    fn radicals_of_perfect_powers_are_exact() {
        let four = Rational::from_integer(4.into());
        let half = Rational::new(1.into(), 2.into());
        assert_eq!(constant_pow(four, half), Expr::integer(2));
    }

    #[test]
    fn zero_to_a_positive_fraction_is_zero() {
        let third = Rational::new(1.into(), 3.into());
        assert_eq!(constant_pow(Rational::zero(), third.clone()), zero());
        assert!(matches!(constant_pow(Rational::zero(), -third), Expr::Pow(_, _)));
    }

    #[test]
    fn sine_table_covers_sixths() {
        assert_eq!(exact_sin(&Rational::new(1.into(), 6.into())), Some(Expr::constant(1, 2)));
        assert_eq!(exact_sin(&Rational::new(3.into(), 2.into())), Some(Expr::integer(-1)));
        assert_eq!(exact_sin(&Rational::new(1.into(), 3.into())), None);
    }

    #[test]
    fn pi_multiples_are_recognized() {
        let expr = Expr::Mul(Expr::constant(3, 2).boxed(), Expr::Pi.boxed());
        assert_eq!(pi_multiple(&expr), Some(Rational::new(3.into(), 2.into())));
    }
}
