//! Dense-by-power univariate polynomials over exact rationals.
//!
//! Besides ring arithmetic the module isolates real roots: rational roots come from
//! the rational root theorem, a leftover quadratic factor is solved in radicals, and
//! anything of higher degree is bracketed between the roots of its derivative and
//! refined by bisection.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use crate::expr::{Expr, Rational};
use crate::simplify::simplify_fully;
use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Signed, ToPrimitive, Zero};

const DIVISOR_SEARCH_LIMIT: u64 = 1_000_000;
const BISECTION_STEPS: usize = 200;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Poly {
    pub(crate) coeffs: BTreeMap<usize, Rational>,
}

/// A real root, exact when it is rational or a quadratic surd.
#[derive(Clone, Debug, PartialEq)]
pub enum Root {
    Rational(Rational),
    /// `center + offset * sqrt(radicand)`
    Surd {
        center: Rational,
        offset: Rational,
        radicand: Rational,
    },
    Approximate(f64),
}

impl Root {
    pub fn approx(&self) -> f64 {
        match self {
            Root::Rational(r) => rational_to_f64(r),
            Root::Surd {
                center,
                offset,
                radicand,
            } => rational_to_f64(center) + rational_to_f64(offset) * rational_to_f64(radicand).sqrt(),
            Root::Approximate(v) => *v,
        }
    }

    pub fn to_expr(&self) -> Option<Expr> {
        match self {
            Root::Rational(r) => Some(Expr::Constant(r.clone())),
            Root::Surd {
                center,
                offset,
                radicand,
            } => {
                let sqrt = Expr::Pow(
                    Expr::Constant(radicand.clone()).boxed(),
                    Expr::constant(1, 2).boxed(),
                );
                let scaled = Expr::Mul(Expr::Constant(offset.clone()).boxed(), sqrt.boxed());
                Some(simplify_fully(Expr::Add(
                    Expr::Constant(center.clone()).boxed(),
                    scaled.boxed(),
                )))
            }
            Root::Approximate(_) => None,
        }
    }
}

impl Poly {
    pub fn zero() -> Self {
        Poly {
            coeffs: BTreeMap::new(),
        }
    }

    pub fn one() -> Self {
        Poly::from_constant(Rational::one())
    }

    pub fn from_constant(c: Rational) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(0, c);
        }
        Poly { coeffs }
    }

    pub fn monomial(power: usize, c: Rational) -> Self {
        let mut coeffs = BTreeMap::new();
        if !c.is_zero() {
            coeffs.insert(power, c);
        }
        Poly { coeffs }
    }

    /// Build from coefficients listed highest power first.
    pub fn from_coefficients(coefficients: &[Rational]) -> Self {
        let degree = coefficients.len().saturating_sub(1);
        coefficients
            .iter()
            .enumerate()
            .fold(Poly::zero(), |acc, (i, c)| acc + Poly::monomial(degree - i, c.clone()))
    }

    pub fn degree(&self) -> Option<usize> {
        self.coeffs.keys().next_back().copied()
    }

    pub fn leading_coeff(&self) -> Rational {
        self.degree()
            .and_then(|d| self.coeffs.get(&d).cloned())
            .unwrap_or_else(Rational::zero)
    }

    pub fn is_zero(&self) -> bool {
        self.coeffs.is_empty()
    }

    pub fn is_constant(&self) -> bool {
        self.degree().unwrap_or(0) == 0
    }

    pub fn coeff(&self, power: usize) -> Rational {
        self.coeffs.get(&power).cloned().unwrap_or_else(Rational::zero)
    }

    pub fn pow(&self, exp: usize) -> Self {
        let mut result = Poly::one();
        let mut base = self.clone();
        let mut n = exp;
        while n > 0 {
            if n % 2 == 1 {
                result = result * base.clone();
            }
            base = base.clone() * base;
            n /= 2;
        }
        result
    }

    pub fn scale(&self, k: &Rational) -> Self {
        if k.is_zero() {
            return Poly::zero();
        }
        Poly {
            coeffs: self.coeffs.iter().map(|(e, c)| (*e, c * k)).collect(),
        }
    }

    pub fn from_expr(expr: &Expr, var: &str) -> Option<Self> {
        if !expr.contains_var(var) {
            return extract_rational(expr).map(Poly::from_constant);
        }
        match expr {
            Expr::Variable(v) if v == var => Some(Poly::monomial(1, Rational::one())),
            Expr::Add(a, b) => Some(Self::from_expr(a, var)? + Self::from_expr(b, var)?),
            Expr::Sub(a, b) => Some(Self::from_expr(a, var)? - Self::from_expr(b, var)?),
            Expr::Mul(a, b) => Some(Self::from_expr(a, var)? * Self::from_expr(b, var)?),
            Expr::Div(a, b) => {
                let denom = extract_rational(b).filter(|d| !d.is_zero())?;
                Some(Self::from_expr(a, var)?.scale(&(Rational::one() / denom)))
            }
            Expr::Neg(inner) => Some(-Self::from_expr(inner, var)?),
            Expr::Pow(base, exp) => {
                let power = extract_rational(exp)
                    .filter(|k| k.is_integer() && !k.is_negative())?
                    .to_integer()
                    .to_usize()?;
                Some(Self::from_expr(base, var)?.pow(power))
            }
            _ => None,
        }
    }

    pub fn derivative(&self) -> Self {
        Poly {
            coeffs: self
                .coeffs
                .iter()
                .filter(|(exp, _)| **exp > 0)
                .map(|(exp, c)| (exp - 1, c * Rational::from_integer(BigInt::from(*exp))))
                .collect(),
        }
    }

    pub fn monic(&self) -> Self {
        let lc = self.leading_coeff();
        if lc.is_zero() {
            return self.clone();
        }
        self.scale(&(Rational::one() / lc))
    }

    pub fn evaluate(&self, x: &Rational) -> Rational {
        let Some(degree) = self.degree() else {
            return Rational::zero();
        };
        (0..=degree)
            .rev()
            .fold(Rational::zero(), |acc, exp| acc * x + self.coeff(exp))
    }

    pub fn evaluate_f64(&self, x: f64) -> f64 {
        let Some(degree) = self.degree() else {
            return 0.0;
        };
        (0..=degree)
            .rev()
            .fold(0.0, |acc, exp| acc * x + rational_to_f64(&self.coeff(exp)))
    }

    pub fn div_rem(&self, divisor: &Self) -> (Self, Self) {
        let Some(divisor_degree) = divisor.degree() else {
            return (Poly::zero(), self.clone());
        };
        let divisor_lc = divisor.leading_coeff();
        let mut remainder = self.clone();
        let mut quotient = Poly::zero();

        while let Some(r_deg) = remainder.degree() {
            if r_deg < divisor_degree {
                break;
            }
            let term = Poly::monomial(r_deg - divisor_degree, remainder.leading_coeff() / &divisor_lc);
            quotient = quotient + term.clone();
            remainder = remainder - term * divisor.clone();
        }

        (quotient, remainder)
    }

    pub fn gcd(a: &Poly, b: &Poly) -> Poly {
        let mut r0 = a.clone();
        let mut r1 = b.clone();
        while !r1.is_zero() {
            let (_, r) = r0.div_rem(&r1);
            r0 = r1;
            r1 = r;
        }
        r0.monic()
    }

    /// The product of the distinct irreducible factors.
    pub fn square_free_part(&self) -> Poly {
        if self.is_constant() {
            return self.clone();
        }
        let g = Poly::gcd(self, &self.derivative());
        self.div_rem(&g).0
    }

    /// Rescale to integer coefficients with no common factor and a positive leading term.
    pub fn primitive_part(&self) -> Poly {
        if self.is_zero() {
            return Poly::zero();
        }
        let lcm = self
            .coeffs
            .values()
            .fold(BigInt::one(), |acc, c| acc.lcm(c.denom()));
        let scaled: BTreeMap<usize, BigInt> = self
            .coeffs
            .iter()
            .map(|(e, c)| (*e, (c * Rational::from_integer(lcm.clone())).to_integer()))
            .collect();
        let gcd = scaled
            .values()
            .fold(BigInt::zero(), |acc, n| acc.gcd(n));
        let sign = if self.leading_coeff().is_negative() {
            -BigInt::one()
        } else {
            BigInt::one()
        };
        Poly {
            coeffs: scaled
                .into_iter()
                .map(|(e, n)| (e, Rational::from_integer(n * &sign / &gcd)))
                .collect(),
        }
    }

    pub fn to_expr(&self, var: &str) -> Expr {
        let terms: Vec<Expr> = self
            .coeffs
            .iter()
            .rev()
            .map(|(exp, coeff)| {
                let power = match exp {
                    0 => return Expr::Constant(coeff.clone()),
                    1 => Expr::var(var),
                    k => Expr::Pow(Expr::var(var).boxed(), Expr::integer(*k as u64).boxed()),
                };
                if coeff.is_one() {
                    power
                } else {
                    Expr::Mul(Expr::Constant(coeff.clone()).boxed(), power.boxed())
                }
            })
            .collect();
        terms
            .into_iter()
            .reduce(|a, b| Expr::Add(a.boxed(), b.boxed()))
            .unwrap_or_else(crate::expr::zero)
    }

    /// Distinct real roots in ascending order.
    pub fn real_roots(&self) -> Vec<Root> {
        if self.is_constant() {
            return Vec::new();
        }

        let mut remaining = self.square_free_part().primitive_part();
        let mut roots = Vec::new();

        if remaining.coeff(0).is_zero() {
            roots.push(Root::Rational(Rational::zero()));
            remaining = remaining.div_rem(&Poly::monomial(1, Rational::one())).0;
        }

        for candidate in rational_root_candidates(&remaining) {
            if remaining.is_constant() {
                break;
            }
            if remaining.evaluate(&candidate).is_zero() {
                let factor = Poly::from_coefficients(&[Rational::one(), -candidate.clone()]);
                remaining = remaining.div_rem(&factor).0;
                roots.push(Root::Rational(candidate));
            }
        }

        match remaining.degree() {
            Some(2) => roots.extend(quadratic_roots(&remaining)),
            Some(d) if d > 2 => roots.extend(
                isolate_numeric(&remaining)
                    .into_iter()
                    .map(Root::Approximate),
            ),
            _ => {}
        }

        roots.sort_by(|a, b| a.approx().total_cmp(&b.approx()));
        roots
    }
}

fn quadratic_roots(p: &Poly) -> Vec<Root> {
    let (a, b, c) = (p.coeff(2), p.coeff(1), p.coeff(0));
    let disc = &b * &b - Rational::from_integer(4.into()) * &a * &c;
    if disc.is_negative() {
        return Vec::new();
    }
    let two_a = Rational::from_integer(2.into()) * &a;
    let center = -b / &two_a;
    if disc.is_zero() {
        return vec![Root::Rational(center)];
    }
    let offset = (Rational::one() / &two_a).abs();
    vec![
        Root::Surd {
            center: center.clone(),
            offset: -offset.clone(),
            radicand: disc.clone(),
        },
        Root::Surd {
            center,
            offset,
            radicand: disc,
        },
    ]
}

/// `±p/q` with `p | a0` and `q | an`, for an integer polynomial.
fn rational_root_candidates(p: &Poly) -> Vec<Rational> {
    let (Some(a0), Some(an)) = (
        p.coeff(0).to_integer().abs().to_u64(),
        p.leading_coeff().to_integer().abs().to_u64(),
    ) else {
        return Vec::new();
    };
    let limit = DIVISOR_SEARCH_LIMIT * DIVISOR_SEARCH_LIMIT;
    if a0 == 0 || a0 > limit || an > limit {
        return Vec::new();
    }
    let mut out = Vec::new();
    for num in divisors(a0) {
        for den in divisors(an) {
            let r = Rational::new(BigInt::from(num), BigInt::from(den));
            for candidate in [r.clone(), -r] {
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    }
    out
}

fn divisors(n: u64) -> Vec<u64> {
    let mut small = Vec::new();
    let mut large = Vec::new();
    let mut d = 1;
    while d * d <= n && d <= DIVISOR_SEARCH_LIMIT {
        if n % d == 0 {
            small.push(d);
            if d * d != n {
                large.push(n / d);
            }
        }
        d += 1;
    }
    small.extend(large.into_iter().rev());
    small
}

/// Roots of a square-free polynomial, bracketed by the roots of its derivative.
fn isolate_numeric(p: &Poly) -> Vec<f64> {
    let Some(degree) = p.degree() else {
        return Vec::new();
    };
    if degree == 0 {
        return Vec::new();
    }
    let bound = cauchy_bound(p);
    if degree == 1 {
        return vec![-rational_to_f64(&p.coeff(0)) / rational_to_f64(&p.coeff(1))];
    }

    let mut fences = vec![-bound];
    fences.extend(isolate_numeric(&p.derivative()).into_iter().filter(|x| x.abs() < bound));
    fences.push(bound);

    let mut roots: Vec<f64> = Vec::new();
    for window in fences.windows(2) {
        let (lo, hi) = (window[0], window[1]);
        let (flo, fhi) = (p.evaluate_f64(lo), p.evaluate_f64(hi));
        let root = if flo == 0.0 {
            Some(lo)
        } else if flo.signum() != fhi.signum() {
            Some(bisect(p, lo, hi))
        } else {
            None
        };
        if let Some(r) = root {
            if roots.last().map_or(true, |last| (r - last).abs() > 1e-12) {
                roots.push(r);
            }
        }
    }
    if p.evaluate_f64(bound) == 0.0 {
        roots.push(bound);
    }
    roots
}

fn bisect(p: &Poly, mut lo: f64, mut hi: f64) -> f64 {
    let lo_sign = p.evaluate_f64(lo).signum();
    for _ in 0..BISECTION_STEPS {
        let mid = 0.5 * (lo + hi);
        let value = p.evaluate_f64(mid);
        if value == 0.0 {
            return mid;
        }
        if value.signum() == lo_sign {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    0.5 * (lo + hi)
}

fn cauchy_bound(p: &Poly) -> f64 {
    let lc = rational_to_f64(&p.leading_coeff()).abs();
    let max_ratio = p
        .coeffs
        .iter()
        .filter(|(e, _)| Some(**e) != p.degree())
        .map(|(_, c)| rational_to_f64(c).abs() / lc)
        .fold(0.0, f64::max);
    1.0 + max_ratio
}

pub(crate) fn rational_to_f64(r: &Rational) -> f64 {
    let n = r.numer().to_f64().unwrap_or(f64::NAN);
    let d = r.denom().to_f64().unwrap_or(f64::NAN);
    n / d
}

fn extract_rational(expr: &Expr) -> Option<Rational> {
    match expr {
        Expr::Constant(n) => Some(n.clone()),
        Expr::Neg(inner) => extract_rational(inner).map(|n| -n),
        _ => None,
    }
}

fn merge(into: &mut BTreeMap<usize, Rational>, exp: usize, coeff: Rational) {
    match into.entry(exp) {
        Entry::Vacant(entry) => {
            if !coeff.is_zero() {
                entry.insert(coeff);
            }
        }
        Entry::Occupied(mut entry) => {
            let updated = entry.get() + coeff;
            if updated.is_zero() {
                entry.remove();
            } else {
                *entry.get_mut() = updated;
            }
        }
    }
}

impl std::ops::Add for Poly {
    type Output = Poly;
    fn add(self, rhs: Poly) -> Poly {
        let mut coeffs = self.coeffs;
        for (exp, coeff) in rhs.coeffs {
            merge(&mut coeffs, exp, coeff);
        }
        Poly { coeffs }
    }
}

impl std::ops::Sub for Poly {
    type Output = Poly;
    fn sub(self, rhs: Poly) -> Poly {
        self + (-rhs)
    }
}

impl std::ops::Mul for Poly {
    type Output = Poly;
    fn mul(self, rhs: Poly) -> Poly {
        let mut coeffs = BTreeMap::new();
        for (exp_a, coeff_a) in &self.coeffs {
            for (exp_b, coeff_b) in &rhs.coeffs {
                merge(&mut coeffs, exp_a + exp_b, coeff_a * coeff_b);
            }
        }
        Poly { coeffs }
    }
}

impl std::ops::Neg for Poly {
    type Output = Poly;
    fn neg(self) -> Poly {
        Poly {
            coeffs: self.coeffs.into_iter().map(|(e, c)| (e, -c)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn divisors_are_sorted() {
        assert_eq!(divisors(12), vec![1, 2, 3, 4, 6, 12]);
        assert_eq!(divisors(1), vec![1]);
    }

    #[test]
    fn cauchy_bound_contains_roots() {
        let p = Poly::from_coefficients(&[Rational::one(), Rational::zero(), Rational::from_integer((-9).into())]);
        assert!(cauchy_bound(&p) >= 3.0);
    }
}
