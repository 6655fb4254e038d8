//! Rational functions `N(x)/D(x)` whose denominator splits into rational linear
//! factors and at most one irreducible quadratic.

use crate::expr::{Expr, Rational};
use crate::polynomial::{Poly, Root};
use num_bigint::BigInt;
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::flatten_product;
use super::polynomial::antiderivative;

pub(super) fn integrate_partial_fractions(expr: &Expr, var: &str) -> Option<Expr> {
    let (numer, denom) = rational_parts(expr, var)?;
    if denom.is_constant() {
        return None;
    }

    let lead = denom.leading_coeff();
    let (quotient, remainder) = numer.div_rem(&denom);
    let mut terms = Vec::new();
    if !quotient.is_zero() {
        terms.push(antiderivative(&quotient).to_expr(var));
    }
    if remainder.is_zero() {
        return terms.into_iter().reduce(|a, b| Expr::Add(a.boxed(), b.boxed()));
    }

    // R/D = Σ A_j/F_j over coprime factors F_j of the monic denominator
    let monic = denom.monic();
    let remainder = remainder.scale(&(Rational::one() / lead));
    for (factor, kind) in split_denominator(&monic)? {
        let cofactor = monic.div_rem(&factor).0;
        let inverse = inverse_mod(&cofactor, &factor)?;
        let numerator = (remainder.clone() * inverse).div_rem(&factor).1;
        if numerator.is_zero() {
            continue;
        }
        terms.extend(match kind {
            Factor::Linear { root, multiplicity } => {
                integrate_linear_power(&numerator, &root, multiplicity, var)
            }
            Factor::Quadratic => vec![integrate_quadratic(&numerator, &factor, var)?],
        });
    }

    terms.into_iter().reduce(|a, b| Expr::Add(a.boxed(), b.boxed()))
}

enum Factor {
    Linear { root: Rational, multiplicity: usize },
    Quadratic,
}

/// Exact numerator and denominator polynomials, combining sums over a common denominator.
fn rational_parts(expr: &Expr, var: &str) -> Option<(Poly, Poly)> {
    match expr {
        Expr::Add(a, b) | Expr::Sub(a, b) => {
            let (na, da) = rational_parts(a, var)?;
            let (nb, db) = rational_parts(b, var)?;
            let cross = nb * da.clone();
            let numer = match expr {
                Expr::Sub(_, _) => na * db.clone() - cross,
                _ => na * db.clone() + cross,
            };
            Some((numer, da * db))
        }
        Expr::Neg(inner) => rational_parts(inner, var).map(|(n, d)| (-n, d)),
        _ => {
            let (c, factors) = flatten_product(expr);
            let mut numer = Poly::from_constant(c);
            let mut denom = Poly::one();
            for factor in factors {
                match &factor {
                    Expr::Pow(base, exp) => match exp.as_constant() {
                        Some(k) if k.is_integer() && k.is_negative() => {
                            let power = (-k.to_integer()).to_usize()?;
                            denom = denom * Poly::from_expr(base, var)?.pow(power);
                        }
                        _ => numer = numer * Poly::from_expr(&factor, var)?,
                    },
                    _ => numer = numer * Poly::from_expr(&factor, var)?,
                }
            }
            Some((numer, denom))
        }
    }
}

/// Coprime factors of a monic polynomial: `(x - r)^m` for each rational root and one
/// leftover quadratic. Anything else is out of reach.
fn split_denominator(monic: &Poly) -> Option<Vec<(Poly, Factor)>> {
    let mut remaining = monic.clone();
    let mut out = Vec::new();
    for root in monic.real_roots() {
        let Root::Rational(r) = root else {
            continue;
        };
        let linear = Poly::from_coefficients(&[Rational::one(), -r.clone()]);
        let mut multiplicity = 0;
        while remaining.evaluate(&r).is_zero() && !remaining.is_constant() {
            remaining = remaining.div_rem(&linear).0;
            multiplicity += 1;
        }
        out.push((
            linear.pow(multiplicity),
            Factor::Linear {
                root: r,
                multiplicity,
            },
        ));
    }
    match remaining.degree()? {
        0 => {}
        2 => out.push((remaining.monic(), Factor::Quadratic)),
        _ => return None,
    }
    Some(out)
}

/// `a^-1 mod m` by the extended Euclidean algorithm.
fn inverse_mod(a: &Poly, m: &Poly) -> Option<Poly> {
    let (mut r0, mut r1) = (m.clone(), a.div_rem(m).1);
    let (mut s0, mut s1) = (Poly::zero(), Poly::one());
    while !r1.is_zero() {
        let (q, r) = r0.div_rem(&r1);
        let s = s0 - q * s1.clone();
        r0 = r1;
        r1 = r;
        s0 = s1;
        s1 = s;
    }
    if !r0.is_constant() || r0.is_zero() {
        return None;
    }
    Some(s0.scale(&(Rational::one() / r0.leading_coeff())).div_rem(m).1)
}

/// `∫ A(x) / (x - r)^m` for `deg A < m`, expanding `A` in powers of `x - r`.
fn integrate_linear_power(numerator: &Poly, root: &Rational, multiplicity: usize, var: &str) -> Vec<Expr> {
    let shifted = Poly::from_coefficients(&[Rational::one(), -root.clone()]).to_expr(var);
    let mut derivative = numerator.clone();
    let mut factorial = Rational::one();
    let mut out = Vec::new();
    for k in 0..multiplicity {
        if k > 0 {
            derivative = derivative.derivative();
            factorial *= Rational::from_integer(BigInt::from(k));
        }
        let coeff = derivative.evaluate(root) / &factorial;
        if coeff.is_zero() {
            continue;
        }
        // coeff * (x - r)^(k - m)
        let power = k as i64 - multiplicity as i64 + 1;
        let term = if power == 0 {
            Expr::Log(shifted.clone().boxed())
        } else {
            let n = Rational::from_integer(BigInt::from(power));
            Expr::Div(
                Expr::Pow(shifted.clone().boxed(), Expr::Constant(n.clone()).boxed()).boxed(),
                Expr::Constant(n).boxed(),
            )
        };
        out.push(Expr::Mul(Expr::Constant(coeff).boxed(), term.boxed()));
    }
    out
}

/// `∫ (p x + s) / (x^2 + b x + c)` for a monic quadratic with no rational root.
fn integrate_quadratic(numerator: &Poly, quadratic: &Poly, var: &str) -> Option<Expr> {
    let (p, s) = (numerator.coeff(1), numerator.coeff(0));
    let b = quadratic.coeff(1);
    let c = quadratic.coeff(0);
    let two = Rational::from_integer(2.into());

    // x^2 + b x + c = (x + h)^2 + d
    let h = &b / &two;
    let d = &c - &h * &h;
    if d.is_zero() {
        return None;
    }
    let shifted = Poly::from_coefficients(&[Rational::one(), h.clone()]).to_expr(var);
    let log_part = Expr::Mul(
        Expr::Constant(&p / &two).boxed(),
        Expr::Log(quadratic.to_expr(var).boxed()).boxed(),
    );

    let scale = s - &p * &h;
    let sqrt = |r: Rational| Expr::Pow(Expr::Constant(r).boxed(), Expr::constant(1, 2).boxed());
    let inverse_part = if d.is_positive() {
        // atan((x + h) / √d) / √d
        let root = sqrt(d);
        Expr::Div(
            Expr::Mul(
                Expr::Constant(scale).boxed(),
                Expr::Atan(Expr::Div(shifted.boxed(), root.clone().boxed()).boxed()).boxed(),
            )
            .boxed(),
            root.boxed(),
        )
    } else {
        // ln((x + h - k) / (x + h + k)) / 2k with k = √(-d)
        let k = sqrt(-d);
        let ratio = Expr::Div(
            Expr::Sub(shifted.clone().boxed(), k.clone().boxed()).boxed(),
            Expr::Add(shifted.boxed(), k.clone().boxed()).boxed(),
        );
        Expr::Div(
            Expr::Mul(Expr::Constant(scale).boxed(), Expr::Log(ratio.boxed()).boxed()).boxed(),
            Expr::Mul(Expr::integer(2).boxed(), k.boxed()).boxed(),
        )
    };
    Some(Expr::Add(log_part.boxed(), inverse_part.boxed()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_expr;

    fn q(n: i64) -> Rational {
        Rational::from_integer(n.into())
    }

    #[test]
    fn denominators_split_into_coprime_factors() {
        // (x - 1)^2 (x + 2) (x^2 + 1)
        let denom = Poly::from_coefficients(&[q(1), q(0), q(-2), q(2), q(-3), q(2)]);
        let factors = split_denominator(&denom).unwrap();
        assert_eq!(factors.len(), 3);
        let degrees: Vec<Option<usize>> = factors.iter().map(|(f, _)| f.degree()).collect();
        assert!(degrees.contains(&Some(2)));
        assert!(degrees.contains(&Some(1)));
        assert!(split_denominator(&Poly::from_coefficients(&[q(1), q(0), q(0), q(-2)])).is_none());
    }

    #[test]
    fn modular_inverse() {
        let a = Poly::from_coefficients(&[q(1), q(2)]);
        let m = Poly::from_coefficients(&[q(1), q(0), q(1)]);
        let inv = inverse_mod(&a, &m).unwrap();
        assert_eq!((a * inv).div_rem(&m).1, Poly::one());
    }

    #[test]
    fn sums_are_combined_over_one_denominator() {
        let expr = parse_expr("1/(x-1) - 1/(x+1)").unwrap();
        let (numer, denom) = rational_parts(&expr, "x").unwrap();
        assert_eq!(numer, Poly::from_constant(q(2)));
        assert_eq!(denom, Poly::from_coefficients(&[q(1), q(0), q(-1)]));
    }
}
