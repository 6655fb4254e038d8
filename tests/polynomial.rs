use graphcas::{Poly, Rational, Root, parse_expr};

fn poly(input: &str) -> Poly {
    let expr = parse_expr(input).expect("parse polynomial");
    Poly::from_expr(&expr, "x").expect("build polynomial")
}

fn q(n: i64, d: i64) -> Rational {
    Rational::new(n.into(), d.into())
}

#[test]
fn polynomial_division_exact() {
    let dividend = poly("x^3 - 1");
    let divisor = poly("x - 1");
    let (quotient, remainder) = dividend.div_rem(&divisor);
    assert!(remainder.is_zero());
    assert_eq!(quotient, poly("x^2 + x + 1"));
}

#[test]
fn polynomial_division_remainder() {
    let dividend = poly("x^3 + x + 1");
    let divisor = poly("x^2 + 1");
    let (quotient, remainder) = dividend.div_rem(&divisor);
    assert_eq!(quotient, poly("x"));
    assert_eq!(remainder, poly("1"));
}

#[test]
fn polynomial_gcd_is_monic() {
    let a = poly("x^2 - 1");
    let b = poly("x^2 - x");
    assert_eq!(Poly::gcd(&a, &b), poly("x - 1"));
}

#[test]
fn primitive_part_clears_denominators() {
    let polynomial = Poly::from_coefficients(&[q(2, 3), q(4, 3), q(2, 3)]);
    assert_eq!(polynomial.primitive_part(), poly("x^2 + 2*x + 1"));
    assert_eq!(poly("-2*x^2 - 4*x").primitive_part(), poly("x^2 + 2*x"));
}

#[test]
fn coefficients_listed_highest_first() {
    let built = Poly::from_coefficients(&[q(2, 1), q(3, 1), q(-5, 1)]);
    assert_eq!(built, poly("2x^2 + 3x - 5"));
    assert_eq!(built.degree(), Some(2));
    assert_eq!(built.coeff(0), q(-5, 1));
}

#[test]
fn rational_roots_are_exact() {
    let roots = poly("x^2 - 4").real_roots();
    assert_eq!(roots, vec![Root::Rational(q(-2, 1)), Root::Rational(q(2, 1))]);

    let roots = poly("2x^3 - 3x^2 - 2x").real_roots();
    assert_eq!(
        roots,
        vec![Root::Rational(q(-1, 2)), Root::Rational(q(0, 1)), Root::Rational(q(2, 1))]
    );
}

#[test]
fn repeated_roots_reported_once() {
    let roots = poly("(x - 1)^2 (x + 3)").real_roots();
    assert_eq!(roots, vec![Root::Rational(q(-3, 1)), Root::Rational(q(1, 1))]);
}

#[test]
fn irrational_quadratic_roots_are_surds() {
    let roots = poly("x^2 - 2").real_roots();
    assert_eq!(roots.len(), 2);
    assert!(roots.iter().all(|r| matches!(r, Root::Surd { .. })));
    assert!((roots[0].approx() + 2f64.sqrt()).abs() < 1e-12);
    assert!((roots[1].approx() - 2f64.sqrt()).abs() < 1e-12);
    assert!(roots[1].to_expr().is_some());
}

#[test]
fn complex_roots_are_excluded() {
    assert!(poly("x^2 + 1").real_roots().is_empty());
    assert!(poly("x^4 + 2x^2 + 5").real_roots().is_empty());
}

#[test]
fn higher_degree_roots_are_isolated_numerically() {
    // x^3 - 2x - 5 has a single real root near 2.0946
    let roots = poly("x^3 - 2x - 5").real_roots();
    assert_eq!(roots.len(), 1);
    let root = roots[0].approx();
    assert!((root.powi(3) - 2.0 * root - 5.0).abs() < 1e-9);
    assert!(matches!(roots[0], Root::Approximate(_)));
}

#[test]
fn derivative_and_evaluation() {
    let p = poly("x^4 - 3x^2 + x");
    assert_eq!(p.derivative(), poly("4x^3 - 6x + 1"));
    assert_eq!(p.evaluate(&q(2, 1)), q(6, 1));
}
