use graphcas::{
    EquationKind, Expr, Payload, Rational, canonical, eval_at, parse_equation, parse_expr,
    simplify_fully,
};
use proptest::prelude::*;

fn q(n: i64) -> Rational {
    Rational::from_integer(n.into())
}

fn polynomial_text(coeffs: &[i64]) -> String {
    let degree = coeffs.len() - 1;
    let mut text = String::from("y=");
    for (i, c) in coeffs.iter().enumerate() {
        match degree - i {
            0 => text.push_str(&format!("{c:+}")),
            p => text.push_str(&format!("{c:+}x^{p}")),
        }
    }
    text
}

proptest! {
    #[test]
    fn linear_coefficients_round_trip(m in -50i64..50, b in -50i64..50) {
        let input = format!("y={m}x{b:+}");
        let parsed = parse_equation(&input).expect("linear input parses");
        prop_assert_eq!(&parsed.payload, &Payload::Linear { m: q(m), b: q(b) });

        let normalized = canonical(&parsed);
        let intended = parse_expr(&format!("{m}*x+({b})")).expect("parse intended line");
        let difference = simplify_fully(Expr::Sub(normalized.expr.boxed(), intended.boxed()));
        prop_assert!(difference.is_zero(), "{} leaves {}", input, difference);
    }

    #[test]
    fn polynomial_vector_has_degree_plus_one_entries(
        leading in prop_oneof![-9i64..=-1, 1i64..=9],
        rest in prop::collection::vec(-9i64..=9, 2..=4),
    ) {
        let mut coeffs = vec![leading];
        coeffs.extend(rest);
        let input = polynomial_text(&coeffs);
        let parsed = parse_equation(&input).expect("polynomial input parses");

        let want_kind = match coeffs.len() {
            3 => EquationKind::Quadratic,
            4 => EquationKind::Cubic,
            _ => EquationKind::Quartic,
        };
        prop_assert_eq!(parsed.kind(), want_kind);
        let expected: Vec<Rational> = coeffs.iter().map(|c| q(*c)).collect();
        prop_assert_eq!(parsed.coefficients(), Some(expected));
    }

    #[test]
    fn canonical_polynomial_matches_horner(
        coeffs in prop::collection::vec(-9i64..=9, 3..=5),
        x in -3.0f64..3.0,
    ) {
        prop_assume!(coeffs[0] != 0);
        let parsed = parse_equation(&polynomial_text(&coeffs)).expect("polynomial input parses");
        let normalized = canonical(&parsed);
        let want = coeffs.iter().fold(0.0, |acc, c| acc * x + *c as f64);
        let got = eval_at(&normalized.expr, "x", x).expect("polynomials are defined everywhere");
        prop_assert!((got - want).abs() < 1e-9 * (1.0 + want.abs()));
    }
}
