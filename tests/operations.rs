use graphcas::{
    CanonicalExpression, Expr, Extrema, Nature, OperationError, YIntercept, canonical, derivative,
    eval_at, integral, maximum, minimum, parse_equation_general, solve, stationary_points,
};

fn normalized(input: &str) -> CanonicalExpression {
    canonical(&parse_equation_general(input).unwrap_or_else(|| panic!("{input} should parse")))
}

#[test]
fn quadratic_intercepts_are_exact() {
    let intercepts = solve(&normalized("y=x^2-4")).unwrap();
    let roots: Vec<Option<Expr>> = intercepts.x_intercepts.iter().map(|v| v.exact.clone()).collect();
    assert_eq!(roots, vec![Some(Expr::integer(-2)), Some(Expr::integer(2))]);
    match &intercepts.y_intercept {
        YIntercept::Value(value) => assert_eq!(value.exact, Some(Expr::integer(-4))),
        YIntercept::Undefined => panic!("y-intercept should exist"),
    }
    assert_eq!(intercepts.to_string(), "When y=0: -2, 2\nWhen x=0: -4");
}

#[test]
fn irrational_intercepts_keep_their_decimal() {
    let intercepts = solve(&normalized("y=x^2-2")).unwrap();
    assert_eq!(intercepts.x_intercepts.len(), 2);
    assert!((intercepts.x_intercepts[1].approx - 2f64.sqrt()).abs() < 1e-12);
    assert!(intercepts.x_intercepts.iter().all(|v| v.exact.is_some() && !v.is_rational()));
}

#[test]
fn reciprocal_has_no_intercepts() {
    let intercepts = solve(&normalized("y=1/x")).unwrap();
    assert!(intercepts.x_intercepts.is_empty());
    assert_eq!(intercepts.y_intercept, YIntercept::Undefined);
    assert_eq!(
        intercepts.to_string(),
        "When y=0: No Real Solution\nWhen x=0: undefined (division by zero)"
    );
}

#[test]
fn transcendental_intercepts() {
    let log = solve(&normalized("y=lnx")).unwrap();
    assert_eq!(log.x_intercepts.len(), 1);
    assert!((log.x_intercepts[0].approx - 1.0).abs() < 1e-12);
    assert_eq!(log.y_intercept, YIntercept::Undefined);

    let exp = solve(&normalized("y=e^x")).unwrap();
    assert!(exp.x_intercepts.is_empty());
    match exp.y_intercept {
        YIntercept::Value(value) => assert!((value.approx - 1.0).abs() < 1e-12),
        YIntercept::Undefined => panic!("e^0 is defined"),
    }
}

#[test]
fn constant_zero_is_an_evaluation_error() {
    let err = solve(&normalized("y=0")).unwrap_err();
    assert!(matches!(err, OperationError::Evaluation(_)));
}

#[test]
fn derivative_and_integral_of_canonical_forms() {
    let quadratic = normalized("y=2x^2+3x-5");
    let slope = derivative(&quadratic).unwrap();
    assert!((eval_at(&slope, "x", 1.0).unwrap() - 7.0).abs() < 1e-12);

    let area_fn = integral(&quadratic).unwrap();
    let definite = eval_at(&area_fn, "x", 3.0).unwrap() - eval_at(&area_fn, "x", 0.0).unwrap();
    assert!((definite - (18.0 + 13.5 - 15.0)).abs() < 1e-9);

    let log = normalized("y=log[2]x");
    let slope = derivative(&log).unwrap();
    assert!((eval_at(&slope, "x", 1.0).unwrap() - 1.0 / 2f64.ln()).abs() < 1e-12);
}

#[test]
fn non_elementary_integral_is_reported() {
    let err = integral(&normalized("y=e^(x^2)")).unwrap_err();
    match err {
        OperationError::Evaluation(message) => assert!(message.contains("no elementary")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn downward_parabola_has_a_maximum() {
    let parabola = normalized("y=-x^2+4x");
    match maximum(&parabola).unwrap() {
        Extrema::Points(points) => {
            assert_eq!(points.len(), 1);
            assert_eq!(points[0].x.exact, Some(Expr::integer(2)));
            assert_eq!(points[0].y.exact, Some(Expr::integer(4)));
            assert_eq!(points[0].nature, Nature::Maximum);
        }
        other => panic!("expected a maximum, got {other:?}"),
    }
    assert_eq!(minimum(&parabola).unwrap(), Extrema::None);
}

#[test]
fn upward_parabola_has_no_maximum() {
    let parabola = normalized("y=x^2-4");
    assert_eq!(maximum(&parabola).unwrap(), Extrema::None);
    match minimum(&parabola).unwrap() {
        Extrema::Points(points) => assert_eq!(points[0].y.exact, Some(Expr::integer(-4))),
        other => panic!("expected a minimum, got {other:?}"),
    }
}

#[test]
fn lines_have_no_extrema() {
    let line = normalized("y=3x+1");
    assert_eq!(maximum(&line).unwrap(), Extrema::NotApplicable);
    assert_eq!(minimum(&line).unwrap(), Extrema::NotApplicable);
}

#[test]
fn cubic_stationary_points() {
    let analysis = stationary_points(&normalized("y=x^3")).unwrap();
    assert_eq!(analysis.points.len(), 1);
    assert_eq!(analysis.points[0].nature, Nature::Inflection);
    assert_eq!(analysis.points[0].x.exact, Some(Expr::integer(0)));

    let analysis = stationary_points(&normalized("y=x^3-3x")).unwrap();
    let natures: Vec<Nature> = analysis.points.iter().map(|p| p.nature).collect();
    assert_eq!(natures, vec![Nature::Maximum, Nature::Minimum]);
    assert!((analysis.points[0].y.approx - 2.0).abs() < 1e-12);
    assert!((analysis.points[1].y.approx + 2.0).abs() < 1e-12);
}

#[test]
fn trig_stationary_points_cover_one_turn() {
    let analysis = stationary_points(&normalized("y=sinx")).unwrap();
    let natures: Vec<Nature> = analysis.points.iter().map(|p| p.nature).collect();
    assert_eq!(natures, vec![Nature::Maximum, Nature::Minimum]);
    for point in &analysis.points {
        assert!((point.y.approx.abs() - 1.0).abs() < 1e-9);
        assert_ne!(point.nature, Nature::Inflection);
    }
}
