use graphcas::{
    AttemptStatus, Expr, IntegrandKind, IntegrationResult, NonElementaryKind, ReasonCode,
    Strategy, differentiate, eval_at, integrate, parse_expr, pretty_integration_result,
};

const SAMPLE_POINTS: [f64; 4] = [0.2, 0.4, 0.6, 0.9];

/// The antiderivative, checked by differentiating it back at a few points.
fn integrate_checked(input: &str) -> (Expr, IntegrationResult) {
    let expr = parse_expr(input).expect("parse integrand");
    let result = integrate("x", &expr);
    let antiderivative = result
        .antiderivative()
        .unwrap_or_else(|| panic!("expected {input} to integrate, got {result:?}"))
        .clone();
    let derivative = differentiate("x", &antiderivative);
    for x in SAMPLE_POINTS {
        let want = eval_at(&expr, "x", x).expect("integrand defined");
        let got = eval_at(&derivative, "x", x).expect("derivative defined");
        assert!(
            (want - got).abs() < 1e-8 * (1.0 + want.abs()),
            "d/dx of ∫{input} = {antiderivative}: {got} vs {want} at x={x}"
        );
    }
    (antiderivative, result)
}

fn succeeded_with(result: &IntegrationResult, strategy: Strategy) -> bool {
    result
        .report()
        .attempts
        .iter()
        .any(|a| a.strategy == strategy && a.status == AttemptStatus::Succeeded)
}

#[test]
fn integrates_polynomials_exactly() {
    let (f, result) = integrate_checked("2x^2+3x-5");
    assert_eq!(result.report().kind, IntegrandKind::Polynomial);
    assert!(succeeded_with(&result, Strategy::Direct));
    let at_three = eval_at(&f, "x", 3.0).unwrap();
    assert!((at_three - (18.0 + 13.5 - 15.0)).abs() < 1e-12);
}

#[test]
fn integrates_reciprocals() {
    integrate_checked("3/x^2");
    let (f, _) = integrate_checked("1/x");
    assert_eq!(f, parse_expr("ln(x)").unwrap());
    integrate_checked("x^-1");
}

#[test]
fn integrates_affine_trig_exp_log() {
    integrate_checked("sin(2x + 3)");
    integrate_checked("cos(x)");
    integrate_checked("tan(x)");
    integrate_checked("exp(2x + 1)");
    integrate_checked("e^(3x)");
    integrate_checked("2^x");
    integrate_checked("ln(2x + 3)");
    integrate_checked("log[2](x)");
}

#[test]
fn integrates_inverse_trig() {
    integrate_checked("arcsin(x)");
    integrate_checked("arccos(x)");
    integrate_checked("arctan(x)");
}

#[test]
fn rational_with_linear_denominator() {
    integrate_checked("(2x+3)/(x+1)");
    integrate_checked("(x^2+1)/x^2");
}

#[test]
fn integration_by_parts_for_products() {
    let (_, result) = integrate_checked("x sin(x)");
    assert!(succeeded_with(&result, Strategy::IntegrationByParts));
    integrate_checked("x e^x");
    integrate_checked("x ln(x)");
}

#[test]
fn substitution_undoes_the_chain_rule() {
    let (f, result) = integrate_checked("2*x*exp(x^2)");
    assert!(succeeded_with(&result, Strategy::Substitution));
    assert_eq!(f, parse_expr("exp(x^2)").unwrap());
    assert!(!matches!(result.report().kind, IntegrandKind::NonElementary(_)));

    integrate_checked("(2*x+1)*exp(x^2+x)");
    integrate_checked("x*cos(x^2)");
    integrate_checked("sin(x)*cos(x)");
    integrate_checked("x/(x^2+1)");
    integrate_checked("3x^2*(x^3+1)^4");
    integrate_checked("cos(x)*e^(sin(x))");
}

#[test]
fn partial_fractions_for_quadratic_denominators() {
    let (f, result) = integrate_checked("1/(x^2+1)");
    assert!(succeeded_with(&result, Strategy::PartialFractions));
    assert_eq!(f, parse_expr("arctan(x)").unwrap());

    integrate_checked("1/(x^2-1)");
    integrate_checked("1/(x^2+2x+5)");
    integrate_checked("1/(x^2-2)");
    integrate_checked("(x^3+1)/(x^2-4)");
    integrate_checked("1/((x-2)^2*(x+3))");
}

#[test]
fn exponential_times_trig() {
    integrate_checked("exp(x)*sin(x)");
    integrate_checked("e^(2x)*cos(3x)");
}

#[test]
fn flags_non_elementary_inputs() {
    let exp_square = parse_expr("exp(x^2)").expect("parse exp square");
    match integrate("x", &exp_square) {
        IntegrationResult::NotIntegrable(report) => assert_eq!(
            report.reason,
            Some(ReasonCode::NonElementary(NonElementaryKind::ExpOfPolynomial))
        ),
        other => panic!("expected non-elementary classification, got {other:?}"),
    }

    let trig_over_arg = parse_expr("sin(x)/x").expect("parse trig over arg");
    match integrate("x", &trig_over_arg) {
        IntegrationResult::NotIntegrable(report) => assert_eq!(
            report.reason,
            Some(ReasonCode::NonElementary(NonElementaryKind::TrigOverArgument))
        ),
        other => panic!("expected trig/x non-elementary flag, got {other:?}"),
    }
}

#[test]
fn constants_with_respect_to_other_variable() {
    let expr = parse_expr("x sin(x)").expect("parse");
    let result = integrate("y", &expr);
    let antiderivative = result.antiderivative().expect("constant integrand");
    assert!(antiderivative.contains_var("y"));
    assert!(antiderivative.contains_var("x"));
}

#[test]
fn report_lists_each_strategy() {
    let expr = parse_expr("x sin(x)").expect("parse");
    let result = integrate("x", &expr);
    let lines = pretty_integration_result(&result);
    assert!(lines[0].starts_with("∫ = "), "{lines:?}");
    assert_eq!(lines.len(), 2 + result.report().attempts.len());
}
