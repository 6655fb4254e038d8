use graphcas::equation::preprocess;
use graphcas::{
    Base, EquationKind, InverseTrigFunction, ParseError, ParseMode, Payload, Rational,
    TrigFunction, canonical, eval_at, parse_equation, parse_equation_general, parse_expr,
    simplify_fully, try_parse_equation,
};

fn q(n: i64, d: i64) -> Rational {
    Rational::new(n.into(), d.into())
}

fn payload(input: &str) -> Payload {
    parse_equation(input)
        .unwrap_or_else(|| panic!("{input} should parse"))
        .payload
}

#[test]
fn preprocessing_brackets_informal_input() {
    let cases = [
        ("y = sin x", "sin(x)"),
        ("y=log[2]x", "log[2](x)"),
        ("y=e^3x", "e^(3x)"),
        ("y=arctanx", "arctan(x)"),
        ("y=sin(x", "sin(x)"),
    ];
    for (input, rhs) in cases {
        let pre = preprocess(input).expect("preprocess");
        assert_eq!(pre.dependent_var, 'y');
        assert_eq!(pre.rhs, rhs, "{input}");
    }
}

#[test]
fn preprocessing_rejects_malformed_sides() {
    assert!(matches!(preprocess("2x+1"), Err(ParseError::Syntax(_))));
    assert!(matches!(preprocess("yy=x"), Err(ParseError::Syntax(_))));
    assert!(matches!(preprocess("y="), Err(ParseError::Syntax(_))));
}

#[test]
fn linear_and_polynomial_kinds() {
    let line = parse_equation("y=2x+1").unwrap();
    assert_eq!(line.kind(), EquationKind::Linear);
    assert_eq!(line.payload, Payload::Linear { m: q(2, 1), b: q(1, 1) });

    let quadratic = parse_equation("y=2x^2+3x-5").unwrap();
    assert_eq!(quadratic.kind(), EquationKind::Quadratic);
    assert_eq!(quadratic.coefficients(), Some(vec![q(2, 1), q(3, 1), q(-5, 1)]));

    let cubic = parse_equation("y=x^3-x").unwrap();
    assert_eq!(cubic.kind(), EquationKind::Cubic);
    assert_eq!(cubic.coefficients(), Some(vec![q(1, 1), q(0, 1), q(-1, 1), q(0, 1)]));

    let quartic = parse_equation("y=1/2x^4").unwrap();
    assert_eq!(quartic.kind(), EquationKind::Quartic);
    assert_eq!(quartic.coefficients().map(|c| c.len()), Some(5));
}

#[test]
fn other_letters_as_variables() {
    let parsed = parse_equation("f=3t-2").unwrap();
    assert_eq!(parsed.dependent_var, 'f');
    assert_eq!(parsed.independent_var, 't');
    assert_eq!(parsed.payload, Payload::Linear { m: q(3, 1), b: q(-2, 1) });
}

#[test]
fn reciprocal_kinds() {
    assert_eq!(
        payload("y=3/x^2"),
        Payload::Reciprocal { numerator: q(3, 1), exponent: 2 }
    );
    assert_eq!(
        payload("y=1/x"),
        Payload::Reciprocal { numerator: q(1, 1), exponent: 1 }
    );
}

#[test]
fn exponential_kinds() {
    assert_eq!(
        payload("y=e^3x"),
        Payload::Exponential { base: Base::E, rate: q(3, 1) }
    );
    assert_eq!(
        payload("y=2^x"),
        Payload::Exponential { base: Base::Real(q(2, 1)), rate: q(1, 1) }
    );
    assert_eq!(
        payload("y=0.5^-x"),
        Payload::Exponential { base: Base::Real(q(1, 2)), rate: q(-1, 1) }
    );
    assert_eq!(
        payload("y=1e3^x"),
        Payload::Exponential { base: Base::Real(q(1000, 1)), rate: q(1, 1) }
    );
}

#[test]
fn euler_exponential_normalizes_to_exp() {
    let normalized = canonical(&parse_equation("y=e^3x").unwrap());
    assert_eq!(normalized.kind, EquationKind::Exponential);
    let expected = simplify_fully(parse_expr("e^(3x)").unwrap());
    assert_eq!(normalized.expr, expected);
}

#[test]
fn logarithm_bases() {
    assert_eq!(payload("y=log[2]x"), Payload::Logarithmic { base: Base::Real(q(2, 1)) });
    assert_eq!(payload("y=logx"), Payload::Logarithmic { base: Base::Real(q(10, 1)) });
    assert_eq!(payload("y=lnx"), Payload::Logarithmic { base: Base::E });
}

#[test]
fn trigonometric_kinds() {
    assert_eq!(payload("y=sinx"), Payload::Trigonometric(TrigFunction::Sin));
    assert_eq!(payload("y=cos(x)"), Payload::Trigonometric(TrigFunction::Cos));
    assert_eq!(payload("y=tanx"), Payload::Trigonometric(TrigFunction::Tan));
    assert_eq!(
        payload("y=arctanx"),
        Payload::InverseTrigonometric(InverseTrigFunction::Arctan)
    );
    assert_eq!(
        payload("y=arcsin(x)"),
        Payload::InverseTrigonometric(InverseTrigFunction::Arcsin)
    );
}

#[test]
fn unsupported_inputs_yield_none() {
    assert!(parse_equation("y=x^5").is_none());
    assert!(parse_equation("y=2x +").is_none());
    assert!(parse_equation("y=sin(x)^2").is_none());
    assert_eq!(
        try_parse_equation("y=x^5", ParseMode::Fixed),
        Err(ParseError::DegreeExceeded { degree: 5 })
    );
}

#[test]
fn invalid_bases_are_reported() {
    assert!(matches!(
        try_parse_equation("y=log[1]x", ParseMode::Fixed),
        Err(ParseError::InvalidBase(_))
    ));
    assert!(matches!(
        try_parse_equation("y=log[1]x", ParseMode::General),
        Err(ParseError::InvalidBase(_))
    ));
}

#[test]
fn general_mode_accepts_free_form_expressions() {
    let parsed = parse_equation_general("y=x^5").unwrap();
    assert_eq!(parsed.kind(), EquationKind::Symbolic);
    assert_eq!(parsed.independent_var, 'x');

    let parsed = parse_equation_general("y=x sin(x)").unwrap();
    assert_eq!(parsed.kind(), EquationKind::Symbolic);

    // recognizers still run first
    let parsed = parse_equation_general("y=2x+1").unwrap();
    assert_eq!(parsed.kind(), EquationKind::Linear);
}

#[test]
fn general_mode_variable_checks() {
    assert!(matches!(
        try_parse_equation("y=sin(x)+z", ParseMode::General),
        Err(ParseError::MultipleVariables(_))
    ));
    assert_eq!(
        try_parse_equation("y=sin(2)", ParseMode::General),
        Err(ParseError::NoVariable)
    );
}

#[test]
fn canonical_forms_evaluate_like_the_input() {
    let cases = [
        ("y=2x^2+3x-5", 2.0, 9.0),
        ("y=3/x^2", 2.0, 0.75),
        ("y=e^3x", 0.0, 1.0),
        ("y=log[2]x", 8.0, 3.0),
        ("y=logx", 100.0, 2.0),
        ("y=cosx", 0.0, 1.0),
        ("y=arctanx", 1.0, std::f64::consts::FRAC_PI_4),
    ];
    for (input, x, want) in cases {
        let normalized = canonical(&parse_equation(input).unwrap());
        assert_eq!(normalized.var, 'x');
        let got = eval_at(&normalized.expr, &normalized.symbol(), x).unwrap();
        assert!((got - want).abs() < 1e-9, "{input} at {x}: {got} vs {want}");
    }
}

#[test]
fn normalization_is_stable() {
    for input in ["y=2x^2+3x-5", "y=x^4-2x^2", "y=3/x^2", "y=2^3x"] {
        let parsed = parse_equation(input).unwrap();
        let first = canonical(&parsed);
        let second = canonical(&parsed);
        assert_eq!(first, second);
        assert_eq!(first.kind, parsed.kind());
        assert_eq!(simplify_fully(first.expr.clone()), first.expr, "{input}");
    }
}
