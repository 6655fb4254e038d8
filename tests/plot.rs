use graphcas::{PlotSettings, parse_equation, parse_equation_general, sample};

fn segments(input: &str) -> Vec<graphcas::Segment> {
    let equation = parse_equation_general(input).unwrap_or_else(|| panic!("{input} should parse"));
    sample(&equation, &PlotSettings::default())
}

#[test]
fn default_window() {
    let settings = PlotSettings::default();
    assert_eq!((settings.x_min, settings.x_max), (-10.0, 10.0));
    assert_eq!(settings.samples, 400);
}

#[test]
fn polynomials_are_one_segment() {
    let curve = segments("y=2x^2+3x-5");
    assert_eq!(curve.len(), 1);
    assert_eq!(curve[0].len(), 400);
    let (x, y) = curve[0][0];
    assert_eq!(x, -10.0);
    assert!((y - 165.0).abs() < 1e-9);
}

#[test]
fn reciprocal_splits_at_the_pole() {
    let curve = segments("y=1/x");
    assert_eq!(curve.len(), 2);
    assert!(curve[0].iter().all(|(x, y)| *x < 0.0 && *y < 0.0));
    assert!(curve[1].iter().all(|(x, y)| *x > 0.0 && *y > 0.0));
}

#[test]
fn arcsin_stays_in_its_domain() {
    let curve = segments("y=arcsinx");
    assert_eq!(curve.len(), 1);
    assert!(curve[0].iter().all(|(x, _)| (-1.0..=1.0).contains(x)));
    assert_eq!(curve[0].first().map(|p| p.0), Some(-1.0));
    assert!(curve[0].len() >= 399);
}

#[test]
fn tangent_breaks_at_each_asymptote() {
    let curve = segments("y=tanx");
    // poles at ±π/2, ±3π/2, ±5π/2 inside [-10, 10]
    assert_eq!(curve.len(), 7);
}

#[test]
fn logarithm_starts_after_zero() {
    let curve = segments("y=lnx");
    assert_eq!(curve.len(), 1);
    assert!(curve[0].iter().all(|(x, _)| *x > 0.0));
}

#[test]
fn symbolic_curves_are_sampled_through_the_evaluator() {
    let curve = segments("y=x sin(x)");
    assert_eq!(curve.len(), 1);
    let (x, y) = curve[0][200];
    assert!((y - x * x.sin()).abs() < 1e-12);
}

#[test]
fn narrow_window_and_bad_settings() {
    let equation = parse_equation("y=x").unwrap();
    let settings = PlotSettings {
        x_min: 1.0,
        x_max: -1.0,
        samples: 10,
    };
    assert!(sample(&equation, &settings).is_empty());
    let settings = PlotSettings {
        x_min: 0.0,
        x_max: 1.0,
        samples: 1,
    };
    assert!(sample(&equation, &settings).is_empty());
}
