use graphcas::{AreaEntry, AreaRequest, Expr, OperationError, Value, area_under_curves};

fn computed(entry: &AreaEntry) -> &Value {
    match entry {
        AreaEntry::Computed { area, .. } => area,
        AreaEntry::Skipped { equation, reason } => panic!("{equation} skipped: {reason}"),
    }
}

fn skip_reason(entry: &AreaEntry) -> &OperationError {
    match entry {
        AreaEntry::Skipped { reason, .. } => reason,
        AreaEntry::Computed { equation, .. } => panic!("{equation} should have been skipped"),
    }
}

#[test]
fn explicit_bounds_give_exact_area() {
    let report = area_under_curves(&[AreaRequest::between(
        "y=x",
        Expr::integer(0),
        Expr::integer(2),
    )]);
    let area = computed(&report.entries[0]);
    assert_eq!(area.exact, Some(Expr::integer(2)));
    assert_eq!(report.total.exact, Some(Expr::integer(2)));
}

#[test]
fn bounds_inferred_from_intercepts() {
    let report = area_under_curves(&[AreaRequest::inferred("y=x^2-4")]);
    match &report.entries[0] {
        AreaEntry::Computed {
            lower, upper, area, ..
        } => {
            assert_eq!(lower.exact, Some(Expr::integer(-2)));
            assert_eq!(upper.exact, Some(Expr::integer(2)));
            assert_eq!(area.exact, Some(Expr::constant(32, 3)));
            assert!((area.approx - 32.0 / 3.0).abs() < 1e-9);
        }
        other => panic!("expected a computed area, got {other:?}"),
    }
}

#[test]
fn area_below_the_axis_is_positive() {
    let report = area_under_curves(&[AreaRequest::between(
        "y=-3",
        Expr::integer(1),
        Expr::integer(4),
    )]);
    assert_eq!(computed(&report.entries[0]).exact, Some(Expr::integer(9)));
}

#[test]
fn transcendental_area_is_a_decimal() {
    let report = area_under_curves(&[AreaRequest::between("y=sinx", Expr::integer(0), Expr::Pi)]);
    let area = computed(&report.entries[0]);
    assert!((area.approx - 2.0).abs() < 1e-9);

    let report = area_under_curves(&[AreaRequest::between(
        "y=e^x",
        Expr::integer(0),
        Expr::integer(1),
    )]);
    let area = computed(&report.entries[0]);
    assert!(area.exact.is_none());
    assert!((area.approx - (std::f64::consts::E - 1.0)).abs() < 1e-9);
}

#[test]
fn failing_equations_are_skipped() {
    let report = area_under_curves(&[
        AreaRequest::inferred("y=x^2+1"),
        AreaRequest::inferred("y=x"),
        AreaRequest::between("y=x", Expr::integer(2), Expr::integer(0)),
        AreaRequest::between("y=1/x", Expr::integer(0), Expr::integer(1)),
        AreaRequest::inferred("y=x +"),
    ]);
    assert_eq!(
        skip_reason(&report.entries[0]),
        &OperationError::BoundInference { intercepts: 0 }
    );
    assert_eq!(
        skip_reason(&report.entries[1]),
        &OperationError::BoundInference { intercepts: 1 }
    );
    assert_eq!(
        skip_reason(&report.entries[2]),
        &OperationError::InvalidBounds { lower: 2.0, upper: 0.0 }
    );
    assert!(matches!(skip_reason(&report.entries[3]), OperationError::Evaluation(_)));
    assert!(matches!(skip_reason(&report.entries[4]), OperationError::Parse(_)));
    assert_eq!(report.total.approx, 0.0);
}

#[test]
fn total_sums_the_computed_areas() {
    let report = area_under_curves(&[
        AreaRequest::between("y=x", Expr::integer(0), Expr::integer(2)),
        AreaRequest::inferred("y=x^2+1"),
        AreaRequest::inferred("y=x^2-4"),
    ]);
    assert_eq!(report.entries.len(), 3);
    assert_eq!(report.total.exact, Some(Expr::constant(38, 3)));
    assert!((report.total.approx - 38.0 / 3.0).abs() < 1e-9);

    let text = report.to_string();
    assert!(text.starts_with("y=x from 0 to 2: 2\n"), "{text}");
    assert!(text.ends_with("Total area: 38/3 ≈ 12.666667"), "{text}");
}
