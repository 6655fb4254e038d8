//! String-based helpers: raw equation in, display text out.

use crate::equation::{
    CanonicalExpression, ParseMode, ParsedEquation, canonical, try_parse_equation,
};
use crate::format::{latex, pretty};
use crate::operations::{
    self, AreaReport, AreaRequest, Extrema, OperationError, area_under_curves,
};

/// Parse with the free-form fallback enabled.
pub fn parse(input: &str) -> Result<ParsedEquation, OperationError> {
    Ok(try_parse_equation(input, ParseMode::General)?)
}

pub fn normalize(input: &str) -> Result<CanonicalExpression, OperationError> {
    Ok(canonical(&parse(input)?))
}

/// Canonical form as plain text.
pub fn norm(input: &str) -> Result<String, OperationError> {
    let equation = normalize(input)?;
    Ok(pretty(&equation.expr))
}

/// Canonical form as LaTeX.
pub fn tex(input: &str) -> Result<String, OperationError> {
    let equation = normalize(input)?;
    Ok(latex(&equation.expr))
}

pub fn solve(input: &str) -> Result<String, OperationError> {
    Ok(operations::solve(&normalize(input)?)?.to_string())
}

pub fn diff(input: &str) -> Result<String, OperationError> {
    let equation = normalize(input)?;
    let derivative = operations::derivative(&equation)?;
    Ok(format!("d/d{} = {}", equation.var, pretty(&derivative)))
}

pub fn inte(input: &str) -> Result<String, OperationError> {
    let equation = normalize(input)?;
    let integral = operations::integral(&equation)?;
    Ok(format!("∫ d{} = {} + C", equation.var, pretty(&integral)))
}

pub fn max(input: &str) -> Result<String, OperationError> {
    Ok(describe_extrema(operations::maximum(&normalize(input)?)?, "maximum"))
}

pub fn min(input: &str) -> Result<String, OperationError> {
    Ok(describe_extrema(operations::minimum(&normalize(input)?)?, "minimum"))
}

fn describe_extrema(extrema: Extrema, label: &str) -> String {
    match extrema {
        Extrema::NotApplicable => format!("A straight line has no {label}"),
        Extrema::None => format!("No {label}"),
        Extrema::Points(points) => points
            .iter()
            .map(|p| format!("{label} at ({}, {})", p.x, p.y))
            .collect::<Vec<_>>()
            .join("\n"),
    }
}

pub fn stationary(input: &str) -> Result<String, OperationError> {
    let equation = normalize(input)?;
    let analysis = operations::stationary_points(&equation)?;
    let mut lines = vec![
        format!("f'({}) = {}", equation.var, pretty(&analysis.first_derivative)),
        format!("f''({}) = {}", equation.var, pretty(&analysis.second_derivative)),
    ];
    if analysis.points.is_empty() {
        lines.push("No stationary points".to_string());
    }
    lines.extend(analysis.points.iter().map(ToString::to_string));
    Ok(lines.join("\n"))
}

/// Area report over a snapshot of equations, each with optional bounds.
pub fn area(requests: &[AreaRequest]) -> AreaReport {
    area_under_curves(requests)
}
