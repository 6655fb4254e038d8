use crate::calculus::integrate::{AttemptStatus, IntegrationAttempt, IntegrationResult};
use crate::format::expr::pretty;

/// Describe an integration run: the antiderivative (or failure reason), then one line per strategy tried.
pub fn pretty_integration_result(result: &IntegrationResult) -> Vec<String> {
    let report = result.report();
    let mut lines = match result {
        IntegrationResult::Integrated { result, .. } => vec![format!("∫ = {} + C", pretty(result))],
        IntegrationResult::NotIntegrable(report) => vec![match &report.reason {
            Some(reason) => format!("no elementary antiderivative found ({reason:?})"),
            None => "no elementary antiderivative found".to_string(),
        }],
    };
    lines.push(format!("integrand: {:?}", report.kind));
    lines.extend(report.attempts.iter().map(describe_attempt));
    lines
}

fn describe_attempt(attempt: &IntegrationAttempt) -> String {
    let status = match &attempt.status {
        AttemptStatus::Succeeded => "ok".to_string(),
        AttemptStatus::NotApplicable => "n/a".to_string(),
        AttemptStatus::HitLimit { size, limit } => format!("skipped, size {size} > {limit}"),
    };
    match &attempt.note {
        Some(note) => format!("  {:?}: {status} [{note}]", attempt.strategy),
        None => format!("  {:?}: {status}", attempt.strategy),
    }
}
