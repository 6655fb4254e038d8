use crate::expr::Expr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrandKind {
    Polynomial,
    Rational,
    Trig,
    InverseTrig,
    Exponential,
    Logarithmic,
    Product,
    Sum,
    NonElementary(NonElementaryKind),
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonElementaryKind {
    ExpOfPolynomial,
    TrigOverArgument,
    ExpOverArgument,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReasonCode {
    UnknownStructure,
    NonElementary(NonElementaryKind),
    SizeLimit(usize),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    Direct,
    Substitution,
    PartialFractions,
    IntegrationByParts,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttemptStatus {
    Succeeded,
    NotApplicable,
    HitLimit { size: usize, limit: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrationAttempt {
    pub strategy: Strategy,
    pub status: AttemptStatus,
    pub note: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntegrandReport {
    pub kind: IntegrandKind,
    pub reason: Option<ReasonCode>,
    pub attempts: Vec<IntegrationAttempt>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IntegrationResult {
    Integrated {
        result: Expr,
        report: IntegrandReport,
    },
    NotIntegrable(IntegrandReport),
}

impl IntegrationResult {
    /// The antiderivative, when one was found.
    pub fn antiderivative(&self) -> Option<&Expr> {
        match self {
            IntegrationResult::Integrated { result, .. } => Some(result),
            IntegrationResult::NotIntegrable(_) => None,
        }
    }

    pub fn report(&self) -> &IntegrandReport {
        match self {
            IntegrationResult::Integrated { report, .. } | IntegrationResult::NotIntegrable(report) => {
                report
            }
        }
    }
}
