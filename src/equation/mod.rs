//! Recognition of informally written `y=<rhs>` equations.
//!
//! Input first goes through [`preprocess`], which settles spacing, bracketless
//! function calls and unbalanced parentheses. The cleaned right-hand side is then
//! offered to an ordered table of whole-string recognizers in [`classify`]. The
//! polynomial extractor in [`coefficients`] follows, and in general mode so does
//! the free-form expression parser. [`normalize`] lifts the result into a single
//! symbolic expression.

pub mod classify;
pub mod coefficients;
pub mod normalize;
pub mod preprocess;

use std::fmt;

use crate::expr::{Expr, Rational};
use thiserror::Error;

pub use normalize::{CanonicalExpression, canonical};
pub use preprocess::{Preprocessed, preprocess};

/// Highest polynomial degree the fixed-kind cascade accepts.
pub const MAX_POLYNOMIAL_DEGREE: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EquationKind {
    Linear,
    Quadratic,
    Cubic,
    Quartic,
    Reciprocal,
    Exponential,
    Logarithmic,
    Trigonometric,
    InverseTrigonometric,
    Symbolic,
}

impl fmt::Display for EquationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EquationKind::Linear => "linear",
            EquationKind::Quadratic => "quadratic",
            EquationKind::Cubic => "cubic",
            EquationKind::Quartic => "quartic",
            EquationKind::Reciprocal => "reciprocal",
            EquationKind::Exponential => "exponential",
            EquationKind::Logarithmic => "logarithmic",
            EquationKind::Trigonometric => "trigonometric",
            EquationKind::InverseTrigonometric => "inverse trigonometric",
            EquationKind::Symbolic => "symbolic",
        };
        f.write_str(name)
    }
}

/// Base of an exponential or logarithm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Base {
    E,
    Real(Rational),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrigFunction {
    Sin,
    Cos,
    Tan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InverseTrigFunction {
    Arcsin,
    Arccos,
    Arctan,
}

/// Kind-specific data of a parsed equation. The variant determines the kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Linear { m: Rational, b: Rational },
    /// Coefficients, highest power first; length is degree + 1.
    Polynomial(Vec<Rational>),
    /// `numerator / var^exponent`
    Reciprocal { numerator: Rational, exponent: u32 },
    /// `base^(rate * var)`
    Exponential { base: Base, rate: Rational },
    Logarithmic { base: Base },
    Trigonometric(TrigFunction),
    InverseTrigonometric(InverseTrigFunction),
    Symbolic(Expr),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEquation {
    pub dependent_var: char,
    pub independent_var: char,
    pub payload: Payload,
}

impl ParsedEquation {
    pub fn kind(&self) -> EquationKind {
        match &self.payload {
            Payload::Linear { .. } => EquationKind::Linear,
            Payload::Polynomial(coeffs) => match coeffs.len() {
                0..=2 => EquationKind::Linear,
                3 => EquationKind::Quadratic,
                4 => EquationKind::Cubic,
                _ => EquationKind::Quartic,
            },
            Payload::Reciprocal { .. } => EquationKind::Reciprocal,
            Payload::Exponential { .. } => EquationKind::Exponential,
            Payload::Logarithmic { .. } => EquationKind::Logarithmic,
            Payload::Trigonometric(_) => EquationKind::Trigonometric,
            Payload::InverseTrigonometric(_) => EquationKind::InverseTrigonometric,
            Payload::Symbolic(_) => EquationKind::Symbolic,
        }
    }

    /// Polynomial coefficients, highest power first, for the linear and polynomial kinds.
    pub fn coefficients(&self) -> Option<Vec<Rational>> {
        match &self.payload {
            Payload::Linear { m, b } => Some(vec![m.clone(), b.clone()]),
            Payload::Polynomial(coeffs) => Some(coeffs.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("invalid equation: {0}")]
    Syntax(String),
    #[error("polynomial degree {degree} exceeds the supported maximum of {MAX_POLYNOMIAL_DEGREE}")]
    DegreeExceeded { degree: usize },
    #[error("expression has no free variable")]
    NoVariable,
    #[error("expression has more than one free variable: {0:?}")]
    MultipleVariables(Vec<char>),
    #[error("invalid base: {0}")]
    InvalidBase(String),
}

/// Which cascade [`try_parse_equation`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParseMode {
    /// Recognizers and the polynomial extractor only.
    #[default]
    Fixed,
    /// Falls through to the free-form expression parser.
    General,
}

/// Parse with the fixed-kind cascade; `None` when nothing matches.
pub fn parse_equation(input: &str) -> Option<ParsedEquation> {
    try_parse_equation(input, ParseMode::Fixed).ok()
}

/// Parse with the free-form fallback enabled; `None` when nothing matches.
pub fn parse_equation_general(input: &str) -> Option<ParsedEquation> {
    try_parse_equation(input, ParseMode::General).ok()
}

pub fn try_parse_equation(input: &str, mode: ParseMode) -> Result<ParsedEquation, ParseError> {
    let Preprocessed { dependent_var, rhs } = preprocess(input)?;
    let (independent_var, payload) = classify::classify(&rhs, mode).inspect_err(|err| {
        log::debug!("rejected {input:?}: {err}");
    })?;
    Ok(ParsedEquation {
        dependent_var,
        independent_var,
        payload,
    })
}
