//! Equation recognition and exact symbolic analysis for a graphing calculator.
//!
//! Informal input such as `y=2x^2+3x-5`, `y=log[2]x` or `y=e^3x` is classified into a
//! typed [`ParsedEquation`], lifted to a [`CanonicalExpression`], and handed to the
//! operations: intercepts, derivative, integral, extrema, stationary points and area.

pub mod calculus;
pub mod equation;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod operations;
pub mod parser;
pub mod plot;
pub mod polynomial;
pub mod prelude;
pub mod simplify;
pub mod solver;
pub mod ui;

pub use calculus::{
    AttemptStatus, IntegrandKind, IntegrandReport, IntegrationAttempt, IntegrationResult,
    NonElementaryKind, ReasonCode, Strategy, differentiate, integrate,
};
pub use equation::{
    Base, CanonicalExpression, EquationKind, InverseTrigFunction, ParseError, ParseMode,
    ParsedEquation, Payload, TrigFunction, canonical, parse_equation, parse_equation_general,
    try_parse_equation,
};
pub use error::{CasError, Result};
pub use eval::{eval_at, eval_constant};
pub use expr::{Expr, Rational, add, div, mul, neg, one, pow, rational, sub, zero};
pub use format::{latex, pretty, pretty_integration_result};
pub use operations::{
    AreaEntry, AreaReport, AreaRequest, CriticalPoint, Extrema, Intercepts, Nature,
    OperationError, StationaryAnalysis, Value, YIntercept, area_under_curves, derivative,
    integral, maximum, minimum, solve, stationary_points,
};
pub use parser::parse_expr;
pub use plot::{PlotSettings, Segment, sample};
pub use polynomial::{Poly, Root};
pub use simplify::{evaluate_at, simplify, simplify_fully, simplify_with_limit, substitute};
pub use solver::{Solution, solve_zeros};
