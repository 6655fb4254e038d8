//! String-based convenience API for quick experimentation.

pub use crate::equation::{parse_equation, parse_equation_general};
pub use crate::ui::{area, diff, inte, max, min, norm, normalize, parse, solve, stationary, tex};
