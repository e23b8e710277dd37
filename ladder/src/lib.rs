//! Ladder lottery (amidakuji) core: rung generation and path tracing.
//!
//! DESIGN
//! ======
//! Two leaf components share only the data types defined here. The
//! generator produces a rung layout from line/level counts and a density;
//! the tracer walks a token down any layout and reports where it lands.
//! Neither calls the other, and neither performs I/O or keeps state between
//! calls. Randomness is always supplied by the caller.
//!
//! INVARIANTS
//! ==========
//! Within one level no two rungs share or neighbour a pair index. Every
//! layout the generator returns satisfies this, which is what makes the
//! start-to-end mapping a permutation.

pub mod generate;
pub mod layout;
pub mod render;
pub mod trace;

use serde::{Deserialize, Serialize};

pub use generate::{GenerateParams, GeneratorConfig, auto_density, generate, generate_seeded, resolve_density};
pub use layout::{LayoutError, check_bounds, validate_layout};
pub use render::render;
pub use trace::{Trace, permutation, trace};

/// Fewest vertical lines a ladder can have.
pub const MIN_LINES: usize = 2;
/// Default upper bound on vertical lines.
pub const DEFAULT_MAX_LINES: usize = 50;

// =============================================================================
// DATA MODEL
// =============================================================================

/// A horizontal connector joining lines `left` and `left + 1` at `level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rung {
    pub left: usize,
    #[serde(alias = "y")]
    pub level: usize,
}

impl Rung {
    #[must_use]
    pub fn new(left: usize, level: usize) -> Self {
        Self { left, level }
    }
}

/// One vertex of a traced polyline. `x` is the column, `y` the level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn at(column: usize, level: usize) -> Self {
        Self { x: column as f64, y: level as f64 }
    }
}

// =============================================================================
// ERRORS
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LadderError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("pair {pair} has {placed} of {required} required rungs and no eligible level is left")]
    Unsatisfiable { pair: usize, placed: usize, required: usize },
}

impl LadderError {
    /// Stable machine-readable code for this error.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidParameter(_) => "E_INVALID_PARAMETER",
            Self::Unsatisfiable { .. } => "E_UNSATISFIABLE",
        }
    }
}

pub(crate) fn invalid(message: impl Into<String>) -> LadderError {
    LadderError::InvalidParameter(message.into())
}

#[cfg(test)]
#[path = "lib_test.rs"]
mod tests;
