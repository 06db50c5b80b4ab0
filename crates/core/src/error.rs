//! Error types for heatfield

use thiserror::Error;

/// Main error type for heatfield operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("output surface has zero area: {width}x{height}")]
    EmptySurface { width: u32, height: u32 },

    #[error("pixel index out of bounds: ({x}, {y}) in buffer of size ({width}, {height})")]
    PixelOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("invalid option: {name} = {value} ({reason})")]
    InvalidOption {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

/// Result type alias for heatfield operations
pub type Result<T> = std::result::Result<T, Error>;

/// Failure of the geostatistical estimator on degenerate input.
///
/// Recovered locally by the fallback renderer, never surfaced to callers
/// of the redraw pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EstimationError {
    #[error("too few training points: got {got}, need at least {need}")]
    TooFewPoints { got: usize, need: usize },

    #[error("kriging system is singular")]
    SingularSystem,
}
