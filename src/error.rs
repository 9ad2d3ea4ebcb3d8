//! Error types shared across the crate.

use thiserror::Error;

/// Errors raised while building inputs for, or driving, the optimizer.
///
/// Reaching the iteration cap is not an error; it is reported through
/// [`Termination::Capped`](crate::two_opt::Termination::Capped).
#[derive(Debug, Error)]
pub enum TspError {
    /// Node count is zero, or the supplied grid/tour does not match it.
    #[error("invalid dimension: {0}")]
    InvalidDimension(String),

    /// A matrix lookup outside `[0, n)`.
    #[error("index ({row}, {col}) out of range for {size} nodes")]
    OutOfRange {
        /// Requested row (origin node).
        row: usize,
        /// Requested column (destination node).
        col: usize,
        /// Number of nodes in the matrix.
        size: usize,
    },

    /// A start tour that is not a permutation of `[0, n)`.
    #[error("invalid tour: {0}")]
    InvalidTour(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed instance text. `line` is 1-based.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TspError>;
