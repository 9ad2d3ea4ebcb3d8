//! 2-opt configuration.

use crate::error::{Result, TspError};

/// Default improvement tolerance. A move must shorten the tour by more
/// than this to be accepted.
pub const DEFAULT_EPSILON: f64 = 1e-10;

/// Default hard cap on the number of applied moves.
pub const MAX_ITERATIONS: usize = 10_000;

/// Configuration for [`TwoOptRunner`](super::TwoOptRunner).
///
/// # Examples
///
/// ```
/// use u_twoopt::two_opt::TwoOptConfig;
///
/// let config = TwoOptConfig::default()
///     .with_epsilon(1e-9)
///     .with_max_iterations(500);
/// assert_eq!(config.max_iterations, 500);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TwoOptConfig {
    /// Tolerance below which a move is not considered improving: a move is
    /// accepted only if its delta is `< -epsilon`.
    pub epsilon: f64,

    /// Maximum number of applied moves before the run stops as capped.
    pub max_iterations: usize,
}

impl Default for TwoOptConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            max_iterations: MAX_ITERATIONS,
        }
    }
}

impl TwoOptConfig {
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    pub fn with_max_iterations(mut self, n: usize) -> Self {
        self.max_iterations = n;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(TspError::InvalidConfig(format!(
                "epsilon must be finite and non-negative, got {}",
                self.epsilon
            )));
        }
        Ok(())
    }
}
