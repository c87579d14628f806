//! Configuration error types.

use thiserror::Error;

/// Reasons a [`ColonyConfig`](crate::ColonyConfig) is rejected before a run starts.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("iteration count must be positive")]
    ZeroIterations,

    #[error("ant count must be positive")]
    ZeroAnts,

    #[error("decay ratio must lie strictly between 0 and 1, got {0}")]
    InvalidDecayRatio(f64),

    #[error("raise ratio must be greater than 1, got {0}")]
    InvalidRaiseRatio(f64),
}
