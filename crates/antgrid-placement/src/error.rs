//! Placement error types.

use antgrid_core::ConfigError;
use thiserror::Error;

/// Errors raised before a run starts or when mapping results back.
///
/// An infeasible problem is not an error; see
/// [`ColonyOutcome::Infeasible`](crate::ColonyOutcome::Infeasible).
#[derive(Debug, Error)]
pub enum PlacementError {
    #[error("invalid colony configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("node pool is empty")]
    NoNodes,

    #[error("no workloads to place")]
    NoWorkloads,

    #[error("assignment does not match the problem: {0}")]
    InvalidAssignment(String),
}

pub type PlacementResult<T> = Result<T, PlacementError>;
