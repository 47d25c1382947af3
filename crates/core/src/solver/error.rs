use std::error::Error as StdError;

use thiserror::Error;

/// Errors that can occur while solving.
#[derive(Debug, Error)]
pub enum SolverError {
    #[error("model is nonconvex but nonconvex handling is disabled")]
    NonconvexDisabled,

    #[error("solver ran out of resources: {0}")]
    ResourceExhausted(String),

    #[error("unreadable solver output: {0}")]
    Output(String),

    #[error("I/O error while exchanging data with the solver")]
    Io(#[from] std::io::Error),

    #[error("solver backend failed: {0}")]
    Backend(#[source] Box<dyn StdError + Send + Sync>),
}

impl SolverError {
    /// Wraps a backend-specific error.
    pub fn backend<E: StdError + Send + Sync + 'static>(err: E) -> Self {
        Self::Backend(Box::new(err))
    }
}
