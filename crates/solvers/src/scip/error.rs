use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Failures specific to running the SCIP executable.
#[derive(Debug, Error)]
pub enum ScipError {
    #[error("SCIP executable not found: {}", .program.display())]
    NotFound { program: PathBuf },

    #[error("SCIP exited with {status}: {stderr}")]
    Failed { status: ExitStatus, stderr: String },

    #[error("SCIP wrote no solution file")]
    MissingSolution,

    #[error("unexpected SCIP status: {0}")]
    UnexpectedStatus(String),
}
