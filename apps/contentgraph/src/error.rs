//! # Service Errors
//!
//! Top-level error umbrella for the binary: server/CLI failures that
//! bubble up to `main`. Component-specific errors (`GraphError`,
//! `PipelineError`) live with their modules and convert into this.

use crate::graph::GraphError;
use crate::pipeline::PipelineError;
use thiserror::Error;

/// Errors surfaced by CLI commands and the server runtime.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Socket bind / serve / file I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Graph store connection or bootstrap failure.
    #[error(transparent)]
    Graph(#[from] GraphError),

    /// Writer pipeline terminated abnormally.
    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// Input file could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),
}
