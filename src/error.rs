//! Error types for monte_carlo_pi

use std::io;
use thiserror::Error;

/// Errors raised at the argument boundary or while coordinating workers
#[derive(Error, Debug)]
pub enum MonteCarloError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("invalid sample count {0}: must be greater than zero")]
    InvalidSampleCount(i64),

    #[error("worker {0} stopped before reporting its partial result")]
    WorkerPanicked(usize),

    #[error("failed to spawn sampling thread for worker {worker}: {source}")]
    Spawn { worker: usize, source: io::Error },

    #[error("failed to start async runtime: {0}")]
    Runtime(#[from] io::Error),
}

pub type Result<T> = std::result::Result<T, MonteCarloError>;
