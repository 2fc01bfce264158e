//! Error types shared by every pass

use thiserror::Error;

use crate::graph::NodeId;

/// Failures raised while contracting, extracting or searching
#[derive(Debug, Error)]
pub enum StarError {
    /// A contraction pass could not run to completion
    #[error("pass failed: {0}")]
    PassFailure(String),

    /// The round cap was reached while pairs were still changing
    #[error("no convergence after {rounds} rounds ({last_changes} changes in the last round)")]
    NonConvergence { rounds: usize, last_changes: u64 },

    /// An edge ordinal past the declared edge count was requested
    #[error("edge ordinal {ordinal} exceeds the declared edge count {declared}")]
    OrdinalExhausted { ordinal: u64, declared: u64 },

    /// A reduction group arrived unsorted or with mixed sentinel records
    #[error("malformed group for node {node}: {reason}")]
    MalformedGroup { node: NodeId, reason: String },

    /// The removal search stopped at `ordinal`; the last accepted snapshot is still available
    #[error("edge removal search aborted at ordinal {ordinal} (best cluster count {best_count})")]
    SearchAborted {
        ordinal: u64,
        best_count: usize,
        #[source]
        source: Box<StarError>,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("storage error: {0}")]
    Storage(String),
}

impl From<rayon::ThreadPoolBuildError> for StarError {
    fn from(err: rayon::ThreadPoolBuildError) -> Self {
        StarError::PassFailure(format!("could not build worker pool: {}", err))
    }
}

impl From<serde_json::Error> for StarError {
    fn from(err: serde_json::Error) -> Self {
        StarError::Storage(err.to_string())
    }
}

impl From<bincode::Error> for StarError {
    fn from(err: bincode::Error) -> Self {
        StarError::Storage(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, StarError>;
