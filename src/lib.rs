//! Connected components by alternating Large-Star / Small-Star contraction, plus an
//! exhaustive edge-removal search for edges that split clusters

pub mod config;
pub mod error;
pub mod data;
pub mod graph;
pub mod star;
pub mod convergence;
pub mod cluster;
pub mod search;
pub mod storage;

pub use config::Config;
pub use convergence::{ConvergenceController, ControllerOutcome, ControllerState, Converged};
pub use error::{Result, StarError};
pub use graph::{EdgePair, EdgeSet, NodeId, NO_NEIGHBOR};
pub use search::{CriticalEdge, EdgeRemovalSearch, SearchOutcome};
pub use star::{PassOutput, PassStats, StarMode};
