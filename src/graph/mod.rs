//! Edge pair model: records, snapshots and the grouping primitive

pub mod edge;
pub mod edge_set;
pub mod shuffle;

pub use edge::{EdgePair, NodeId, NO_NEIGHBOR};
pub use edge_set::EdgeSet;
pub use shuffle::NeighborGroup;
