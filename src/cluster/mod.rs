//! Cluster extraction and checking

pub mod extraction;
pub mod reference;
pub mod validation;

use serde::{Serialize, Deserialize};

use crate::graph::NodeId;

pub use extraction::{extract_clusters, ClusterSummary};
pub use reference::{reference_labels, DisjointSets};
pub use validation::{validate_clusters, ValidationReport};

/// Represents a cluster (connected component) in the graph
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Minimum node identifier in the cluster
    pub label: NodeId,
    
    /// Members of this cluster, ascending
    pub members: Vec<NodeId>,
    
    /// Size of the cluster
    pub size: usize,
}
