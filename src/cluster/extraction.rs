//! Collapse a converged edge set into cluster assignments

use std::collections::BTreeMap;

use dashmap::DashMap;
use log;
use rayon::prelude::*;
use serde::{Serialize, Deserialize};

use crate::cluster::Cluster;
use crate::convergence::Converged;
use crate::graph::{EdgeSet, NodeId};

/// Per-node labels and the clusters they form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSummary {
    /// Cluster label of every node
    pub labels: BTreeMap<NodeId, NodeId>,

    /// Clusters, largest first
    pub clusters: Vec<Cluster>,

    pub cluster_count: usize,
    pub node_count: usize,
}

impl ClusterSummary {
    pub fn label_of(&self, node: NodeId) -> Option<NodeId> {
        self.labels.get(&node).copied()
    }
}

/// Build clusters from a converged edge set
pub fn extract_clusters(converged: &Converged) -> ClusterSummary {
    extract_from_edges(&converged.edges)
}

/// Build clusters from `(node, label)` records.
///
/// Each record assigns `node` and `label` to the cluster named by the smaller of the two;
/// isolated records become singleton clusters.
pub fn extract_from_edges(edges: &EdgeSet) -> ClusterSummary {
    let labels: DashMap<NodeId, NodeId> = DashMap::with_capacity(edges.len());

    edges.pairs().par_iter().for_each(|pair| {
        if pair.is_isolated() {
            assign(&labels, pair.node, pair.node);
        } else {
            let label = pair.node.min(pair.neighbor);
            assign(&labels, pair.node, label);
            assign(&labels, pair.neighbor, label);
        }
    });

    // Group nodes by label
    let members: DashMap<NodeId, Vec<NodeId>> = DashMap::new();
    labels.par_iter().for_each(|entry| {
        members.entry(*entry.value()).or_default().push(*entry.key());
    });

    let mut clusters: Vec<Cluster> = members
        .into_iter()
        .map(|(label, mut nodes)| {
            nodes.sort_unstable();
            Cluster { label, size: nodes.len(), members: nodes }
        })
        .collect();

    // Sort clusters by size (largest first), then by label
    clusters.sort_by(|a, b| b.size.cmp(&a.size).then(a.label.cmp(&b.label)));

    let labels: BTreeMap<NodeId, NodeId> = labels.into_iter().collect();

    log::debug!("Extracted {} clusters over {} nodes", clusters.len(), labels.len());

    ClusterSummary {
        cluster_count: clusters.len(),
        node_count: labels.len(),
        labels,
        clusters,
    }
}

fn assign(labels: &DashMap<NodeId, NodeId>, node: NodeId, label: NodeId) {
    labels
        .entry(node)
        .and_modify(|current| *current = (*current).min(label))
        .or_insert(label);
}
