//! Structural checks on extracted clusters

use std::collections::{BTreeMap, BTreeSet};

use log;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::UnGraphMap;
use serde::{Serialize, Deserialize};

use crate::cluster::ClusterSummary;
use crate::graph::{EdgeSet, NodeId};

/// Outcome of checking clusters against the graph they came from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub ok: bool,

    /// Clusters examined
    pub checked: usize,

    /// Connected components found directly in the graph
    pub components: usize,

    /// Labels of clusters that failed a check
    pub malformed: Vec<NodeId>,

    /// Graph nodes without a cluster, or cluster members missing from the graph
    pub unassigned: Vec<NodeId>,
}

/// Check that every cluster is exactly one connected component of `graph`, labelled
/// by its minimum member.
pub fn validate_clusters(graph: &EdgeSet, summary: &ClusterSummary) -> ValidationReport {
    let mut g: UnGraphMap<NodeId, ()> = UnGraphMap::new();
    for pair in graph.pairs() {
        if pair.is_isolated() {
            g.add_node(pair.node);
        } else if pair.node < pair.neighbor {
            g.add_edge(pair.node, pair.neighbor, ());
        }
    }

    let mut malformed: BTreeSet<NodeId> = BTreeSet::new();

    let unassigned: Vec<NodeId> = g
        .nodes()
        .filter(|n| !summary.labels.contains_key(n))
        .chain(summary.labels.keys().copied().filter(|n| !g.contains_node(*n)))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    for cluster in &summary.clusters {
        if cluster.members.first() != Some(&cluster.label) || cluster.size != cluster.members.len() {
            malformed.insert(cluster.label);
        }
    }

    // A cluster spread over several components is disconnected; a component holding
    // several labels has an edge crossing clusters
    let components = tarjan_scc(&g);
    let mut pieces: BTreeMap<NodeId, usize> = BTreeMap::new();
    for component in &components {
        let labels: BTreeSet<NodeId> = component
            .iter()
            .filter_map(|n| summary.label_of(*n))
            .collect();
        if labels.len() > 1 {
            malformed.extend(labels.iter().copied());
        }
        for label in labels {
            *pieces.entry(label).or_insert(0) += 1;
        }
    }
    malformed.extend(pieces.into_iter().filter(|(_, n)| *n > 1).map(|(label, _)| label));

    let ok = malformed.is_empty() && unassigned.is_empty();
    if ok {
        log::info!("Validation passed for {} clusters", summary.clusters.len());
    } else {
        log::warn!(
            "Validation found {} malformed clusters and {} unassigned nodes",
            malformed.len(),
            unassigned.len()
        );
    }

    ValidationReport {
        ok,
        checked: summary.clusters.len(),
        components: components.len(),
        malformed: malformed.into_iter().collect(),
        unassigned,
    }
}
