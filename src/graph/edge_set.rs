//! Immutable edge-set snapshots

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::graph::edge::{EdgePair, NodeId};

/// Sorted, deduplicated set of directed records.
///
/// Every pass reads one `EdgeSet` and produces a brand-new one; nothing mutates a set
/// once it has been built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeSet {
    pairs: Vec<EdgePair>,

    /// Number of undirected edges announced by the producer
    declared_edges: u64,
}

impl EdgeSet {
    /// Sort and deduplicate arbitrary records in parallel
    pub(crate) fn from_unsorted(mut pairs: Vec<EdgePair>, declared_edges: u64) -> Self {
        pairs.par_sort_unstable();
        pairs.dedup();
        Self { pairs, declared_edges }
    }

    /// Build the symmetric working set for an undirected graph.
    ///
    /// Self loops are dropped, both directed halves of every edge are stored, and
    /// isolated nodes that also appear in an edge lose their sentinel record. The
    /// declared edge count is the number of distinct undirected edges.
    pub fn from_undirected<I, J>(edges: I, isolated: J) -> Self
    where
        I: IntoIterator<Item = (NodeId, NodeId)>,
        J: IntoIterator<Item = NodeId>,
    {
        let mut pairs = Vec::new();
        for (u, v) in edges {
            if u == v {
                continue;
            }
            pairs.push(EdgePair::new(u, v));
            pairs.push(EdgePair::new(v, u));
        }

        pairs.par_sort_unstable();
        pairs.dedup();
        let connected: BTreeSet<NodeId> = pairs.iter().map(|p| p.node).collect();
        let declared_edges = (pairs.len() / 2) as u64;

        for node in isolated {
            if !connected.contains(&node) {
                pairs.push(EdgePair::isolated(node));
            }
        }

        Self::from_unsorted(pairs, declared_edges)
    }

    pub fn pairs(&self) -> &[EdgePair] {
        &self.pairs
    }

    pub fn into_pairs(self) -> Vec<EdgePair> {
        self.pairs
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    pub fn declared_edges(&self) -> u64 {
        self.declared_edges
    }

    /// Undirected edges in visitation order; position in this iterator is the edge ordinal
    pub fn undirected_edges(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        self.pairs
            .iter()
            .filter(|p| !p.is_isolated() && p.node < p.neighbor)
            .map(|p| (p.node, p.neighbor))
    }

    /// Every node mentioned as a key or as a real neighbour
    pub fn nodes(&self) -> BTreeSet<NodeId> {
        let mut nodes = BTreeSet::new();
        for pair in &self.pairs {
            nodes.insert(pair.node);
            if !pair.is_isolated() {
                nodes.insert(pair.neighbor);
            }
        }
        nodes
    }

    /// True when every `(u, v)` has its `(v, u)` counterpart
    pub fn is_symmetric(&self) -> bool {
        self.pairs
            .par_iter()
            .filter(|p| !p.is_isolated())
            .all(|p| self.pairs.binary_search(&p.reversed()).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_undirected_symmetrizes_and_counts() {
        let set = EdgeSet::from_undirected(vec![(1, 2), (2, 3), (3, 2), (4, 4)], vec![9, 2]);
        assert!(set.is_symmetric());
        assert_eq!(set.declared_edges(), 2);
        assert_eq!(
            set.pairs(),
            &[
                EdgePair::new(1, 2),
                EdgePair::new(2, 1),
                EdgePair::new(2, 3),
                EdgePair::new(3, 2),
                EdgePair::isolated(9),
            ]
        );
    }

    #[test]
    fn test_undirected_edges_are_visited_in_order() {
        let set = EdgeSet::from_undirected(vec![(4, 5), (2, 3), (1, 2)], Vec::new());
        let edges: Vec<_> = set.undirected_edges().collect();
        assert_eq!(edges, vec![(1, 2), (2, 3), (4, 5)]);
    }

    #[test]
    fn test_asymmetric_set_is_detected() {
        let set = EdgeSet::from_unsorted(vec![EdgePair::new(1, 2)], 1);
        assert!(!set.is_symmetric());
    }

    #[test]
    fn test_nodes_include_neighbors_and_isolated() {
        let set = EdgeSet::from_undirected(vec![(1, 2)], vec![7]);
        assert_eq!(set.nodes().into_iter().collect::<Vec<_>>(), vec![1, 2, 7]);
    }
}
