//! Drop one undirected edge from a snapshot

use log;
use rayon::prelude::*;

use crate::error::{Result, StarError};
use crate::graph::{EdgePair, EdgeSet, NodeId};

/// A snapshot with one edge taken out
#[derive(Debug, Clone)]
pub struct Removal {
    pub edges: EdgeSet,

    /// The dropped edge, `None` when the ordinal was past the last edge
    pub removed: Option<(NodeId, NodeId)>,

    /// Undirected edges visited while matching the ordinal
    pub visited: u64,
}

/// Remove the undirected edge with the given ordinal.
///
/// Ordinals follow [`EdgeSet::undirected_edges`]. Both directed halves are dropped, and an
/// endpoint left without neighbours is kept as an isolated node. Ordinals between the
/// snapshot's actual edge count and the declared count remove nothing.
pub fn remove_edge(snapshot: &EdgeSet, ordinal: u64) -> Result<Removal> {
    let declared = snapshot.declared_edges();
    if ordinal > declared {
        return Err(StarError::OrdinalExhausted { ordinal, declared });
    }

    let mut removed = None;
    let mut visited = 0u64;
    for edge in snapshot.undirected_edges() {
        if visited == ordinal && removed.is_none() {
            removed = Some(edge);
        }
        visited += 1;
    }

    let Some((u, v)) = removed else {
        log::debug!("ordinal {} matches no edge ({} visited)", ordinal, visited);
        return Ok(Removal {
            edges: snapshot.clone(),
            removed: None,
            visited,
        });
    };

    let forward = EdgePair::new(u, v);
    let backward = forward.reversed();
    let mut remaining: Vec<EdgePair> = snapshot
        .pairs()
        .par_iter()
        .filter(|p| **p != forward && **p != backward)
        .copied()
        .collect();

    // Look up both endpoints before pushing; the sentinels would break the sort order
    let stranded: Vec<NodeId> = [u, v]
        .into_iter()
        .filter(|endpoint| remaining.binary_search_by_key(endpoint, |p| p.node).is_err())
        .collect();
    remaining.extend(stranded.into_iter().map(EdgePair::isolated));

    log::debug!("dropped edge ({}, {}) at ordinal {}", u, v, ordinal);

    Ok(Removal {
        edges: EdgeSet::from_unsorted(remaining, declared),
        removed: Some((u, v)),
        visited,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::extract_clusters;
    use crate::convergence::{ConvergenceController, DEFAULT_MAX_ITERATIONS};

    fn snapshot() -> EdgeSet {
        EdgeSet::from_undirected(vec![(1, 2), (2, 3), (4, 5)], Vec::new())
    }

    #[test]
    fn test_removes_both_halves() {
        let removal = remove_edge(&snapshot(), 1).unwrap();
        assert_eq!(removal.removed, Some((2, 3)));
        assert_eq!(removal.visited, 3);
        assert_eq!(
            removal.edges.pairs(),
            &[
                EdgePair::new(1, 2),
                EdgePair::new(2, 1),
                EdgePair::isolated(3),
                EdgePair::new(4, 5),
                EdgePair::new(5, 4),
            ]
        );
        assert!(removal.edges.is_symmetric());
    }

    #[test]
    fn test_stranded_endpoints_become_isolated() {
        let removal = remove_edge(&snapshot(), 2).unwrap();
        assert_eq!(removal.removed, Some((4, 5)));
        let isolated: Vec<_> = removal
            .edges
            .pairs()
            .iter()
            .filter(|p| p.is_isolated())
            .map(|p| p.node)
            .collect();
        assert_eq!(isolated, vec![4, 5]);
    }

    #[test]
    fn test_ordinal_at_declared_count_removes_nothing() {
        let snapshot = snapshot();
        let removal = remove_edge(&snapshot, 3).unwrap();
        assert_eq!(removal.removed, None);
        assert_eq!(removal.edges, snapshot);
    }

    #[test]
    fn test_ordinal_past_declared_count_fails() {
        let err = remove_edge(&snapshot(), 4).unwrap_err();
        assert!(matches!(err, StarError::OrdinalExhausted { ordinal: 4, declared: 3 }));
    }

    #[test]
    fn test_declared_count_survives_removal() {
        let removal = remove_edge(&snapshot(), 0).unwrap();
        assert_eq!(removal.edges.declared_edges(), 3);
        assert_eq!(removal.edges.undirected_edges().count(), 2);
    }

    #[test]
    fn test_stranding_only_lower_endpoint_keeps_neighbors_intact() {
        // Path 0 - 2 - 1: dropping (0, 2) strands 0 while 2 keeps its edge to 1
        let path = EdgeSet::from_undirected(vec![(0, 2), (1, 2)], Vec::new());
        let removal = remove_edge(&path, 0).unwrap();
        assert_eq!(removal.removed, Some((0, 2)));

        let isolated: Vec<NodeId> = removal
            .edges
            .pairs()
            .iter()
            .filter(|p| p.is_isolated())
            .map(|p| p.node)
            .collect();
        assert_eq!(isolated, vec![0]);
        assert!(removal.edges.is_symmetric());
        assert_eq!(
            removal.edges.pairs(),
            &[
                EdgePair::isolated(0),
                EdgePair::new(1, 2),
                EdgePair::new(2, 1),
            ]
        );

        let converged = ConvergenceController::new(DEFAULT_MAX_ITERATIONS, 1)
            .unwrap()
            .converge(&removal.edges)
            .unwrap();
        assert_eq!(extract_clusters(&converged).cluster_count, 2);
    }
}
