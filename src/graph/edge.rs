//! Edge records and their ordering

use serde::{Deserialize, Serialize};

/// Node identifier
pub type NodeId = u32;

/// Neighbour value marking an isolated node
pub const NO_NEIGHBOR: NodeId = NodeId::MAX;

/// A directed `(node, neighbor)` record.
///
/// The derived ordering compares `node` first and `neighbor` second, which is the
/// secondary-sort order every pass relies on: records with the same node end up
/// adjacent, with their neighbours ascending. Grouping only looks at `node`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgePair {
    pub node: NodeId,
    pub neighbor: NodeId,
}

impl EdgePair {
    pub fn new(node: NodeId, neighbor: NodeId) -> Self {
        Self { node, neighbor }
    }

    /// Record for a node with no neighbours
    pub fn isolated(node: NodeId) -> Self {
        Self { node, neighbor: NO_NEIGHBOR }
    }

    pub fn is_isolated(&self) -> bool {
        self.neighbor == NO_NEIGHBOR
    }

    /// The same edge pointing the other way
    pub fn reversed(&self) -> Self {
        Self { node: self.neighbor, neighbor: self.node }
    }
}

impl From<(NodeId, NodeId)> for EdgePair {
    fn from((node, neighbor): (NodeId, NodeId)) -> Self {
        Self { node, neighbor }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering_groups_by_node_then_neighbor() {
        let mut pairs = vec![
            EdgePair::new(2, 9),
            EdgePair::new(1, 5),
            EdgePair::new(2, 3),
            EdgePair::new(1, 4),
        ];
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                EdgePair::new(1, 4),
                EdgePair::new(1, 5),
                EdgePair::new(2, 3),
                EdgePair::new(2, 9),
            ]
        );
    }

    #[test]
    fn test_isolated_sorts_after_real_neighbors() {
        assert!(EdgePair::new(7, 1_000) < EdgePair::isolated(7));
        assert!(EdgePair::isolated(7).is_isolated());
    }
}
