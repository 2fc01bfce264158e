//! Group-by-key primitive with secondary sort
//!
//! Stands in for the shuffle stage of a bulk-synchronous job: mapped records are sorted
//! by `(node, neighbor)` and handed to reducers one node at a time, neighbours ascending.

use rayon::prelude::*;

use crate::graph::edge::{EdgePair, NodeId};

/// All records that share one node, neighbours in ascending order
#[derive(Debug, Clone, Copy)]
pub struct NeighborGroup<'a> {
    pub node: NodeId,
    pub records: &'a [EdgePair],
}

impl<'a> NeighborGroup<'a> {
    pub fn neighbors(&self) -> impl Iterator<Item = NodeId> + 'a {
        self.records.iter().map(|p| p.neighbor)
    }
}

/// Sort mapped records in place and split them into per-node groups.
///
/// Duplicates are kept; collapsing them is the reducer's job.
pub fn shuffle(records: &mut Vec<EdgePair>) -> Vec<NeighborGroup<'_>> {
    records.par_sort_unstable();
    group_sorted(records)
}

/// Split records that are already in secondary-sort order
pub fn group_sorted(records: &[EdgePair]) -> Vec<NeighborGroup<'_>> {
    records
        .chunk_by(|a, b| a.node == b.node)
        .map(|chunk| NeighborGroup { node: chunk[0].node, records: chunk })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shuffle_groups_and_orders_neighbors() {
        let mut records = vec![
            EdgePair::new(3, 1),
            EdgePair::new(1, 9),
            EdgePair::new(3, 0),
            EdgePair::new(1, 2),
            EdgePair::new(1, 2),
        ];
        let groups = shuffle(&mut records);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].node, 1);
        assert_eq!(groups[0].neighbors().collect::<Vec<_>>(), vec![2, 2, 9]);
        assert_eq!(groups[1].node, 3);
        assert_eq!(groups[1].neighbors().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_empty_input_has_no_groups() {
        let mut records = Vec::new();
        assert!(shuffle(&mut records).is_empty());
    }
}
