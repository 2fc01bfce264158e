//! Union-find labelling used as ground truth for the contraction passes

use std::collections::BTreeMap;

use crate::graph::{EdgeSet, NodeId};

/// Union-Find over dense indices
pub struct DisjointSets {
    /// Parent pointers (parent[i] = parent of index i)
    parent: Vec<u32>,

    /// Size of each set (for union by size)
    rank: Vec<u32>,
}

impl DisjointSets {
    /// Create a new DisjointSets data structure
    pub fn new(size: usize) -> Self {
        Self {
            parent: (0..size as u32).collect(),
            rank: vec![1; size],
        }
    }

    /// Find the root of the set containing x with path compression
    pub fn find(&mut self, x: u32) -> u32 {
        let mut root = x;
        while self.parent[root as usize] != root {
            root = self.parent[root as usize];
        }

        let mut node = x;
        while self.parent[node as usize] != root {
            let next = self.parent[node as usize];
            self.parent[node as usize] = root;
            node = next;
        }

        root
    }

    /// Union the sets containing x and y
    pub fn union(&mut self, x: u32, y: u32) {
        let root_x = self.find(x);
        let root_y = self.find(y);

        if root_x == root_y {
            return; // Already in the same set
        }

        // Attach smaller tree under root of larger tree
        let rank_x = self.rank[root_x as usize];
        let rank_y = self.rank[root_y as usize];

        if rank_x > rank_y {
            self.parent[root_y as usize] = root_x;
            self.rank[root_x as usize] += rank_y;
        } else {
            self.parent[root_x as usize] = root_y;
            self.rank[root_y as usize] += rank_x;
        }
    }

    /// Get the size of the set containing x
    pub fn size(&mut self, x: u32) -> u32 {
        let root = self.find(x);
        self.rank[root as usize]
    }
}

/// Minimum reachable node for every node of an undirected edge set
pub fn reference_labels(edges: &EdgeSet) -> BTreeMap<NodeId, NodeId> {
    let nodes: Vec<NodeId> = edges.nodes().into_iter().collect();
    let index = |node: NodeId| nodes.binary_search(&node).map(|i| i as u32);

    let mut sets = DisjointSets::new(nodes.len());
    for pair in edges.pairs() {
        if pair.is_isolated() {
            continue;
        }
        if let (Ok(a), Ok(b)) = (index(pair.node), index(pair.neighbor)) {
            sets.union(a, b);
        }
    }

    // `nodes` is ascending, so the first node seen per root is its minimum
    let mut root_min: BTreeMap<u32, NodeId> = BTreeMap::new();
    let mut labels = BTreeMap::new();
    for (i, &node) in nodes.iter().enumerate() {
        let root = sets.find(i as u32);
        let label = *root_min.entry(root).or_insert(node);
        labels.insert(node, label);
    }

    labels
}
