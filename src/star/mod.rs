//! Large-Star / Small-Star contraction pass
//!
//! One pass is a full map → shuffle → reduce round over an [`EdgeSet`]. The output is
//! a new edge set plus explicit counters; nothing is accumulated in shared state.

use std::fmt;

use itertools::Itertools;
use log;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Result, StarError};
use crate::graph::shuffle::{self, NeighborGroup};
use crate::graph::{EdgePair, EdgeSet};

/// Which half of the alternating contraction a pass runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StarMode {
    Large,
    Small,
}

impl fmt::Display for StarMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StarMode::Large => write!(f, "LARGE"),
            StarMode::Small => write!(f, "SMALL"),
        }
    }
}

/// Counters produced by a single pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassStats {
    /// Pairs emitted by groups that were not centred on their own minimum
    pub changed: u64,

    /// Groups reduced
    pub visited: u64,

    /// Records written to the output
    pub emitted: u64,
}

/// Result of one contraction pass
#[derive(Debug, Clone)]
pub struct PassOutput {
    pub edges: EdgeSet,
    pub stats: PassStats,
}

/// Map phase: Large-Star sees both directions of every edge, Small-Star only
/// `(larger, smaller)`. Isolated records pass through untouched.
pub fn map_records(mode: StarMode, input: &EdgeSet) -> Vec<EdgePair> {
    match mode {
        StarMode::Large => input
            .pairs()
            .par_iter()
            .flat_map_iter(|&pair| {
                let reverse = (!pair.is_isolated()).then(|| pair.reversed());
                std::iter::once(pair).chain(reverse)
            })
            .collect(),
        StarMode::Small => input
            .pairs()
            .par_iter()
            .map(|&pair| {
                if pair.is_isolated() {
                    pair
                } else {
                    EdgePair::new(pair.node.max(pair.neighbor), pair.node.min(pair.neighbor))
                }
            })
            .collect(),
    }
}

/// Reduce one group, appending its output to `out`.
///
/// Returns the number of changed pairs the group contributes.
pub fn reduce_group(mode: StarMode, group: NeighborGroup<'_>, out: &mut Vec<EdgePair>) -> Result<u64> {
    let node = group.node;
    let records = group.records;

    let Some(first) = records.first() else {
        return Ok(0);
    };

    // Sentinel sorts last, so a mixed group shows it at the end
    if records[records.len() - 1].is_isolated() {
        if !first.is_isolated() {
            return Err(StarError::MalformedGroup {
                node,
                reason: "isolated marker mixed with real neighbours".to_string(),
            });
        }
        out.push(EdgePair::isolated(node));
        return Ok(0);
    }

    if let Some(w) = records.windows(2).find(|w| w[0].neighbor > w[1].neighbor) {
        return Err(StarError::MalformedGroup {
            node,
            reason: format!("neighbour {} arrived after {}", w[1].neighbor, w[0].neighbor),
        });
    }

    // Neighbours are sorted, so the group minimum is either the node or its first neighbour
    let min_node = node.min(first.neighbor);

    if mode == StarMode::Small && node != min_node {
        out.push(EdgePair::new(node, min_node));
    }

    let mut produced = 0u64;
    for neighbor in group.neighbors().dedup() {
        let emit = match mode {
            StarMode::Small => neighbor != min_node,
            StarMode::Large => neighbor > node,
        };
        if emit {
            out.push(EdgePair::new(neighbor, min_node));
            produced += 1;
        }
    }

    if node != min_node {
        Ok(produced)
    } else {
        Ok(0)
    }
}

/// Run one full contraction pass on the current rayon pool
pub fn run_pass(mode: StarMode, input: &EdgeSet) -> Result<PassOutput> {
    let mut mapped = map_records(mode, input);
    let groups = shuffle::shuffle(&mut mapped);
    let visited = groups.len() as u64;

    let (records, changed) = groups
        .par_iter()
        .try_fold(
            || (Vec::new(), 0u64),
            |(mut out, changed), group| {
                let delta = reduce_group(mode, *group, &mut out)?;
                Ok::<_, StarError>((out, changed + delta))
            },
        )
        .try_reduce(
            || (Vec::new(), 0u64),
            |(mut left, left_changed), (right, right_changed)| {
                left.extend(right);
                Ok((left, left_changed + right_changed))
            },
        )?;

    let emitted = records.len() as u64;
    let edges = EdgeSet::from_unsorted(records, input.declared_edges());

    log::debug!(
        "{} pass: {} groups, {} records emitted, {} changes",
        mode,
        visited,
        emitted,
        changed
    );

    Ok(PassOutput {
        edges,
        stats: PassStats { changed, visited, emitted },
    })
}
