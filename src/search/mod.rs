//! Exhaustive edge-removal search
//!
//! Walks every edge ordinal once. Each step drops one edge from the best snapshot so
//! far, recomputes connected components and keeps the new snapshot only when the
//! cluster count strictly grows. Steps run strictly one after another.

pub mod removal;

use log;
use serde::{Serialize, Deserialize};

use crate::cluster::{extract_clusters, ClusterSummary};
use crate::convergence::ConvergenceController;
use crate::error::{Result, StarError};
use crate::graph::{EdgeSet, NodeId};

pub use removal::{remove_edge, Removal};

/// An edge whose removal increased the cluster count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CriticalEdge {
    pub ordinal: u64,
    pub edge: (NodeId, NodeId),
    pub clusters_after: usize,
}

/// What happened at one ordinal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepReport {
    pub ordinal: u64,
    pub removed: Option<(NodeId, NodeId)>,
    pub clusters: usize,
    pub accepted: bool,

    /// Best cluster count after this step
    pub best_count: usize,

    /// Edges visited while matching the ordinal
    pub visited: u64,

    /// Contraction rounds needed
    pub rounds: usize,
}

/// Final state of a search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub snapshot: EdgeSet,
    pub summary: ClusterSummary,
    pub baseline_count: usize,
    pub baseline_rounds: usize,
    pub critical_edges: Vec<CriticalEdge>,

    /// Ordinals evaluated
    pub iterations: u64,

    /// True when every ordinal up to the declared edge count was evaluated
    pub completed: bool,
}

impl SearchOutcome {
    pub fn best_count(&self) -> usize {
        self.summary.cluster_count
    }
}

/// Stateful outer loop; the best snapshot stays available after an abort
pub struct EdgeRemovalSearch {
    controller: ConvergenceController,
    snapshot: EdgeSet,
    best: ClusterSummary,
    baseline_count: usize,
    baseline_rounds: usize,
    total_edges: u64,
    next_ordinal: u64,
    critical_edges: Vec<CriticalEdge>,
}

impl EdgeRemovalSearch {
    /// Run the bootstrap connected-components computation on `input` and start a
    /// search from it
    pub fn new(controller: ConvergenceController, input: EdgeSet) -> Result<Self> {
        log::info!(
            "Computing baseline components over {} records ({} edges)",
            input.len(),
            input.declared_edges()
        );
        let converged = controller.converge(&input)?;
        let baseline = extract_clusters(&converged);
        log::info!("Baseline: {} clusters over {} nodes", baseline.cluster_count, baseline.node_count);

        let mut search = Self::from_baseline(controller, input, baseline);
        search.baseline_rounds = converged.rounds;
        Ok(search)
    }

    /// Start from a snapshot whose clusters are already known
    pub fn from_baseline(controller: ConvergenceController, snapshot: EdgeSet, baseline: ClusterSummary) -> Self {
        Self {
            controller,
            total_edges: snapshot.declared_edges(),
            baseline_count: baseline.cluster_count,
            baseline_rounds: 0,
            snapshot,
            best: baseline,
            next_ordinal: 0,
            critical_edges: Vec::new(),
        }
    }

    pub fn best_count(&self) -> usize {
        self.best.cluster_count
    }

    pub fn best_snapshot(&self) -> &EdgeSet {
        &self.snapshot
    }

    pub fn best_summary(&self) -> &ClusterSummary {
        &self.best
    }

    pub fn critical_edges(&self) -> &[CriticalEdge] {
        &self.critical_edges
    }

    pub fn next_ordinal(&self) -> u64 {
        self.next_ordinal
    }

    pub fn total_edges(&self) -> u64 {
        self.total_edges
    }

    pub fn is_finished(&self) -> bool {
        self.next_ordinal > self.total_edges
    }

    /// Evaluate the next ordinal; `None` once every ordinal has been tried.
    ///
    /// A failure leaves the search at the same ordinal with the last accepted snapshot intact.
    pub fn step(&mut self) -> Result<Option<StepReport>> {
        if self.is_finished() {
            return Ok(None);
        }

        let ordinal = self.next_ordinal;
        log::info!("Removing edge {} of {}", ordinal, self.total_edges);

        let (removal, summary, rounds) = self.evaluate(ordinal).map_err(|err| {
            log::error!("Search aborted at ordinal {}: {}", ordinal, err);
            StarError::SearchAborted {
                ordinal,
                best_count: self.best.cluster_count,
                source: Box::new(err),
            }
        })?;

        self.next_ordinal += 1;

        let clusters = summary.cluster_count;
        let accepted = clusters > self.best.cluster_count;

        if let (true, Some(edge)) = (accepted, removal.removed) {
            log::info!(
                "Critical edge ({}, {}) at ordinal {}: {} -> {} clusters",
                edge.0,
                edge.1,
                ordinal,
                self.best.cluster_count,
                clusters
            );
            self.critical_edges.push(CriticalEdge { ordinal, edge, clusters_after: clusters });
            self.snapshot = removal.edges;
            self.best = summary;
        }

        Ok(Some(StepReport {
            ordinal,
            removed: removal.removed,
            clusters,
            accepted,
            best_count: self.best.cluster_count,
            visited: removal.visited,
            rounds,
        }))
    }

    fn evaluate(&self, ordinal: u64) -> Result<(Removal, ClusterSummary, usize)> {
        let removal = remove_edge(&self.snapshot, ordinal)?;
        let converged = self.controller.converge(&removal.edges)?;
        let summary = extract_clusters(&converged);
        Ok((removal, summary, converged.rounds))
    }

    /// Step until every ordinal has been tried
    pub fn run(&mut self) -> Result<()> {
        while let Some(report) = self.step()? {
            log::debug!(
                "ordinal {}: {} clusters (best {})",
                report.ordinal,
                report.clusters,
                report.best_count
            );
        }

        log::info!(
            "Edge removal search finished: {} critical edges, {} clusters",
            self.critical_edges.len(),
            self.best.cluster_count
        );
        Ok(())
    }

    pub fn into_outcome(self) -> SearchOutcome {
        SearchOutcome {
            completed: self.is_finished(),
            iterations: self.next_ordinal,
            snapshot: self.snapshot,
            summary: self.best,
            baseline_count: self.baseline_count,
            baseline_rounds: self.baseline_rounds,
            critical_edges: self.critical_edges,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convergence::DEFAULT_MAX_ITERATIONS;

    fn controller() -> ConvergenceController {
        ConvergenceController::new(DEFAULT_MAX_ITERATIONS, 2).unwrap()
    }

    fn sample() -> EdgeSet {
        EdgeSet::from_undirected(vec![(1, 2), (2, 3), (4, 5)], Vec::new())
    }

    #[test]
    fn test_baseline_counts_two_clusters() {
        let search = EdgeRemovalSearch::new(controller(), sample()).unwrap();
        assert_eq!(search.best_count(), 2);
        assert_eq!(search.total_edges(), 3);
        assert_eq!(search.best_summary().label_of(3), Some(1));
        assert_eq!(search.best_summary().label_of(5), Some(4));
    }

    #[test]
    fn test_first_removal_is_critical() {
        let mut search = EdgeRemovalSearch::new(controller(), sample()).unwrap();

        // Ordinal 0 is (1, 2); node 1 splits off
        let report = search.step().unwrap().unwrap();
        assert_eq!(report.removed, Some((1, 2)));
        assert_eq!(report.clusters, 3);
        assert!(report.accepted);
        assert_eq!(search.critical_edges().len(), 1);
        assert_eq!(search.best_snapshot().undirected_edges().count(), 2);
    }

    #[test]
    fn test_removing_bridge_two_three_is_critical() {
        let summary = extract_clusters(&controller().converge(&sample()).unwrap());
        let mut search = EdgeRemovalSearch::from_baseline(controller(), sample(), summary);
        search.next_ordinal = 1;

        let report = search.step().unwrap().unwrap();
        assert_eq!(report.removed, Some((2, 3)));
        assert_eq!(report.clusters, 3);
        assert!(report.accepted);
        let best = search.best_summary();
        assert_eq!(best.label_of(2), Some(1));
        assert_eq!(best.label_of(3), Some(3));
        assert_eq!(best.label_of(5), Some(4));
    }

    #[test]
    fn test_full_search_is_monotonic_and_terminates() {
        let mut search = EdgeRemovalSearch::new(controller(), sample()).unwrap();
        let mut previous = search.best_count();
        let mut steps = 0;
        while let Some(report) = search.step().unwrap() {
            assert!(report.best_count >= previous);
            previous = report.best_count;
            steps += 1;
        }
        assert_eq!(steps, 4);

        let outcome = search.into_outcome();
        assert!(outcome.completed);
        assert_eq!(outcome.baseline_count, 2);
        assert!(outcome.best_count() >= outcome.baseline_count);
    }

    #[test]
    fn test_redundant_edge_in_cycle_is_not_critical() {
        let triangle = EdgeSet::from_undirected(vec![(1, 2), (2, 3), (1, 3)], Vec::new());
        let mut search = EdgeRemovalSearch::new(controller(), triangle).unwrap();
        let report = search.step().unwrap().unwrap();
        assert_eq!(report.clusters, 1);
        assert!(!report.accepted);
        assert_eq!(search.best_snapshot().undirected_edges().count(), 3);
    }

    #[test]
    fn test_path_with_shared_middle_node_completes() {
        let path = EdgeSet::from_undirected(vec![(0, 2), (1, 2)], Vec::new());
        let mut search = EdgeRemovalSearch::new(controller(), path).unwrap();
        search.run().unwrap();

        let outcome = search.into_outcome();
        assert!(outcome.completed);
        assert_eq!(outcome.baseline_count, 1);
        assert_eq!(outcome.best_count(), 2);
        assert_eq!(outcome.critical_edges.len(), 1);
        assert_eq!(outcome.critical_edges[0].edge, (0, 2));
        assert_eq!(outcome.summary.label_of(2), Some(1));
    }

    #[test]
    fn test_capped_run_aborts_and_keeps_snapshot() {
        let path: Vec<(u32, u32)> = (0..64).map(|i| (i, i + 1)).collect();
        let input = EdgeSet::from_undirected(path, Vec::new());
        let baseline = extract_clusters(&controller().converge(&input).unwrap());
        let tight = ConvergenceController::new(1, 1).unwrap();
        let mut search = EdgeRemovalSearch::from_baseline(tight, input.clone(), baseline);

        let err = search.run().unwrap_err();
        assert!(matches!(err, StarError::SearchAborted { ordinal: 0, best_count: 1, .. }));
        assert_eq!(search.next_ordinal(), 0);
        assert_eq!(search.best_snapshot(), &input);
    }
}
