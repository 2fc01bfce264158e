//! Alternating Large-Star / Small-Star driver
//!
//! Runs rounds of one LARGE pass followed by one SMALL pass until a round reports no
//! changes, or until the round cap is hit. Each pass starts only after the previous one
//! has fully materialised its output, and only the latest edge set is kept alive.

use std::fmt;
use std::sync::Arc;

use log;
use rayon::ThreadPool;

use crate::config::Config;
use crate::error::{Result, StarError};
use crate::graph::EdgeSet;
use crate::star::{self, StarMode};

/// Default round cap, a generous multiple of the expected logarithmic bound
pub const DEFAULT_MAX_ITERATIONS: usize = 30;

/// Where the controller currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    Init,
    Large,
    Small,
    Converged,
    Capped,
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ControllerState::Init => "INIT",
            ControllerState::Large => "LARGE",
            ControllerState::Small => "SMALL",
            ControllerState::Converged => "CONVERGED",
            ControllerState::Capped => "CAPPED",
        };
        f.write_str(name)
    }
}

/// A converged edge set: every record is `(node, label)` or an isolated marker
#[derive(Debug, Clone)]
pub struct Converged {
    pub edges: EdgeSet,
    pub rounds: usize,
}

/// Terminal state of a controller run
#[derive(Debug, Clone)]
pub enum ControllerOutcome {
    Converged(Converged),

    /// Cap reached; `edges` is the output of the last completed round
    Capped {
        edges: EdgeSet,
        rounds: usize,
        last_changes: u64,
    },
}

impl ControllerOutcome {
    pub fn state(&self) -> ControllerState {
        match self {
            ControllerOutcome::Converged(_) => ControllerState::Converged,
            ControllerOutcome::Capped { .. } => ControllerState::Capped,
        }
    }

    /// Treat a capped run as [`StarError::NonConvergence`]
    pub fn into_converged(self) -> Result<Converged> {
        match self {
            ControllerOutcome::Converged(converged) => Ok(converged),
            ControllerOutcome::Capped { rounds, last_changes, .. } => {
                Err(StarError::NonConvergence { rounds, last_changes })
            }
        }
    }
}

/// Drives contraction passes on a dedicated worker pool
#[derive(Clone)]
pub struct ConvergenceController {
    max_iterations: usize,
    pool: Arc<ThreadPool>,
}

impl ConvergenceController {
    /// Create a controller with `workers` threads (0 = all available cores)
    pub fn new(max_iterations: usize, workers: usize) -> Result<Self> {
        let num_threads = if workers > 0 { workers } else { num_cpus::get() };
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("star-worker-{}", i))
            .build()?;

        Ok(Self {
            max_iterations,
            pool: Arc::new(pool),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(config.max_iterations, config.workers)
    }

    pub fn max_iterations(&self) -> usize {
        self.max_iterations
    }

    /// Run rounds until fixed point or cap
    pub fn run(&self, input: &EdgeSet) -> Result<ControllerOutcome> {
        let mut state = ControllerState::Init;
        let mut current: Option<EdgeSet> = None;
        let mut rounds = 0;

        log::debug!("{} with {} records", state, input.len());

        loop {
            let source = current.as_ref().unwrap_or(input);

            state = ControllerState::Large;
            log::trace!("{} pass on {} records", state, source.len());
            let large = self.pool.install(|| star::run_pass(StarMode::Large, source))?;

            state = ControllerState::Small;
            log::trace!("{} pass on {} records", state, large.edges.len());
            let small = self.pool.install(|| star::run_pass(StarMode::Small, &large.edges))?;
            drop(large.edges);

            rounds += 1;
            let changes = large.stats.changed + small.stats.changed;
            log::debug!(
                "round {}: {} large + {} small changes, {} records",
                rounds,
                large.stats.changed,
                small.stats.changed,
                small.edges.len()
            );

            if changes == 0 {
                log::info!("{} after {} rounds", ControllerState::Converged, rounds);
                return Ok(ControllerOutcome::Converged(Converged {
                    edges: small.edges,
                    rounds,
                }));
            }

            if rounds >= self.max_iterations {
                log::warn!(
                    "{} after {} rounds with {} changes outstanding",
                    ControllerState::Capped,
                    rounds,
                    changes
                );
                return Ok(ControllerOutcome::Capped {
                    edges: small.edges,
                    rounds,
                    last_changes: changes,
                });
            }

            // Previous round output is no longer needed
            current = Some(small.edges);
        }
    }

    /// Run and require convergence
    pub fn converge(&self, input: &EdgeSet) -> Result<Converged> {
        self.run(input)?.into_converged()
    }
}
