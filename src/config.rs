//! Configuration management for the component search

use crate::convergence::DEFAULT_MAX_ITERATIONS;

/// Default configuration for a run
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum LARGE+SMALL rounds per connected-components computation
    pub max_iterations: usize,

    /// Worker threads per pass (0 = all available cores)
    pub workers: usize,

    /// Run the edge removal search after the baseline computation
    pub search: bool,

    /// Check the final clusters against the final snapshot
    pub validate: bool,

    /// Output directory for results
    pub output_dir: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            workers: 0,
            search: true,
            validate: true,
            output_dir: "cc_results".to_string(),
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(
        max_iterations: usize,
        workers: usize,
        search: bool,
        validate: bool,
        output_dir: impl Into<String>,
    ) -> Self {
        Self {
            max_iterations,
            workers,
            search,
            validate,
            output_dir: output_dir.into(),
        }
    }
}
