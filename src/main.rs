use anyhow::{Context, Result};
use clap::Parser;

use star_components::cluster::validate_clusters;
use star_components::data::load_edge_list;
use star_components::{storage, Config, ConvergenceController, EdgeRemovalSearch, StarError};

#[derive(Parser, Debug)]
#[clap(
    name = "star-components",
    about = "Connected components by Large-Star/Small-Star contraction with critical-edge search"
)]
struct Cli {
    /// Path to the tab-separated edge list
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "cc_results")]
    output_dir: String,

    /// Maximum LARGE+SMALL rounds per components computation
    #[clap(long, default_value = "30")]
    max_iterations: usize,

    /// Only compute the baseline components
    #[clap(long)]
    skip_search: bool,

    /// Skip the final cluster check
    #[clap(long)]
    skip_validation: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config::new(
        args.max_iterations,
        args.threads,
        !args.skip_search,
        !args.skip_validation,
        args.output_dir,
    );

    log::info!("Starting connected components search");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", config.output_dir);

    // 1. Load data
    let input = load_edge_list(&args.input)
        .with_context(|| format!("failed to load edge list {}", args.input))?;

    // 2. Baseline components
    let controller = ConvergenceController::from_config(&config)?;
    let mut search = EdgeRemovalSearch::new(controller, input)?;

    // 3. Edge removal search
    let mut aborted: Option<StarError> = None;
    if config.search {
        if let Err(err) = search.run() {
            log::error!("{}; keeping last accepted snapshot", err);
            aborted = Some(err);
        }
    }

    let outcome = search.into_outcome();

    // 4. Check the final clusters
    let validation = config
        .validate
        .then(|| validate_clusters(&outcome.snapshot, &outcome.summary));

    // 5. Save results
    storage::save_results(&outcome, validation.as_ref(), &config.output_dir)?;

    log::info!(
        "Nodes: {}, clusters: {}, critical edges: {}",
        outcome.summary.node_count,
        outcome.summary.cluster_count,
        outcome.critical_edges.len()
    );
    if let Some(report) = &validation {
        log::info!("Validation ok: {}", report.ok);
    }

    if let Some(err) = aborted {
        return Err(err).context("edge removal search did not complete");
    }

    log::info!("Analysis complete. Results saved to {}", config.output_dir);

    Ok(())
}
