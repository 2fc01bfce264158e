//! Results persistence module

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use log;
use serde_json::{json, to_string_pretty};

use crate::cluster::ValidationReport;
use crate::error::Result;
use crate::graph::EdgeSet;
use crate::search::SearchOutcome;

/// Save the search outcome to the specified directory
pub fn save_results(
    outcome: &SearchOutcome,
    validation: Option<&ValidationReport>,
    output_dir: &str,
) -> Result<()> {
    log::info!(
        "Saving {} clusters to {}",
        outcome.summary.cluster_count,
        output_dir
    );

    // Ensure output directory exists
    fs::create_dir_all(output_dir)?;

    save_summary(outcome, validation, output_dir)?;
    save_clusters(outcome, output_dir)?;
    save_snapshot(&outcome.snapshot, &Path::new(output_dir).join("snapshot.bin"))?;

    log::info!("Results saved successfully");

    Ok(())
}

/// Save summary information
fn save_summary(
    outcome: &SearchOutcome,
    validation: Option<&ValidationReport>,
    output_dir: &str,
) -> Result<()> {
    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let summary = &outcome.summary;
    let report = json!({
        "graph_stats": {
            "node_count": summary.node_count,
            "declared_edge_count": outcome.snapshot.declared_edges(),
            "remaining_edge_count": outcome.snapshot.undirected_edges().count(),
        },
        "cluster_stats": {
            "baseline_cluster_count": outcome.baseline_count,
            "baseline_rounds": outcome.baseline_rounds,
            "cluster_count": summary.cluster_count,
            "largest_cluster_size": summary.clusters.first().map_or(0, |c| c.size),
            "singleton_count": summary.clusters.iter().filter(|c| c.size == 1).count(),
        },
        "search": {
            "iterations": outcome.iterations,
            "completed": outcome.completed,
            "critical_edges": outcome.critical_edges,
        },
        "validation": validation,
    });

    file.write_all(to_string_pretty(&report)?.as_bytes())?;

    Ok(())
}

/// Save cluster membership
fn save_clusters(outcome: &SearchOutcome, output_dir: &str) -> Result<()> {
    let path = Path::new(output_dir).join("clusters.json");
    let file = File::create(path)?;

    let clusters_json = json!({
        "clusters": outcome.summary.clusters,
    });

    serde_json::to_writer_pretty(BufWriter::new(file), &clusters_json)?;

    Ok(())
}

/// Write an edge-set snapshot in binary form
pub fn save_snapshot(edges: &EdgeSet, path: &Path) -> Result<()> {
    let file = File::create(path)?;
    bincode::serialize_into(BufWriter::new(file), edges)?;
    Ok(())
}

/// Read a snapshot written by [`save_snapshot`]
pub fn load_snapshot(path: &Path) -> Result<EdgeSet> {
    let file = File::open(path)?;
    Ok(bincode::deserialize_from(BufReader::new(file))?)
}
