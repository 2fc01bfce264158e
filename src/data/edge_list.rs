//! Tab-separated edge-list reader
//!
//! One `node<TAB>neighbor` pair per line. A neighbour of `-1` declares an isolated node.
//! Blank lines and lines starting with `#` are skipped.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log;

use crate::error::{Result, StarError};
use crate::graph::{EdgeSet, NodeId, NO_NEIGHBOR};

/// Load an edge list from disk
pub fn load_edge_list(path: impl AsRef<Path>) -> Result<EdgeSet> {
    let path = path.as_ref();
    log::info!("Reading edge list: {}", path.display());

    let file = File::open(path)?;
    let set = read_edge_list(file)?;

    log::info!(
        "Loaded {} records ({} undirected edges)",
        set.len(),
        set.declared_edges()
    );
    Ok(set)
}

/// Parse an edge list from any reader
pub fn read_edge_list<R: Read>(reader: R) -> Result<EdgeSet> {
    let mut edges = Vec::new();
    let mut isolated = Vec::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let line_no = index + 1;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let mut fields = trimmed.split('\t');
        let (Some(node), Some(neighbor), None) = (fields.next(), fields.next(), fields.next()) else {
            return Err(StarError::Parse {
                line: line_no,
                message: format!("expected two tab-separated fields, got {:?}", trimmed),
            });
        };

        let node = parse_node(node, line_no)?;
        if neighbor.trim() == "-1" {
            isolated.push(node);
        } else {
            edges.push((node, parse_node(neighbor, line_no)?));
        }
    }

    Ok(EdgeSet::from_undirected(edges, isolated))
}

fn parse_node(field: &str, line: usize) -> Result<NodeId> {
    let id: NodeId = field.trim().parse().map_err(|err| StarError::Parse {
        line,
        message: format!("invalid node id {:?}: {}", field, err),
    })?;
    if id == NO_NEIGHBOR {
        return Err(StarError::Parse {
            line,
            message: format!("node id {} is reserved", id),
        });
    }
    Ok(id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::EdgePair;

    #[test]
    fn test_reads_edges_and_isolated_nodes() {
        let text = "# sample\n1\t2\n2\t1\n2\t3\n\n7\t-1\n";
        let set = read_edge_list(text.as_bytes()).unwrap();
        assert_eq!(set.declared_edges(), 2);
        assert!(set.is_symmetric());
        assert_eq!(set.pairs().last(), Some(&EdgePair::isolated(7)));
    }

    #[test]
    fn test_rejects_malformed_lines() {
        let err = read_edge_list("1\t2\n3 4\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StarError::Parse { line: 2, .. }));

        let err = read_edge_list("1\tx\n".as_bytes()).unwrap_err();
        assert!(matches!(err, StarError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_rejects_reserved_id() {
        let text = format!("{}\t1\n", NO_NEIGHBOR);
        assert!(read_edge_list(text.as_bytes()).is_err());
    }
}
