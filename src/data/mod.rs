//! Input handling for edge-list data

pub mod edge_list;

pub use edge_list::{load_edge_list, read_edge_list};
