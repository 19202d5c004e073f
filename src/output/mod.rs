//! Output module for the graph artifact
//!
//! This module handles:
//! - Writing the accepted result graph as JSON
//! - Reading it back for the query tool
//! - Summarising a graph's size and shape

mod graph_file;
pub mod stats;

pub use graph_file::{load_graph, write_graph};
pub use stats::{print_statistics, GraphStatistics};
