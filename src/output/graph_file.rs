//! JSON graph artifact
//!
//! The artifact is a single JSON object: each key is an article identifier and
//! each value is the array of identifiers it links to. Keys and arrays are
//! written in sorted order with four-space indentation, so the same graph always
//! produces the same bytes.

use crate::crawler::ResultGraph;
use crate::{GraphFileError, GraphFileResult};
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::io::ErrorKind;
use std::path::Path;

/// Writes a result graph, replacing any existing file at `path`
///
/// # Returns
///
/// * `Ok(())` - The file was written
/// * `Err(GraphFileError)` - Serialization or IO failed
pub fn write_graph(graph: &ResultGraph, path: &Path) -> GraphFileResult<()> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
    graph.serialize(&mut serializer)?;
    buffer.push(b'\n');

    std::fs::write(path, buffer)?;
    Ok(())
}

/// Reads a graph artifact
///
/// Duplicate link targets within one array collapse into one.
///
/// # Returns
///
/// * `Ok(ResultGraph)` - The parsed graph
/// * `Err(GraphFileError::NotFound)` - No file at `path`
/// * `Err(GraphFileError::Malformed)` - The file is not a JSON object of string arrays
pub fn load_graph(path: &Path) -> GraphFileResult<ResultGraph> {
    let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => GraphFileError::NotFound(path.display().to_string()),
        _ => GraphFileError::Io(e),
    })?;

    serde_json::from_str(&content).map_err(|source| GraphFileError::Malformed {
        path: path.display().to_string(),
        source,
    })
}
