//! Integration tests for shortest-path queries over a written graph

use std::collections::BTreeSet;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;
use wiki_ripple::article::ArticleId;
use wiki_ripple::crawler::ResultGraph;
use wiki_ripple::graph::{format_path, LinkGraph, PathQuery};
use wiki_ripple::output::{load_graph, write_graph};
use wiki_ripple::GraphFileError;

fn graph_of(entries: &[(&str, &[&str])]) -> ResultGraph {
    entries
        .iter()
        .map(|(k, vs)| {
            let links: BTreeSet<ArticleId> = vs.iter().map(|v| ArticleId::new(*v)).collect();
            (ArticleId::new(*k), links)
        })
        .collect()
}

fn write_chain(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("wiki.json");
    let graph = graph_of(&[
        ("A", &["B"]),
        ("B", &["C", "Dangling"]),
        ("C", &[]),
        ("C%2B%2B", &["A"]),
        ("Island", &[]),
    ]);
    write_graph(&graph, &path).unwrap();
    path
}

fn run_wiki_path(graph: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_wiki-path"))
        .arg("--graph")
        .arg(graph)
        .args(args)
        .output()
        .expect("failed to run wiki-path")
}

#[test]
fn test_path_through_written_graph() {
    let dir = TempDir::new().unwrap();
    let path = write_chain(&dir);

    let loaded = load_graph(&path).unwrap();
    let graph = LinkGraph::from_result_graph(&loaded);

    match graph.shortest_path("A", "C") {
        PathQuery::Found(hops) => {
            assert_eq!(hops, vec![ArticleId::new("A"), ArticleId::new("B"), ArticleId::new("C")]);
            assert_eq!(format_path(&hops), "A -> B -> C");
        }
        other => panic!("expected a path, got {:?}", other),
    }
}

#[test]
fn test_decoded_titles_resolve_to_vertices() {
    let dir = TempDir::new().unwrap();
    let loaded = load_graph(&write_chain(&dir)).unwrap();
    let graph = LinkGraph::from_result_graph(&loaded);

    match graph.shortest_path("C++", "C") {
        PathQuery::Found(hops) => assert_eq!(format_path(&hops), "C++ -> A -> B -> C"),
        other => panic!("expected a path, got {:?}", other),
    }
}

#[test]
fn test_dangling_links_are_not_vertices() {
    let dir = TempDir::new().unwrap();
    let loaded = load_graph(&write_chain(&dir)).unwrap();
    let graph = LinkGraph::from_result_graph(&loaded);

    assert_eq!(graph.vertex_count(), 5);
    assert_eq!(graph.pruned_links(), 1);
    assert_eq!(graph.shortest_path("A", "Dangling"), PathQuery::VertexNotFound);
    assert_eq!(graph.shortest_path("A", "Island"), PathQuery::NoPath);
}

#[test]
fn test_load_errors_are_distinguished() {
    let dir = TempDir::new().unwrap();

    let missing = dir.path().join("missing.json");
    assert!(matches!(load_graph(&missing), Err(GraphFileError::NotFound(_))));

    let broken = dir.path().join("broken.json");
    std::fs::write(&broken, "{\"A\": [\"B\"").unwrap();
    assert!(matches!(load_graph(&broken), Err(GraphFileError::Malformed { .. })));
}

#[test]
fn test_cli_prints_shortest_path() {
    let dir = TempDir::new().unwrap();
    let path = write_chain(&dir);

    let output = run_wiki_path(&path, &["--from", "A", "--to", "C"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Shortest path from A to C is:"), "{}", stdout);
    assert!(stdout.contains("A -> B -> C"), "{}", stdout);
}

#[test]
fn test_cli_reports_unknown_vertex() {
    let dir = TempDir::new().unwrap();
    let path = write_chain(&dir);

    let output = run_wiki_path(&path, &["--from", "A", "--to", "Z"]);

    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("Vertex A or Z not found. Check the spelling and try again."),
        "{}",
        stdout
    );
}

#[test]
fn test_cli_reports_missing_database() {
    let dir = TempDir::new().unwrap();

    let output = run_wiki_path(&dir.path().join("nope.json"), &["--from", "A", "--to", "B"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Database not found"));
}

#[test]
fn test_cli_reports_malformed_database() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("wiki.json");
    std::fs::write(&path, "not json at all").unwrap();

    let output = run_wiki_path(&path, &["--from", "A", "--to", "B"]);

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("Error in json file"));
}

#[test]
fn test_cli_requires_both_endpoints() {
    let dir = TempDir::new().unwrap();
    let path = write_chain(&dir);

    let output = run_wiki_path(&path, &["--from", "A"]);

    assert_eq!(output.status.code(), Some(2));
}
