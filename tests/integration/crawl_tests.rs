//! Integration tests for the crawler
//!
//! These tests use wiremock to stand up a small fake encyclopedia and run the
//! full crawl cycle end-to-end, including the graph artifact.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;
use wiki_ripple::article::ArticleId;
use wiki_ripple::config::{Config, SchedulingMode};
use wiki_ripple::crawler::{crawl, ResultGraph};
use wiki_ripple::output::load_graph;
use wiki_ripple::StopReason;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Builds an article page whose content region links to `links`
///
/// Navigation and namespaced links are added around them so the extractor has
/// something to filter out.
fn article_html(title: &str, links: &[&str]) -> String {
    let anchors: String = links
        .iter()
        .map(|l| format!(r#"<li><a href="/wiki/{}">{}</a></li>"#, l, l))
        .collect();
    format!(
        r#"<html><head><title>{title}</title></head><body>
        <div id="mw-navigation"><a href="/wiki/Main_Page">Main page</a></div>
        <div id="bodyContent">
            <p>{title} is an article.</p>
            <ul>{anchors}</ul>
            <a href="/wiki/Category:Examples">Category</a>
            <a href="/wiki/Help:Contents">Help</a>
        </div>
        </body></html>"#
    )
}

async fn mount_article(server: &MockServer, title: &str, links: &[&str]) {
    Mock::given(method("GET"))
        .and(path(format!("/wiki/{}", title)))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(article_html(title, links))
                .insert_header("content-type", "text/html; charset=UTF-8"),
        )
        .mount(server)
        .await;
}

fn test_config(server: &MockServer, output: &Path) -> Config {
    let mut config = Config::default();
    config.site.base_url = format!("{}/wiki/", server.uri());
    config.output.graph_path = output.display().to_string();
    config.crawler.request_timeout_secs = 5;
    config
}

fn padding_titles() -> Vec<String> {
    (1..=20).map(|i| format!("P{:02}", i)).collect()
}

/// A -> {B, C, P01..P20}, B -> {C, D}, C -> {D}, D -> {}, Pnn -> {Qnn}
///
/// The Q pages are not served, so they fail with 404.
async fn mount_scenario(server: &MockServer) {
    let padding = padding_titles();
    let mut a_links: Vec<&str> = vec!["B", "C"];
    a_links.extend(padding.iter().map(String::as_str));

    mount_article(server, "A", &a_links).await;
    mount_article(server, "B", &["C", "D"]).await;
    mount_article(server, "C", &["D"]).await;
    mount_article(server, "D", &[]).await;
    for p in &padding {
        let q = p.replace('P', "Q");
        mount_article(server, p, &[q.as_str()]).await;
    }
}

fn set(ids: &[&str]) -> BTreeSet<ArticleId> {
    ids.iter().map(|s| ArticleId::new(*s)).collect()
}

fn expected_scenario_graph() -> ResultGraph {
    let padding = padding_titles();
    let mut a_links: Vec<&str> = vec!["B", "C"];
    a_links.extend(padding.iter().map(String::as_str));

    let mut graph = ResultGraph::new();
    graph.insert(ArticleId::new("A"), set(&a_links));
    graph.insert(ArticleId::new("B"), set(&["C", "D"]));
    graph.insert(ArticleId::new("C"), set(&["D"]));
    graph.insert(ArticleId::new("D"), set(&[]));
    for p in &padding {
        let q = p.replace('P', "Q");
        graph.insert(ArticleId::new(p.as_str()), set(&[q.as_str()]));
    }
    graph
}

async fn get_request_paths(server: &MockServer) -> Vec<String> {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .map(|r| r.url.path().to_string())
        .collect()
}

#[tokio::test]
async fn test_full_crawl_writes_graph() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("wiki.json");
    let config = test_config(&server, &output);

    let outcome = crawl(&config, ArticleId::new("A")).await.expect("Crawl failed");

    assert!(outcome.is_accepted());
    let stats = outcome.stats();
    assert_eq!(stats.articles_gathered, 24);
    assert_eq!(stats.pages_parsed, 24);
    assert_eq!(stats.pages_failed, 20);
    assert_eq!(stats.levels_completed, 3);
    assert_eq!(stats.stop_reason, StopReason::DepthReached);

    let written = load_graph(&output).expect("Graph file missing");
    assert_eq!(written, expected_scenario_graph());
}

#[tokio::test]
async fn test_sequential_and_concurrent_write_identical_files() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = TempDir::new().unwrap();

    let concurrent_path = dir.path().join("concurrent.json");
    let mut concurrent = test_config(&server, &concurrent_path);
    concurrent.crawler.scheduling = SchedulingMode::Concurrent;
    concurrent.crawler.max_concurrent_fetches = 8;
    crawl(&concurrent, ArticleId::new("A")).await.unwrap();

    let sequential_path = dir.path().join("sequential.json");
    let mut sequential = test_config(&server, &sequential_path);
    sequential.crawler.scheduling = SchedulingMode::Sequential;
    crawl(&sequential, ArticleId::new("A")).await.unwrap();

    let a = std::fs::read_to_string(&concurrent_path).unwrap();
    let b = std::fs::read_to_string(&sequential_path).unwrap();
    assert_eq!(a, b);
}

#[tokio::test]
async fn test_no_article_fetched_twice() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;
    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir.path().join("wiki.json"));

    crawl(&config, ArticleId::new("A")).await.unwrap();

    let paths = get_request_paths(&server).await;
    let unique: BTreeSet<&String> = paths.iter().collect();
    assert_eq!(paths.len(), unique.len(), "duplicate fetches: {:?}", paths);
    assert!(!paths.iter().any(|p| p.contains(':')));
    assert!(!paths.iter().any(|p| p == "/wiki/Main_Page"));
}

#[tokio::test]
async fn test_rejected_crawl_leaves_file_untouched() {
    let server = MockServer::start().await;
    mount_article(&server, "A", &["B", "C"]).await;
    mount_article(&server, "B", &["C", "D"]).await;
    mount_article(&server, "C", &["D", "E"]).await;
    mount_article(&server, "D", &[]).await;
    mount_article(&server, "E", &["A"]).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("wiki.json");
    std::fs::write(&output, "previous crawl").unwrap();
    let config = test_config(&server, &output);

    let outcome = crawl(&config, ArticleId::new("A")).await.unwrap();

    assert!(!outcome.is_accepted());
    assert_eq!(outcome.stats().articles_gathered, 5);
    assert!(outcome.rejection_message().unwrap().contains("'A'"));
    assert_eq!(std::fs::read_to_string(&output).unwrap(), "previous crawl");
}

#[tokio::test]
async fn test_rejected_crawl_creates_no_file() {
    let server = MockServer::start().await;
    mount_article(&server, "A", &["B"]).await;

    let dir = TempDir::new().unwrap();
    let output = dir.path().join("wiki.json");
    let config = test_config(&server, &output);

    let outcome = crawl(&config, ArticleId::new("A")).await.unwrap();

    assert!(!outcome.is_accepted());
    assert!(!output.exists());
}

#[tokio::test]
async fn test_depth_bound() {
    let server = MockServer::start().await;
    for i in 0..10 {
        let next = format!("N{}", i + 1);
        mount_article(&server, &format!("N{}", i), &[next.as_str()]).await;
    }

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, &dir.path().join("wiki.json"));
    config.crawler.min_graph_size = 0;

    let outcome = crawl(&config, ArticleId::new("N0")).await.unwrap();

    let graph = outcome.graph().unwrap();
    let keys: Vec<&str> = graph.keys().map(ArticleId::as_str).collect();
    assert_eq!(keys, vec!["N0", "N1", "N2"]);
    assert_eq!(get_request_paths(&server).await.len(), 3);
}

#[tokio::test]
async fn test_page_budget_stops_crawl() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, &dir.path().join("wiki.json"));
    config.crawler.scheduling = SchedulingMode::Sequential;
    config.crawler.page_budget = 5;
    config.crawler.min_graph_size = 0;

    let outcome = crawl(&config, ArticleId::new("A")).await.unwrap();

    assert_eq!(outcome.stats().pages_parsed, 5);
    assert_eq!(outcome.stats().stop_reason, StopReason::BudgetExhausted);
    assert_eq!(outcome.graph().unwrap().len(), 5);
    assert_eq!(get_request_paths(&server).await.len(), 5);
}

#[tokio::test]
async fn test_concurrent_budget_overshoot_is_bounded() {
    let server = MockServer::start().await;
    mount_scenario(&server).await;

    let dir = TempDir::new().unwrap();
    let mut config = test_config(&server, &dir.path().join("wiki.json"));
    config.crawler.max_concurrent_fetches = 4;
    config.crawler.page_budget = 6;
    config.crawler.min_graph_size = 0;

    let outcome = crawl(&config, ArticleId::new("A")).await.unwrap();

    let parsed = outcome.stats().pages_parsed;
    assert!(parsed >= 6 && parsed <= 6 + 3, "parsed {}", parsed);
    assert_eq!(outcome.stats().stop_reason, StopReason::BudgetExhausted);
}

#[tokio::test]
async fn test_server_errors_do_not_stop_crawl() {
    let server = MockServer::start().await;
    let padding = padding_titles();
    let mut seed_links: Vec<&str> = vec!["Broken"];
    seed_links.extend(padding.iter().map(String::as_str));
    mount_article(&server, "Seed", &seed_links).await;
    Mock::given(method("GET"))
        .and(path("/wiki/Broken"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    for p in &padding {
        mount_article(&server, p, &[]).await;
    }

    let dir = TempDir::new().unwrap();
    let config = test_config(&server, &dir.path().join("wiki.json"));

    let outcome = crawl(&config, ArticleId::new("Seed")).await.unwrap();

    assert!(outcome.is_accepted());
    let graph = outcome.graph().unwrap();
    assert_eq!(graph.len(), 21);
    assert!(!graph.contains_key(&ArticleId::new("Broken")));
    assert!(graph[&ArticleId::new("Seed")].contains(&ArticleId::new("Broken")));
    assert_eq!(outcome.stats().pages_failed, 1);
}

#[test]
fn test_cli_rejects_shallow_depth() {
    let output = Command::new(env!("CARGO_BIN_EXE_wiki-ripple"))
        .args(["--page", "Rust", "--depth", "2"])
        .output()
        .expect("failed to run wiki-ripple");

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Depth must be at least 3"), "{}", stderr);
}

#[test]
fn test_cli_dry_run_encodes_seed() {
    let output = Command::new(env!("CARGO_BIN_EXE_wiki-ripple"))
        .args(["--quiet", "--dry-run", "-p", "Python_(programming_language)"])
        .output()
        .expect("failed to run wiki-ripple");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Python_%28programming_language%29"), "{}", stdout);
    assert!(stdout.contains("Max depth: 3"));
}
