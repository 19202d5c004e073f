//! Crawler module for building the article link graph
//!
//! This module contains the core crawling logic:
//! - HTTP fetching with failure classification
//! - Article link extraction
//! - Page resolution (fetch + extract, failures swallowed)
//! - The frontier controller state machine
//! - Sequential and concurrent level scheduling
//! - Overall crawl coordination and the acceptance policy

mod coordinator;
mod fetcher;
mod frontier;
mod parser;
mod resolver;
mod scheduler;

pub use coordinator::{run_crawl, Coordinator, CrawlOutcome, CrawlStats};
pub use fetcher::{build_http_client, fetch_article, format_user_agent, FailureKind, FetchResult};
pub use frontier::{CrawlLimits, FrontierController, LevelSummary, ResultGraph};
pub use parser::LinkExtractor;
pub use resolver::{HttpResolver, Resolution, Resolver};
pub use scheduler::Scheduling;

use crate::article::ArticleId;
use crate::config::Config;
use crate::output::write_graph;
use crate::WikiError;
use std::path::Path;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Build the HTTP client and link extractor
/// 2. Crawl level by level from the seed
/// 3. Apply the acceptance policy
/// 4. Write the graph artifact if the crawl was accepted
///
/// A rejected crawl leaves any existing artifact untouched.
pub async fn crawl(config: &Config, seed: ArticleId) -> Result<CrawlOutcome, WikiError> {
    let outcome = run_crawl(config, seed).await?;

    match &outcome {
        CrawlOutcome::Accepted { graph, .. } => {
            let path = Path::new(&config.output.graph_path);
            write_graph(graph, path)?;
            tracing::info!("Graph with {} articles written to {}", graph.len(), path.display());
        }
        CrawlOutcome::Rejected { .. } => {
            tracing::warn!("Crawl rejected, {} not written", config.output.graph_path);
        }
    }

    Ok(outcome)
}
