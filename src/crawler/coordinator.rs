//! Crawler coordinator - main crawl orchestration logic
//!
//! This module drives the level loop: it asks the frontier controller for the
//! next level, hands it to the scheduler, settles the level, and repeats until
//! the controller finishes. It then applies the acceptance policy to the result.

use crate::article::ArticleId;
use crate::config::{Config, CrawlerConfig};
use crate::crawler::frontier::{CrawlLimits, FrontierController, ResultGraph};
use crate::crawler::resolver::{HttpResolver, Resolver};
use crate::crawler::scheduler::Scheduling;
use crate::state::StopReason;
use crate::WikiError;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Figures reported at the end of a crawl
#[derive(Debug, Clone)]
pub struct CrawlStats {
    pub started_at: DateTime<Utc>,
    pub elapsed: Duration,
    pub levels_completed: u32,
    pub pages_parsed: u32,
    pub pages_failed: u32,
    /// Number of keys in the result graph
    pub articles_gathered: usize,
    pub stop_reason: StopReason,
}

/// Result of a crawl after the acceptance policy
#[derive(Debug, Clone)]
pub enum CrawlOutcome {
    /// The graph is large enough to be written out
    Accepted { graph: ResultGraph, stats: CrawlStats },

    /// The graph is below the minimum size; nothing is written
    Rejected {
        seed: ArticleId,
        min_graph_size: usize,
        stats: CrawlStats,
    },
}

impl CrawlOutcome {
    pub fn stats(&self) -> &CrawlStats {
        match self {
            Self::Accepted { stats, .. } | Self::Rejected { stats, .. } => stats,
        }
    }

    pub fn is_accepted(&self) -> bool {
        matches!(self, Self::Accepted { .. })
    }

    /// Returns the graph of an accepted crawl
    pub fn graph(&self) -> Option<&ResultGraph> {
        match self {
            Self::Accepted { graph, .. } => Some(graph),
            Self::Rejected { .. } => None,
        }
    }

    /// Operator-facing explanation for a rejected crawl
    pub fn rejection_message(&self) -> Option<String> {
        match self {
            Self::Accepted { .. } => None,
            Self::Rejected {
                seed,
                min_graph_size,
                ..
            } => Some(format!(
                "The page '{}' has less than {} links. Please choose another start page.",
                seed, min_graph_size
            )),
        }
    }
}

/// Main crawler coordinator structure
pub struct Coordinator {
    config: CrawlerConfig,
    seed: ArticleId,
    resolver: Arc<dyn Resolver>,
    scheduling: Scheduling,
}

impl Coordinator {
    /// Creates a coordinator that resolves pages over HTTP
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - HTTP client and link extractor built
    /// * `Err(WikiError)` - The client or the content selector could not be built
    pub fn new(config: &Config, seed: ArticleId) -> Result<Self, WikiError> {
        let resolver: Arc<dyn Resolver> = Arc::new(HttpResolver::new(config)?);
        Ok(Self::with_resolver(config.crawler.clone(), seed, resolver))
    }

    /// Creates a coordinator around any resolver
    pub fn with_resolver(
        config: CrawlerConfig,
        seed: ArticleId,
        resolver: Arc<dyn Resolver>,
    ) -> Self {
        let scheduling = Scheduling::from(&config);
        Self {
            config,
            seed,
            resolver,
            scheduling,
        }
    }

    /// Runs the crawl to completion
    ///
    /// Per-page failures never surface here; an `Err` means the crawl state
    /// machine itself was misused.
    pub async fn run(&self) -> Result<CrawlOutcome, WikiError> {
        let started_at = Utc::now();
        let start = Instant::now();

        tracing::info!(
            "Starting crawl from {} (max depth {}, page budget {}, {:?})",
            self.seed,
            self.config.max_depth,
            self.config.page_budget,
            self.scheduling
        );

        let mut controller =
            FrontierController::new(self.seed.clone(), CrawlLimits::from(&self.config));

        while !controller.is_finished() {
            let level = controller.levels_completed();
            let members = controller.begin_level()?;
            tracing::info!(
                "Level {}: resolving {} articles ({} pages parsed so far)",
                level,
                members.len(),
                controller.pages_parsed()
            );

            self.scheduling
                .run_level(&self.resolver, members, &mut controller)
                .await?;

            let summary = controller.settle()?;
            tracing::info!(
                level = summary.level,
                dispatched = summary.dispatched,
                resolved = summary.resolved,
                failed = summary.failed,
                next_frontier = summary.next_frontier,
                gathered = controller.gathered_count(),
                "Level settled"
            );
        }

        // Loop only exits once the controller has finished, which always records a reason
        let stop_reason = controller
            .stop_reason()
            .unwrap_or(StopReason::FrontierEmpty);

        let stats = CrawlStats {
            started_at,
            elapsed: start.elapsed(),
            levels_completed: controller.levels_completed(),
            pages_parsed: controller.pages_parsed(),
            pages_failed: controller.pages_failed(),
            articles_gathered: controller.result().len(),
            stop_reason,
        };

        tracing::info!(
            "Finished parsing up to level {} ({})",
            stats.levels_completed,
            stats.stop_reason
        );
        tracing::info!("Total articles gathered: {}", stats.articles_gathered);
        tracing::info!(
            "Total pages parsed: {} ({} failed)",
            stats.pages_parsed,
            stats.pages_failed
        );
        tracing::info!("Time elapsed: {:.3}s", stats.elapsed.as_secs_f64());

        if stats.articles_gathered < self.config.min_graph_size {
            return Ok(CrawlOutcome::Rejected {
                seed: self.seed.clone(),
                min_graph_size: self.config.min_graph_size,
                stats,
            });
        }

        Ok(CrawlOutcome::Accepted {
            graph: controller.into_result(),
            stats,
        })
    }
}

/// Runs a crawl over HTTP without writing anything
///
/// # Example
///
/// ```no_run
/// use wiki_ripple::article::ArticleId;
/// use wiki_ripple::config::Config;
/// use wiki_ripple::crawler::run_crawl;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let outcome = run_crawl(&Config::default(), ArticleId::from_title("Rust")).await?;
/// println!("accepted: {}", outcome.is_accepted());
/// # Ok(())
/// # }
/// ```
pub async fn run_crawl(config: &Config, seed: ArticleId) -> Result<CrawlOutcome, WikiError> {
    Coordinator::new(config, seed)?.run().await
}
