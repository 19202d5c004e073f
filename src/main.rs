//! Wiki-Ripple main entry point
//!
//! This is the command-line interface for the Wiki-Ripple crawler.

use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use wiki_ripple::article::ArticleId;
use wiki_ripple::config::{load_config_with_hash, Config, DEFAULT_SEED_TITLE, MIN_DEPTH};
use wiki_ripple::crawler::{crawl, format_user_agent, CrawlOutcome, Scheduling};

/// Wiki-Ripple: cache encyclopedia pages as a link graph
///
/// Starting from one article, Wiki-Ripple follows article links level by level
/// up to the given depth (and at most the page budget), then writes the
/// resulting adjacency map as JSON.
#[derive(Parser, Debug)]
#[command(name = "wiki-ripple")]
#[command(version)]
#[command(about = "Cache encyclopedia pages as a graph", long_about = None)]
struct Cli {
    /// Starting page name
    #[arg(short, long, default_value = DEFAULT_SEED_TITLE)]
    page: String,

    /// Maximum depth to follow links
    #[arg(short, long, value_parser = parse_depth)]
    depth: Option<u32>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Where to write the graph (overrides the configuration)
    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration without crawling
    #[arg(long)]
    dry_run: bool,
}

/// Parses the depth flag, rejecting values below the minimum
fn parse_depth(value: &str) -> Result<u32, String> {
    let depth: u32 = value
        .parse()
        .map_err(|_| format!("'{}' is not a valid depth", value))?;
    if depth < MIN_DEPTH {
        return Err(format!("Depth must be at least {}", MIN_DEPTH));
    }
    Ok(depth)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);
    tracing::info!("parser started");

    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(depth) = cli.depth {
        config.crawler.max_depth = depth;
    }
    if let Some(output) = cli.output {
        config.output.graph_path = output;
    }

    let seed = ArticleId::from_title(&cli.page);

    if cli.dry_run {
        print_dry_run(&config, &seed);
        return Ok(());
    }

    handle_crawl(&config, seed).await?;
    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("wiki_ripple=info,warn"),
            1 => EnvFilter::new("wiki_ripple=debug,info"),
            2 => EnvFilter::new("wiki_ripple=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Handles the --dry-run mode: shows what would be crawled
fn print_dry_run(config: &Config, seed: &ArticleId) {
    println!("=== Wiki-Ripple Dry Run ===\n");

    println!("Seed:");
    println!("  Article: {}", seed);
    println!("  URL: {}{}", config.site.base_url, seed);

    println!("\nCrawler Configuration:");
    println!("  Max depth: {}", config.crawler.max_depth);
    println!("  Page budget: {}", config.crawler.page_budget);
    println!("  Minimum graph size: {}", config.crawler.min_graph_size);
    println!("  Scheduling: {:?}", Scheduling::from(&config.crawler));
    println!("  Linkless pages: {:?}", config.crawler.linkless_pages);
    println!("  Request timeout: {}s", config.crawler.request_timeout_secs);

    println!("\nSite:");
    println!("  Article prefix: {}", config.site.article_prefix);
    println!("  Content selector: {}", config.site.content_selector);
    println!("  User agent: {}", format_user_agent(&config.user_agent));

    println!("\nOutput:");
    println!("  Graph: {}", config.output.graph_path);
}

/// Handles the main crawl operation
async fn handle_crawl(config: &Config, seed: ArticleId) -> Result<(), Box<dyn std::error::Error>> {
    match crawl(config, seed).await {
        Ok(outcome @ CrawlOutcome::Rejected { .. }) => {
            if let Some(message) = outcome.rejection_message() {
                println!("{}", message);
            }
            Ok(())
        }
        Ok(CrawlOutcome::Accepted { graph, .. }) => {
            tracing::info!(
                "Crawl completed successfully: {} articles in {}",
                graph.len(),
                config.output.graph_path
            );
            Ok(())
        }
        Err(e) => {
            tracing::error!("Crawl failed: {}", e);
            Err(e.into())
        }
    }
}
