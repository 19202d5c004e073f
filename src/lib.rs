//! Wiki-Ripple: a bounded link-graph mapper for online encyclopedias
//!
//! This crate crawls an encyclopedia outward from a seed article, level by level,
//! and records which articles each page links to. The resulting adjacency map is
//! written as JSON and can be queried for shortest paths between two articles.

pub mod article;
pub mod config;
pub mod crawler;
pub mod graph;
pub mod output;
pub mod state;

use thiserror::Error;

/// Main error type for Wiki-Ripple operations
#[derive(Debug, Error)]
pub enum WikiError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Graph file error: {0}")]
    GraphFile(#[from] GraphFileError),

    #[error("Invalid crawl phase transition: {from:?} -> {to:?}")]
    InvalidTransition {
        from: state::CrawlPhase,
        to: state::CrawlPhase,
    },
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid content selector: {0}")]
    InvalidSelector(String),
}

/// Errors raised while reading or writing the graph artifact
#[derive(Debug, Error)]
pub enum GraphFileError {
    #[error("Graph file not found: {0}")]
    NotFound(String),

    #[error("Malformed graph file {path}: {source}")]
    Malformed {
        path: String,
        source: serde_json::Error,
    },

    #[error("Failed to serialize graph: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for graph artifact operations
pub type GraphFileResult<T> = std::result::Result<T, GraphFileError>;

// Re-export commonly used types
pub use article::ArticleId;
pub use config::Config;
pub use crawler::{CrawlOutcome, CrawlStats, ResultGraph};
pub use state::{CrawlPhase, StopReason};
