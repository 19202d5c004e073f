use serde::Deserialize;

/// Default article the crawl starts from when no page is given
pub const DEFAULT_SEED_TITLE: &str = "Python_(programming_language)";

/// Main configuration structure for Wiki-Ripple
///
/// Every section is optional in the TOML file; missing keys fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub site: SiteConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// How resolve calls within one level are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchedulingMode {
    /// One resolve at a time
    Sequential,
    /// All resolves of a level issued together over a bounded pool
    #[default]
    Concurrent,
}

/// What to do with pages that load fine but contain no article links
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinklessPolicy {
    /// Treat them as resolved: gathered, counted and recorded with no links
    #[default]
    Count,
    /// Treat them like failed pages: not gathered, not counted, not recorded
    Skip,
}

/// Crawler behavior configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Maximum number of levels to crawl from the seed
    #[serde(rename = "max-depth")]
    pub max_depth: u32,

    /// Global cap on pages resolved across the whole crawl
    #[serde(rename = "page-budget")]
    pub page_budget: u32,

    /// Smallest result graph that is accepted and written out
    #[serde(rename = "min-graph-size")]
    pub min_graph_size: usize,

    /// Maximum number of page fetches in flight at once
    #[serde(rename = "max-concurrent-fetches")]
    pub max_concurrent_fetches: u32,

    /// Scheduling model for a level
    pub scheduling: SchedulingMode,

    /// Handling of pages without article links
    #[serde(rename = "linkless-pages")]
    pub linkless_pages: LinklessPolicy,

    /// Per-request timeout (seconds)
    #[serde(rename = "request-timeout-secs")]
    pub request_timeout_secs: u64,
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            max_depth: 3,
            page_budget: 1000,
            min_graph_size: 20,
            max_concurrent_fetches: 16,
            scheduling: SchedulingMode::default(),
            linkless_pages: LinklessPolicy::default(),
            request_timeout_secs: 30,
        }
    }
}

/// Site layout configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Base URL that article identifiers are appended to
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Path prefix that marks a link as an article link
    #[serde(rename = "article-prefix")]
    pub article_prefix: String,

    /// CSS selector of the main content region
    #[serde(rename = "content-selector")]
    pub content_selector: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            base_url: "https://en.wikipedia.org/wiki/".to_string(),
            article_prefix: "/wiki/".to_string(),
            content_selector: "div#bodyContent".to_string(),
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UserAgentConfig {
    /// Name of the crawler
    #[serde(rename = "crawler-name")]
    pub crawler_name: String,

    /// Version of the crawler
    #[serde(rename = "crawler-version")]
    pub crawler_version: String,

    /// URL with information about the crawler
    #[serde(rename = "contact-url")]
    pub contact_url: String,

    /// Email address for crawler-related contact
    #[serde(rename = "contact-email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            crawler_name: "WikiRipple".to_string(),
            crawler_version: env!("CARGO_PKG_VERSION").to_string(),
            contact_url: "https://example.com/wiki-ripple".to_string(),
            contact_email: "wiki-ripple@example.com".to_string(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Path of the JSON graph artifact
    #[serde(rename = "graph-path")]
    pub graph_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_path: "wiki.json".to_string(),
        }
    }
}
