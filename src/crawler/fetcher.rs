//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building one connection-reusing HTTP client with a proper user agent string
//! - GET requests for article pages
//! - Error classification (transport, timeout, unclassified)
//!
//! No retries are performed; every failure is reported once and the crawl moves on.

use crate::article::{article_url, ArticleId};
use crate::config::UserAgentConfig;
use reqwest::Client;
use std::fmt;
use std::time::Duration;

/// Class of a failed fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// Non-2xx status or connection failure
    Transport,
    /// The request timed out
    Timeout,
    /// Anything else (body decoding, builder errors, ...)
    Unclassified,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Transport => "transport",
            Self::Timeout => "timeout",
            Self::Unclassified => "unclassified",
        })
    }
}

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// HTTP status code
        status_code: u16,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Connection could not be established
    ConnectionError {
        /// Error description
        error: String,
    },

    /// Request exceeded the client timeout
    Timeout,

    /// Any other failure
    Other {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the failure class, or `None` for a successful fetch
    pub fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Success { .. } => None,
            Self::HttpError { .. } | Self::ConnectionError { .. } => Some(FailureKind::Transport),
            Self::Timeout => Some(FailureKind::Timeout),
            Self::Other { .. } => Some(FailureKind::Unclassified),
        }
    }
}

/// Builds an HTTP client with proper configuration
///
/// The client keeps a connection pool, so one instance is shared by every fetch
/// of a crawl.
///
/// # Arguments
///
/// * `config` - The user agent configuration
/// * `timeout` - Per-request timeout
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use wiki_ripple::config::UserAgentConfig;
/// use wiki_ripple::crawler::build_http_client;
///
/// let client = build_http_client(&UserAgentConfig::default(), Duration::from_secs(30)).unwrap();
/// ```
pub fn build_http_client(
    config: &UserAgentConfig,
    timeout: Duration,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(format_user_agent(config))
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Formats the user agent as `CrawlerName/Version (+ContactURL; ContactEmail)`
pub fn format_user_agent(config: &UserAgentConfig) -> String {
    format!(
        "{}/{} (+{}; {})",
        config.crawler_name, config.crawler_version, config.contact_url, config.contact_email
    )
}

/// Fetches one article page
///
/// # Error Classification
///
/// | Condition | Result | Kind |
/// |-----------|--------|------|
/// | 2xx | Success | - |
/// | Non-2xx status | HttpError | Transport |
/// | Connection refused / DNS | ConnectionError | Transport |
/// | Timeout | Timeout | Timeout |
/// | Anything else | Other | Unclassified |
///
/// Every failure is logged at warn level with the failed address.
pub async fn fetch_article(client: &Client, base_url: &str, id: &ArticleId) -> FetchResult {
    let url = article_url(base_url, id);
    let result = fetch_url(client, &url).await;

    match &result {
        FetchResult::Success {
            final_url,
            status_code,
            ..
        } => {
            tracing::info!("url fetched: {}", url);
            if *final_url != url {
                tracing::debug!("{} redirected to {} (HTTP {})", url, final_url, status_code);
            }
        }
        FetchResult::HttpError { status_code } => {
            tracing::warn!("client side error on url: {}, HTTP {}", url, status_code)
        }
        FetchResult::ConnectionError { error } => {
            tracing::warn!("client side error on url: {}, {}", url, error)
        }
        FetchResult::Timeout => tracing::warn!("timeout reached on url: {}", url),
        FetchResult::Other { error } => {
            tracing::warn!("exception raised on url: {} {}", url, error)
        }
    }

    result
}

/// Issues a single GET request and classifies the outcome
async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => return classify_error(e),
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success {
            final_url,
            status_code: status.as_u16(),
            body,
        },
        Err(e) => classify_error(e),
    }
}

fn classify_error(e: reqwest::Error) -> FetchResult {
    if e.is_timeout() {
        FetchResult::Timeout
    } else if e.is_connect() {
        FetchResult::ConnectionError {
            error: e.to_string(),
        }
    } else {
        FetchResult::Other {
            error: e.to_string(),
        }
    }
}
