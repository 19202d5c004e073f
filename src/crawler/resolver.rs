//! Page resolution: fetch a page and extract its article links
//!
//! Resolving is the unit of work dispatched for every frontier member. Failures
//! are folded into [`Resolution::Failed`] here and never propagate further.

use crate::article::ArticleId;
use crate::config::{Config, SiteConfig};
use crate::crawler::fetcher::{build_http_client, fetch_article, FailureKind, FetchResult};
use crate::crawler::parser::LinkExtractor;
use crate::WikiError;
use async_trait::async_trait;
use reqwest::Client;
use std::collections::BTreeSet;
use std::time::Duration;

/// Outcome of resolving one article
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The page was fetched and parsed; the set may be empty
    Resolved(BTreeSet<ArticleId>),

    /// The page could not be fetched
    Failed(FailureKind),
}

/// Anything that can turn an article identifier into its outgoing links
///
/// Implementations must be cheap to share across tasks; the concurrent scheduler
/// calls `resolve` from many tasks at once.
#[async_trait]
pub trait Resolver: Send + Sync {
    async fn resolve(&self, id: &ArticleId) -> Resolution;
}

/// Resolver backed by HTTP fetches against the configured site
pub struct HttpResolver {
    client: Client,
    base_url: String,
    extractor: LinkExtractor,
}

impl HttpResolver {
    /// Builds a resolver with its own HTTP client from the configuration
    pub fn new(config: &Config) -> Result<Self, WikiError> {
        let client = build_http_client(
            &config.user_agent,
            Duration::from_secs(config.crawler.request_timeout_secs),
        )?;
        Self::with_client(client, &config.site)
    }

    /// Builds a resolver around an existing client
    pub fn with_client(client: Client, site: &SiteConfig) -> Result<Self, WikiError> {
        Ok(Self {
            client,
            base_url: site.base_url.clone(),
            extractor: LinkExtractor::new(site)?,
        })
    }
}

#[async_trait]
impl Resolver for HttpResolver {
    async fn resolve(&self, id: &ArticleId) -> Resolution {
        match fetch_article(&self.client, &self.base_url, id).await {
            FetchResult::Success { body, .. } => Resolution::Resolved(self.extractor.extract(&body)),
            failure => Resolution::Failed(
                failure
                    .failure_kind()
                    .unwrap_or(FailureKind::Unclassified),
            ),
        }
    }
}
