//! Article link extraction
//!
//! This module locates the main content region of an article page and collects
//! the identifiers of every other article it links to.

use crate::article::ArticleId;
use crate::config::SiteConfig;
use crate::ConfigError;
use scraper::{Html, Selector};
use std::collections::BTreeSet;

/// Namespace separator; links containing it point at categories, talk pages,
/// special pages and other non-article namespaces
const NAMESPACE_SEPARATOR: char = ':';

/// Extracts same-site article links from page markup
///
/// # Link Extraction Rules
///
/// **Include:**
/// - `<a href="...">` elements inside the content region whose href starts with
///   the article prefix (`/wiki/` by default)
///
/// **Exclude:**
/// - hrefs containing `:` (namespaced pages such as `Category:` or `Talk:`)
/// - absolute URLs, even when they point at the same site
/// - links whose final path segment is empty
///
/// The identifier is the final path segment, kept percent-encoded as written.
/// Any `#fragment` or `?query` suffix is dropped since it is not part of the path.
#[derive(Debug, Clone)]
pub struct LinkExtractor {
    content: Selector,
    anchors: Selector,
    article_prefix: String,
}

impl LinkExtractor {
    /// Builds an extractor for the given site layout
    ///
    /// # Returns
    ///
    /// * `Ok(LinkExtractor)` - Selectors compiled
    /// * `Err(ConfigError)` - The content selector is not valid CSS
    pub fn new(site: &SiteConfig) -> Result<Self, ConfigError> {
        let content = Selector::parse(&site.content_selector).map_err(|e| {
            ConfigError::InvalidSelector(format!("'{}': {:?}", site.content_selector, e))
        })?;
        let anchors = Selector::parse("a[href]")
            .map_err(|e| ConfigError::InvalidSelector(format!("'a[href]': {:?}", e)))?;

        Ok(Self {
            content,
            anchors,
            article_prefix: site.article_prefix.clone(),
        })
    }

    /// Returns the set of article identifiers linked from the content region
    ///
    /// Never fails: markup without a content region yields an empty set.
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_ripple::config::SiteConfig;
    /// use wiki_ripple::crawler::LinkExtractor;
    ///
    /// let extractor = LinkExtractor::new(&SiteConfig::default()).unwrap();
    /// let html = r#"<div id="bodyContent">
    ///     <a href="/wiki/Category:Foo">Foo</a>
    ///     <a href="/wiki/Bar">Bar</a>
    /// </div>"#;
    /// let links = extractor.extract(html);
    /// assert_eq!(links.len(), 1);
    /// assert!(links.iter().any(|id| id.as_str() == "Bar"));
    /// ```
    pub fn extract(&self, html: &str) -> BTreeSet<ArticleId> {
        let document = Html::parse_document(html);

        let Some(body) = document.select(&self.content).next() else {
            tracing::debug!("No content region matched, page has no article links");
            return BTreeSet::new();
        };

        body.select(&self.anchors)
            .filter_map(|element| element.value().attr("href"))
            .filter_map(|href| self.article_id_from_href(href))
            .collect()
    }

    /// Maps one href to an article identifier, or `None` if it is not an article link
    fn article_id_from_href(&self, href: &str) -> Option<ArticleId> {
        if !href.starts_with(&self.article_prefix) || href.contains(NAMESPACE_SEPARATOR) {
            return None;
        }

        let path = href.split(['#', '?']).next()?;

        path.rsplit('/')
            .next()
            .filter(|segment| !segment.is_empty())
            .map(ArticleId::new)
    }
}
