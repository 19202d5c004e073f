//! Article identifiers
//!
//! An [`ArticleId`] is the final path segment of an article URL, kept exactly as it
//! appears in page markup (already percent-encoded). Two identifiers that differ only
//! in their encoding are treated as different articles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one encyclopedia article
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArticleId(String);

impl ArticleId {
    /// Wraps an identifier that is already in its encoded link-path form
    pub fn new(encoded: impl Into<String>) -> Self {
        Self(encoded.into())
    }

    /// Builds an identifier from a human-entered article title
    ///
    /// Every character outside the unreserved set (`A-Z a-z 0-9 - _ . ~`) is
    /// percent-encoded, including `/`, so the title always maps to a single
    /// path segment.
    ///
    /// # Examples
    ///
    /// ```
    /// use wiki_ripple::article::ArticleId;
    ///
    /// let id = ArticleId::from_title("Python_(programming_language)");
    /// assert_eq!(id.as_str(), "Python_%28programming_language%29");
    /// ```
    pub fn from_title(title: &str) -> Self {
        Self(urlencoding::encode(title).into_owned())
    }

    /// Returns the encoded identifier
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the identifier decoded for display, falling back to the raw form
    /// when the encoding is not valid UTF-8
    pub fn title(&self) -> String {
        urlencoding::decode(&self.0)
            .map(|decoded| decoded.into_owned())
            .unwrap_or_else(|_| self.0.clone())
    }
}

impl fmt::Display for ArticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArticleId {
    fn from(encoded: &str) -> Self {
        Self::new(encoded)
    }
}

impl From<String> for ArticleId {
    fn from(encoded: String) -> Self {
        Self(encoded)
    }
}

impl AsRef<str> for ArticleId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Builds the retrieval address for an article
///
/// The base URL is concatenated with the identifier as-is; the base is expected
/// to end with `/`.
///
/// # Examples
///
/// ```
/// use wiki_ripple::article::{article_url, ArticleId};
///
/// let url = article_url("https://en.wikipedia.org/wiki/", &ArticleId::new("Rust"));
/// assert_eq!(url, "https://en.wikipedia.org/wiki/Rust");
/// ```
pub fn article_url(base_url: &str, id: &ArticleId) -> String {
    format!("{}{}", base_url, id.as_str())
}
