//! Statistics for a result graph
//!
//! This module summarises the size and shape of a graph artifact for display.

use crate::article::ArticleId;
use crate::crawler::ResultGraph;

/// Graph statistics summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphStatistics {
    /// Number of resolved articles (keys)
    pub articles: usize,

    /// Total number of outgoing links
    pub total_links: usize,

    /// Links whose target is not itself a key
    pub dangling_links: usize,

    /// Articles without any outgoing link
    pub linkless_articles: usize,

    /// Article with the most outgoing links and its count
    pub most_linked_from: Option<(ArticleId, usize)>,
}

impl GraphStatistics {
    /// Computes statistics for a graph
    pub fn from_graph(graph: &ResultGraph) -> Self {
        let mut total_links = 0;
        let mut dangling_links = 0;
        let mut linkless_articles = 0;
        let mut most_linked_from: Option<(ArticleId, usize)> = None;

        for (article, links) in graph {
            total_links += links.len();
            dangling_links += links.iter().filter(|t| !graph.contains_key(*t)).count();

            if links.is_empty() {
                linkless_articles += 1;
            }

            // Ties keep the first article in key order
            if most_linked_from
                .as_ref()
                .map_or(true, |(_, count)| links.len() > *count)
            {
                most_linked_from = Some((article.clone(), links.len()));
            }
        }

        Self {
            articles: graph.len(),
            total_links,
            dangling_links,
            linkless_articles,
            most_linked_from,
        }
    }

    /// Links that stay inside the graph after dangling targets are pruned
    pub fn internal_links(&self) -> usize {
        self.total_links - self.dangling_links
    }
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &GraphStatistics) {
    println!("=== Graph Statistics ===\n");

    println!("Overview:");
    println!("  Articles: {}", stats.articles);
    println!("  Total links: {}", stats.total_links);
    println!("  Internal links: {}", stats.internal_links());
    println!("  Dangling links: {}", stats.dangling_links);
    println!("  Articles without links: {}", stats.linkless_articles);

    if let Some((article, count)) = &stats.most_linked_from {
        println!("  Most outgoing links: {} ({})", article.title(), count);
    }

    let average = if stats.articles > 0 {
        stats.total_links as f64 / stats.articles as f64
    } else {
        0.0
    };
    println!("  Average out-degree: {:.1}", average);
}
