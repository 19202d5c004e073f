//! Shortest-path queries over a crawled graph
//!
//! The query side reads the same adjacency map the crawler writes. Before
//! searching, links to articles that were never resolved (targets that are not
//! keys) are pruned, so every vertex of the search graph is a resolved article.
//! Paths are found with a plain breadth-first search since every link has the
//! same weight.

use crate::article::ArticleId;
use crate::crawler::ResultGraph;
use std::collections::{BTreeMap, HashMap, VecDeque};

/// Result of a shortest-path query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathQuery {
    /// Vertices from start to end, both included
    Found(Vec<ArticleId>),

    /// One of the endpoints is not a vertex of the graph
    VertexNotFound,

    /// Both endpoints exist but no path connects them
    NoPath,
}

/// Directed adjacency-list graph with dangling links removed
#[derive(Debug, Clone, Default)]
pub struct LinkGraph {
    adjacency: BTreeMap<ArticleId, Vec<ArticleId>>,
    pruned_links: usize,
}

impl LinkGraph {
    /// Builds the search graph from a result graph, dropping dangling links
    pub fn from_result_graph(graph: &ResultGraph) -> Self {
        let mut pruned_links = 0;
        let adjacency = graph
            .iter()
            .map(|(source, targets)| {
                let kept: Vec<ArticleId> = targets
                    .iter()
                    .filter(|target| graph.contains_key(*target))
                    .cloned()
                    .collect();
                pruned_links += targets.len() - kept.len();
                (source.clone(), kept)
            })
            .collect();

        Self {
            adjacency,
            pruned_links,
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Number of dangling links removed while building the graph
    pub fn pruned_links(&self) -> usize {
        self.pruned_links
    }

    /// Looks up a vertex by name
    ///
    /// The name is tried verbatim first and then in its percent-encoded form, so
    /// both `Python_(programming_language)` and `Python_%28programming_language%29`
    /// find the same article.
    pub fn find_vertex(&self, name: &str) -> Option<&ArticleId> {
        let exact = ArticleId::new(name);
        if let Some((id, _)) = self.adjacency.get_key_value(&exact) {
            return Some(id);
        }
        self.adjacency
            .get_key_value(&ArticleId::from_title(name))
            .map(|(id, _)| id)
    }

    /// Returns the out-neighbours of a vertex
    pub fn neighbours(&self, id: &ArticleId) -> &[ArticleId] {
        self.adjacency.get(id).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Finds a shortest path between two named articles
    ///
    /// # Example
    ///
    /// ```
    /// use wiki_ripple::article::ArticleId;
    /// use wiki_ripple::crawler::ResultGraph;
    /// use wiki_ripple::graph::{LinkGraph, PathQuery};
    ///
    /// let mut result = ResultGraph::new();
    /// result.insert(ArticleId::new("A"), [ArticleId::new("B")].into_iter().collect());
    /// result.insert(ArticleId::new("B"), Default::default());
    ///
    /// let graph = LinkGraph::from_result_graph(&result);
    /// assert_eq!(
    ///     graph.shortest_path("A", "B"),
    ///     PathQuery::Found(vec![ArticleId::new("A"), ArticleId::new("B")])
    /// );
    /// ```
    pub fn shortest_path(&self, from: &str, to: &str) -> PathQuery {
        let (Some(start), Some(end)) = (self.find_vertex(from), self.find_vertex(to)) else {
            return PathQuery::VertexNotFound;
        };

        match self.bfs(start, end) {
            Some(path) => PathQuery::Found(path),
            None => PathQuery::NoPath,
        }
    }

    fn bfs(&self, start: &ArticleId, end: &ArticleId) -> Option<Vec<ArticleId>> {
        let mut previous: HashMap<&ArticleId, &ArticleId> = HashMap::new();
        let mut queue = VecDeque::from([start]);
        previous.insert(start, start);

        while let Some(current) = queue.pop_front() {
            if current == end {
                return Some(Self::walk_back(&previous, start, end));
            }
            for next in self.neighbours(current) {
                if !previous.contains_key(next) {
                    previous.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        None
    }

    fn walk_back(
        previous: &HashMap<&ArticleId, &ArticleId>,
        start: &ArticleId,
        end: &ArticleId,
    ) -> Vec<ArticleId> {
        let mut path = vec![end.clone()];
        let mut current = end;
        while current != start {
            current = previous[current];
            path.push(current.clone());
        }
        path.reverse();
        path
    }
}

/// Formats a path as `A -> B -> C` using decoded titles
pub fn format_path(path: &[ArticleId]) -> String {
    path.iter()
        .map(ArticleId::title)
        .collect::<Vec<_>>()
        .join(" -> ")
}
