//! Frontier controller: the level-synchronous crawl state machine
//!
//! The controller is the single owner of every piece of crawl state: the current
//! frontier, the gathered set, the result graph and the parsed-page counter.
//! Workers never touch it directly; their results are handed to [`FrontierController::fold`]
//! one at a time by the scheduler, so no locking is needed.

use crate::article::ArticleId;
use crate::config::{CrawlerConfig, LinklessPolicy};
use crate::crawler::resolver::Resolution;
use crate::state::{CrawlPhase, StopReason};
use crate::WikiError;
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Resolved article -> the articles it links to
pub type ResultGraph = BTreeMap<ArticleId, BTreeSet<ArticleId>>;

/// Stop conditions for a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrawlLimits {
    /// Maximum number of levels
    pub max_depth: u32,
    /// Global cap on resolved pages
    pub page_budget: u32,
    /// Handling of pages without links
    pub linkless: LinklessPolicy,
}

impl From<&CrawlerConfig> for CrawlLimits {
    fn from(config: &CrawlerConfig) -> Self {
        Self {
            max_depth: config.max_depth,
            page_budget: config.page_budget,
            linkless: config.linkless_pages,
        }
    }
}

/// What happened during one settled level
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelSummary {
    /// Zero-based level index
    pub level: u32,
    /// Frontier members handed out for this level
    pub dispatched: usize,
    /// Pages that counted as parsed
    pub resolved: usize,
    /// Pages that failed or were skipped
    pub failed: usize,
    /// Size of the next frontier
    pub next_frontier: usize,
}

/// Owns the crawl state and decides the next frontier after each level
#[derive(Debug)]
pub struct FrontierController {
    phase: CrawlPhase,
    limits: CrawlLimits,

    /// Identifiers waiting for the next level
    frontier: BTreeSet<ArticleId>,

    /// Identifiers handed out in the active level and not yet folded
    pending: HashSet<ArticleId>,

    /// Union of links found in the active level
    discovered: HashSet<ArticleId>,

    gathered: HashSet<ArticleId>,
    result: ResultGraph,
    pages_parsed: u32,
    pages_failed: u32,

    /// Number of levels settled so far
    levels_completed: u32,

    level_resolved: usize,
    level_failed: usize,
    level_dispatched: usize,
    stop_reason: Option<StopReason>,
}

impl FrontierController {
    /// Creates a controller in the `Idle` phase with the seed as the only frontier member
    pub fn new(seed: ArticleId, limits: CrawlLimits) -> Self {
        Self {
            phase: CrawlPhase::Idle,
            limits,
            frontier: BTreeSet::from([seed]),
            pending: HashSet::new(),
            discovered: HashSet::new(),
            gathered: HashSet::new(),
            result: ResultGraph::new(),
            pages_parsed: 0,
            pages_failed: 0,
            levels_completed: 0,
            level_resolved: 0,
            level_failed: 0,
            level_dispatched: 0,
            stop_reason: None,
        }
    }

    fn transition(&mut self, to: CrawlPhase) -> Result<(), WikiError> {
        if !self.phase.can_transition_to(to) {
            return Err(WikiError::InvalidTransition {
                from: self.phase,
                to,
            });
        }
        tracing::trace!("Crawl phase {} -> {}", self.phase, to);
        self.phase = to;
        Ok(())
    }

    /// Starts the next level and hands out its frontier
    ///
    /// The returned identifiers are in sorted order. Each must be reported back
    /// through [`fold`](Self::fold) at most once.
    pub fn begin_level(&mut self) -> Result<Vec<ArticleId>, WikiError> {
        self.transition(CrawlPhase::LevelActive)?;

        let members: Vec<ArticleId> = std::mem::take(&mut self.frontier).into_iter().collect();
        self.pending = members.iter().cloned().collect();
        self.discovered.clear();
        self.level_dispatched = members.len();
        self.level_resolved = 0;
        self.level_failed = 0;

        Ok(members)
    }

    /// Folds one completed resolve into the crawl state
    ///
    /// Folding is commutative within a level: set union and counter increments
    /// give the same state for any completion order.
    ///
    /// Returns `true` if the page counted as parsed.
    pub fn fold(&mut self, id: ArticleId, resolution: Resolution) -> Result<bool, WikiError> {
        if self.phase != CrawlPhase::LevelActive {
            return Err(WikiError::InvalidTransition {
                from: self.phase,
                to: CrawlPhase::LevelActive,
            });
        }

        if !self.pending.remove(&id) {
            tracing::warn!("Ignoring result for {} which was not dispatched in this level", id);
            return Ok(false);
        }

        let links = match resolution {
            Resolution::Resolved(links)
                if !links.is_empty() || self.limits.linkless == LinklessPolicy::Count =>
            {
                links
            }
            Resolution::Resolved(_) => {
                tracing::debug!("Skipping {}: page has no article links", id);
                self.record_failure();
                return Ok(false);
            }
            Resolution::Failed(kind) => {
                tracing::debug!("Resolve of {} failed ({})", id, kind);
                self.record_failure();
                return Ok(false);
            }
        };

        self.discovered.extend(links.iter().cloned());
        self.gathered.insert(id.clone());
        self.result.insert(id, links);
        self.pages_parsed += 1;
        self.level_resolved += 1;

        Ok(true)
    }

    fn record_failure(&mut self) {
        self.pages_failed += 1;
        self.level_failed += 1;
    }

    /// Returns true once the parsed-page counter has reached the budget
    pub fn budget_exhausted(&self) -> bool {
        self.pages_parsed >= self.limits.page_budget
    }

    /// Closes the active level and computes the next frontier
    ///
    /// Members that were never dispatched (budget reached mid-level) are dropped.
    /// Afterwards the controller is either `Finished` or `LevelSettled`, ready for
    /// [`begin_level`](Self::begin_level).
    pub fn settle(&mut self) -> Result<LevelSummary, WikiError> {
        self.transition(CrawlPhase::LevelSettled)?;

        let level = self.levels_completed;
        self.levels_completed += 1;
        self.pending.clear();

        let gathered = &self.gathered;
        self.frontier = self
            .discovered
            .drain()
            .filter(|id| !gathered.contains(id))
            .collect();

        let stop = if self.budget_exhausted() {
            Some(StopReason::BudgetExhausted)
        } else if self.levels_completed >= self.limits.max_depth {
            Some(StopReason::DepthReached)
        } else if self.frontier.is_empty() {
            Some(StopReason::FrontierEmpty)
        } else {
            None
        };

        let summary = LevelSummary {
            level,
            dispatched: self.level_dispatched,
            resolved: self.level_resolved,
            failed: self.level_failed,
            next_frontier: self.frontier.len(),
        };

        if let Some(reason) = stop {
            self.stop_reason = Some(reason);
            self.transition(CrawlPhase::Finished)?;
        }

        Ok(summary)
    }

    #[cfg(test)]
    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_terminal()
    }

    pub fn stop_reason(&self) -> Option<StopReason> {
        self.stop_reason
    }

    pub fn pages_parsed(&self) -> u32 {
        self.pages_parsed
    }

    pub fn pages_failed(&self) -> u32 {
        self.pages_failed
    }

    pub fn levels_completed(&self) -> u32 {
        self.levels_completed
    }

    pub fn gathered_count(&self) -> usize {
        self.gathered.len()
    }

    /// Identifiers queued for the next level
    #[cfg(test)]
    pub fn frontier(&self) -> &BTreeSet<ArticleId> {
        &self.frontier
    }

    pub fn result(&self) -> &ResultGraph {
        &self.result
    }

    /// Consumes the controller and returns the result graph
    pub fn into_result(self) -> ResultGraph {
        self.result
    }
}
