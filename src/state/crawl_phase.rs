/// Phase definitions for the level-synchronous crawl
///
/// A crawl moves `Idle -> LevelActive -> LevelSettled` and then either back to
/// `LevelActive` for the next level or on to `Finished`.
use std::fmt;

/// Current phase of a crawl
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CrawlPhase {
    /// Frontier holds only the seed; nothing dispatched yet
    Idle,

    /// Resolves for the current frontier are being dispatched and folded
    LevelActive,

    /// Every resolve of the level has been folded; next frontier not yet computed
    LevelSettled,

    /// Terminal; no further mutation
    Finished,
}

impl CrawlPhase {
    /// Returns true if moving from `self` to `next` is a legal transition
    pub fn can_transition_to(&self, next: CrawlPhase) -> bool {
        matches!(
            (self, next),
            (Self::Idle, Self::LevelActive)
                | (Self::Idle, Self::Finished)
                | (Self::LevelActive, Self::LevelSettled)
                | (Self::LevelSettled, Self::LevelActive)
                | (Self::LevelSettled, Self::Finished)
        )
    }

    /// Returns true if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Finished)
    }

    /// Short lowercase name used in log lines
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::LevelActive => "level_active",
            Self::LevelSettled => "level_settled",
            Self::Finished => "finished",
        }
    }
}

impl fmt::Display for CrawlPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why a crawl reached `Finished`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StopReason {
    /// The configured number of levels was crawled
    DepthReached,

    /// The global page budget was reached
    BudgetExhausted,

    /// No unvisited articles were left to resolve
    FrontierEmpty,
}

impl StopReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DepthReached => "depth_reached",
            Self::BudgetExhausted => "budget_exhausted",
            Self::FrontierEmpty => "frontier_empty",
        }
    }
}

impl fmt::Display for StopReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
