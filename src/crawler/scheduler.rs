//! Level scheduling
//!
//! This module dispatches the resolves of one level and feeds every completion
//! back into the [`FrontierController`]. Two models are available and produce the
//! same result graph for a level:
//! - `Sequential`: each resolve runs to completion before the next starts
//! - `Concurrent`: resolves run as tokio tasks over a bounded pool; completions
//!   come back through the task set and are folded by this single loop
//!
//! In both models the budget is checked after every fold. Once it is reached no
//! further resolve is dispatched, while the ones already in flight finish and are
//! folded.

use crate::article::ArticleId;
use crate::config::{CrawlerConfig, SchedulingMode};
use crate::crawler::frontier::FrontierController;
use crate::crawler::resolver::Resolver;
use crate::WikiError;
use std::sync::Arc;
use tokio::task::JoinSet;

/// How the resolves of one level are run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheduling {
    /// One resolve at a time
    Sequential,
    /// Up to `max_in_flight` resolves at once
    Concurrent { max_in_flight: usize },
}

impl From<&CrawlerConfig> for Scheduling {
    fn from(config: &CrawlerConfig) -> Self {
        match config.scheduling {
            SchedulingMode::Sequential => Self::Sequential,
            SchedulingMode::Concurrent => Self::Concurrent {
                max_in_flight: config.max_concurrent_fetches.max(1) as usize,
            },
        }
    }
}

impl Scheduling {
    /// Runs one level: dispatches `members` and folds every completion
    ///
    /// The controller must be in the `LevelActive` phase.
    pub async fn run_level(
        &self,
        resolver: &Arc<dyn Resolver>,
        members: Vec<ArticleId>,
        controller: &mut FrontierController,
    ) -> Result<(), WikiError> {
        match *self {
            Self::Sequential => run_sequential(&**resolver, members, controller).await,
            Self::Concurrent { max_in_flight } => {
                run_concurrent(resolver, members, controller, max_in_flight.max(1)).await
            }
        }
    }
}

async fn run_sequential(
    resolver: &dyn Resolver,
    members: Vec<ArticleId>,
    controller: &mut FrontierController,
) -> Result<(), WikiError> {
    for id in members {
        if controller.budget_exhausted() {
            tracing::debug!("Page budget reached, not dispatching remaining frontier");
            break;
        }
        let resolution = resolver.resolve(&id).await;
        controller.fold(id, resolution)?;
    }
    Ok(())
}

async fn run_concurrent(
    resolver: &Arc<dyn Resolver>,
    members: Vec<ArticleId>,
    controller: &mut FrontierController,
    max_in_flight: usize,
) -> Result<(), WikiError> {
    let mut queue = members.into_iter();
    let mut in_flight = JoinSet::new();

    loop {
        while in_flight.len() < max_in_flight && !controller.budget_exhausted() {
            let Some(id) = queue.next() else {
                break;
            };
            let resolver = Arc::clone(resolver);
            in_flight.spawn(async move {
                let resolution = resolver.resolve(&id).await;
                (id, resolution)
            });
        }

        let Some(joined) = in_flight.join_next().await else {
            break;
        };

        match joined {
            Ok((id, resolution)) => {
                controller.fold(id, resolution)?;
            }
            Err(e) => {
                // The page is lost for this level; it stays ungathered
                tracing::error!("Resolve task failed: {}", e);
            }
        }
    }

    if controller.budget_exhausted() && queue.len() > 0 {
        tracing::debug!(
            "Page budget reached, {} frontier members not dispatched",
            queue.len()
        );
    }

    Ok(())
}
