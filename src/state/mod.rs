//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `CrawlPhase`: the phase of the level-synchronous crawl state machine
//! - `StopReason`: why a crawl stopped

mod crawl_phase;

pub use crawl_phase::{CrawlPhase, StopReason};
