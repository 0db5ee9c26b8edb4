//! # pulse-feed
//!
//! The orchestration layer that ties cache, registry, and per-user weight
//! personalization into one call. Feed renderers talk to [`FeedScorer`];
//! nothing below this crate ever fails a feed render.

pub mod engine;
pub mod hot_cache;

pub use engine::{FeedScorer, ScoreOptions};
