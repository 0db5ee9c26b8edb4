//! # pulse-engines
//!
//! The eight scoring heuristics behind the feed, the registry that holds
//! them, and the composite scorer that aggregates a weighted subset.
//!
//! Every engine is a pure function of (content, viewer, context, config)
//! returning a score in [0, 1]. Failures never leave an engine: the
//! [`pulse_core::ScoringEngine`] adapter maps them to per-engine fallback
//! constants, and the composite scorer drops failing engines from both
//! sides of its weighted average.

pub mod composite;
pub mod engines;
pub mod registry;

pub use composite::CompositeScorer;
pub use registry::{EngineSuiteConfig, ScoringEngineRegistry};
