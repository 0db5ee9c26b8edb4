//! # pulse-metrics
//!
//! Precomputed statistics consumed by the trending and quality engines.
//!
//! The `compute_*` functions are pure over their inputs (the clock is an
//! argument, never read): calling twice with the same data yields the same
//! metric. Missing sub-data produces neutral defaults, not errors. The
//! `jobs` module wraps them into bulk refresh entry points meant for a
//! scheduler, decoupled from request latency.

pub mod creator;
pub mod jobs;
pub mod trending;

pub use creator::{compute_creator, CreatorInput};
pub use jobs::{refresh_creator_metrics, refresh_trending_metrics, CreatorBatchItem};
pub use trending::compute_trending;
