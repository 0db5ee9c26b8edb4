pub mod scoring;
pub mod storage;

pub use scoring::ScoringEngine;
pub use storage::{MetricStore, ScoreStore};
