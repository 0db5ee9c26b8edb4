//! # pulse-core
//!
//! Foundation crate for the Pulse feed scoring system.
//! Defines all types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod context;
pub mod errors;
pub mod model;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::PulseConfig;
pub use context::ScoringContext;
pub use errors::{PulseError, PulseResult};
pub use model::{
    ContentItem, ContentKind, CreatorMetric, EngagementKind, Score, TrendingMetric, UserProfile,
};
pub use traits::ScoringEngine;
