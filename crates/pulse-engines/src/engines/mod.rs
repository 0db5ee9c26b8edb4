//! The eight scoring engines.
//!
//! Each module holds a typed config struct with documented defaults, the
//! pure scoring computation, and the [`pulse_core::ScoringEngine`] impl.
//! Constants here define the product's ranking behavior; change them in
//! config, not in code.

pub mod connections;
pub mod discovery;
pub mod diversity;
pub mod engagement;
pub mod freshness;
pub mod interest;
pub mod quality;
pub mod trending;

pub use connections::PersonalConnectionsEngine;
pub use discovery::DiscoveryEngine;
pub use diversity::DiversityEngine;
pub use engagement::EngagementEngine;
pub use freshness::FreshnessEngine;
pub use interest::InterestBasedEngine;
pub use quality::QualityEngine;
pub use trending::TrendingEngine;
