//! Named default constants for the config structs.

/// Default composite weights per engine. Social-graph proximity dominates,
/// discovery stays a light touch.
pub const DEFAULT_WEIGHT_PERSONAL_CONNECTIONS: f64 = 2.0;
pub const DEFAULT_WEIGHT_INTEREST_BASED: f64 = 1.8;
pub const DEFAULT_WEIGHT_TRENDING: f64 = 1.5;
pub const DEFAULT_WEIGHT_ENGAGEMENT: f64 = 1.2;
pub const DEFAULT_WEIGHT_QUALITY: f64 = 1.0;
pub const DEFAULT_WEIGHT_FRESHNESS: f64 = 1.0;
pub const DEFAULT_WEIGHT_DIVERSITY: f64 = 0.8;
pub const DEFAULT_WEIGHT_DISCOVERY: f64 = 0.5;

/// Upper bound for any per-user weight override.
pub const MAX_ENGINE_WEIGHT: f64 = 10.0;

/// Composite score rows live for an hour by default.
pub const DEFAULT_SCORE_TTL_SECS: u64 = 3600;

/// Hot in-process cache tier sizing.
pub const DEFAULT_HOT_CACHE_CAPACITY: u64 = 10_000;
/// Hot-tier TTL. Kept well under the row TTL so the persistent row's
/// expiry is always the authority.
pub const DEFAULT_HOT_CACHE_TTL_SECS: u64 = 300;
