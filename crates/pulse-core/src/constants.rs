//! Stable identifiers shared across the workspace.

/// Version tag stamped on every persisted score row. Bumping it invalidates
/// old cache rows on read, independent of their TTL.
pub const ALGORITHM_VERSION: &str = "composite-v1";

/// Registry / breakdown keys for the built-in engines.
pub mod engine_names {
    pub const PERSONAL_CONNECTIONS: &str = "personal_connections";
    pub const INTEREST_BASED: &str = "interest_based";
    pub const TRENDING: &str = "trending";
    pub const ENGAGEMENT: &str = "engagement";
    pub const QUALITY: &str = "quality";
    pub const FRESHNESS: &str = "freshness";
    pub const DIVERSITY: &str = "diversity";
    pub const DISCOVERY: &str = "discovery";

    /// All built-in engine names, in default-registration order.
    pub const ALL: [&str; 8] = [
        PERSONAL_CONNECTIONS,
        INTEREST_BASED,
        TRENDING,
        ENGAGEMENT,
        QUALITY,
        FRESHNESS,
        DIVERSITY,
        DISCOVERY,
    ];
}
