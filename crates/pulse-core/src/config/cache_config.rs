use serde::{Deserialize, Serialize};

use super::defaults;

/// Score cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// How long a persisted composite score stays valid (seconds).
    pub score_ttl_secs: u64,
    /// Max entries in the hot in-process tier.
    pub hot_cache_capacity: u64,
    /// Hot-tier TTL (seconds). Must not exceed `score_ttl_secs`; the
    /// persistent row's expiry is re-checked on every hot hit anyway.
    pub hot_cache_ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            score_ttl_secs: defaults::DEFAULT_SCORE_TTL_SECS,
            hot_cache_capacity: defaults::DEFAULT_HOT_CACHE_CAPACITY,
            hot_cache_ttl_secs: defaults::DEFAULT_HOT_CACHE_TTL_SECS,
        }
    }
}

impl CacheConfig {
    /// Hot-tier TTL, capped by the row TTL.
    pub fn effective_hot_ttl_secs(&self) -> u64 {
        self.hot_cache_ttl_secs.min(self.score_ttl_secs)
    }
}
