//! Hot in-process score cache using moka.
//!
//! Sits in front of the persistent score store. TinyLFU admission,
//! per-cache TTL kept under the row TTL; the persisted row's own
//! `expires_at` is still re-checked on every hit.

use std::time::Duration;

use moka::sync::Cache;

use pulse_core::model::{ContentKind, ContentScoreRecord};

/// In-process tier of the score cache.
///
/// Keys are `kind:content:user` strings; values are full score records so
/// expiry and version checks work the same as against the store.
pub struct HotScoreCache {
    cache: Cache<String, ContentScoreRecord>,
}

impl HotScoreCache {
    pub fn new(max_entries: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(Duration::from_secs(ttl_secs.max(1)))
            .build();
        Self { cache }
    }

    pub fn key(kind: ContentKind, content_id: &str, user_id: Option<&str>) -> String {
        format!("{kind}:{content_id}:{}", user_id.unwrap_or(""))
    }

    pub fn get(&self, key: &str) -> Option<ContentScoreRecord> {
        self.cache.get(key)
    }

    pub fn insert(&self, key: String, record: ContentScoreRecord) {
        self.cache.insert(key, record);
    }

    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
    }
}
