//! Storage seams: the scoring core reads and writes cache/metric rows
//! through these traits, never a concrete database.

use chrono::{DateTime, Utc};

use crate::errors::StorageError;
use crate::model::{ContentKind, ContentScoreRecord, CreatorMetric, TrendingMetric};

/// Persistence for composite score rows.
///
/// At most one row exists per (kind, content, viewer) key; `upsert_score`
/// overwrites in place (last-writer-wins, per the concurrency model).
pub trait ScoreStore: Send + Sync {
    /// Fetch the row for a key, expired or not. Callers re-validate expiry;
    /// the lookup itself does not filter so that maintenance can observe
    /// stale rows.
    fn get_score(
        &self,
        kind: ContentKind,
        content_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<ContentScoreRecord>, StorageError>;

    /// Insert or overwrite the row for the record's key.
    fn upsert_score(&self, record: &ContentScoreRecord) -> Result<(), StorageError>;

    /// Best-effort sweep: delete rows with `expires_at` before `now`.
    /// Returns the number of rows deleted.
    fn cleanup_expired(&self, now: DateTime<Utc>) -> Result<usize, StorageError>;
}

/// Persistence for precomputed trending / creator metrics.
pub trait MetricStore: Send + Sync {
    fn get_trending(
        &self,
        kind: ContentKind,
        metric_id: &str,
    ) -> Result<Option<TrendingMetric>, StorageError>;

    fn upsert_trending(&self, metric: &TrendingMetric) -> Result<(), StorageError>;

    fn get_creator(&self, creator_id: &str) -> Result<Option<CreatorMetric>, StorageError>;

    fn upsert_creator(&self, metric: &CreatorMetric) -> Result<(), StorageError>;
}
