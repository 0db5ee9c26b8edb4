//! DashMap-backed store for tests and embedded callers.
//!
//! Semantics mirror [`crate::ScoreDb`]: one row per key, last-writer-wins
//! overwrite, expiry handled by the caller plus the cleanup sweep.

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use pulse_core::errors::StorageError;
use pulse_core::model::{ContentKind, ContentScoreRecord, CreatorMetric, TrendingMetric};
use pulse_core::traits::{MetricStore, ScoreStore};

type ScoreKey = (ContentKind, String, String);

/// In-memory twin of the SQLite store.
#[derive(Default)]
pub struct InMemoryStore {
    scores: DashMap<ScoreKey, ContentScoreRecord>,
    trending: DashMap<(ContentKind, String), TrendingMetric>,
    creators: DashMap<String, CreatorMetric>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of score rows currently held, expired or not.
    pub fn score_count(&self) -> usize {
        self.scores.len()
    }
}

fn score_key(kind: ContentKind, content_id: &str, user_id: Option<&str>) -> ScoreKey {
    (
        kind,
        content_id.to_string(),
        user_id.unwrap_or("").to_string(),
    )
}

impl ScoreStore for InMemoryStore {
    fn get_score(
        &self,
        kind: ContentKind,
        content_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<ContentScoreRecord>, StorageError> {
        Ok(self
            .scores
            .get(&score_key(kind, content_id, user_id))
            .map(|r| r.value().clone()))
    }

    fn upsert_score(&self, record: &ContentScoreRecord) -> Result<(), StorageError> {
        let key = score_key(
            record.content_kind,
            &record.content_id,
            record.user_id.as_deref(),
        );
        self.scores.insert(key, record.clone());
        Ok(())
    }

    fn cleanup_expired(&self, now: DateTime<Utc>) -> Result<usize, StorageError> {
        let before = self.scores.len();
        self.scores.retain(|_, record| !record.is_expired(now));
        Ok(before - self.scores.len())
    }
}

impl MetricStore for InMemoryStore {
    fn get_trending(
        &self,
        kind: ContentKind,
        metric_id: &str,
    ) -> Result<Option<TrendingMetric>, StorageError> {
        Ok(self
            .trending
            .get(&(kind, metric_id.to_string()))
            .map(|m| m.value().clone()))
    }

    fn upsert_trending(&self, metric: &TrendingMetric) -> Result<(), StorageError> {
        self.trending.insert(
            (metric.metric_kind, metric.metric_id.clone()),
            metric.clone(),
        );
        Ok(())
    }

    fn get_creator(&self, creator_id: &str) -> Result<Option<CreatorMetric>, StorageError> {
        Ok(self
            .creators
            .get(creator_id)
            .map(|m| m.value().clone()))
    }

    fn upsert_creator(&self, metric: &CreatorMetric) -> Result<(), StorageError> {
        self.creators
            .insert(metric.creator_id.clone(), metric.clone());
        Ok(())
    }
}
