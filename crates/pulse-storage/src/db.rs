//! SQLite-backed score cache and metric store.
//!
//! One writer connection behind a mutex; score and metric reads are point
//! lookups on primary keys. Rows are overwritten in place on recompute
//! (last-writer-wins), matching the concurrency model of the scoring core.

use std::path::Path;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use pulse_core::errors::StorageError;
use pulse_core::model::{
    ContentKind, ContentScoreRecord, CreatorMetric, TrendingMetric, WindowStats,
};
use pulse_core::traits::{MetricStore, ScoreStore};

use crate::migrations;
use crate::to_storage_err;

/// SQLite store for score rows and metrics.
pub struct ScoreDb {
    conn: Mutex<Connection>,
}

impl ScoreDb {
    /// Open a store backed by a file on disk, running migrations.
    pub fn open(path: &Path) -> Result<Self, StorageError> {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    /// Open an in-memory store (for testing).
    pub fn open_in_memory() -> Result<Self, StorageError> {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::initialize(conn)
    }

    fn initialize(conn: Connection) -> Result<Self, StorageError> {
        migrations::run_migrations(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn with_conn<T>(
        &self,
        f: impl FnOnce(&Connection) -> Result<T, StorageError>,
    ) -> Result<T, StorageError> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| to_storage_err("connection mutex poisoned"))?;
        f(&conn)
    }
}

fn parse_timestamp(raw: &str, key: &str) -> Result<DateTime<Utc>, StorageError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| StorageError::CorruptRow {
            key: key.to_string(),
            reason: format!("bad timestamp: {e}"),
        })
}

fn parse_kind(raw: &str, key: &str) -> Result<ContentKind, StorageError> {
    ContentKind::parse(raw).ok_or_else(|| StorageError::CorruptRow {
        key: key.to_string(),
        reason: format!("unknown content kind: {raw}"),
    })
}

fn score_row_to_record(row: &Row<'_>, key: &str) -> Result<ContentScoreRecord, StorageError> {
    let kind_raw: String = row.get(0).map_err(|e| to_storage_err(e.to_string()))?;
    let content_id: String = row.get(1).map_err(|e| to_storage_err(e.to_string()))?;
    let user_id: String = row.get(2).map_err(|e| to_storage_err(e.to_string()))?;
    let final_score: f64 = row.get(3).map_err(|e| to_storage_err(e.to_string()))?;
    let breakdown_raw: String = row.get(4).map_err(|e| to_storage_err(e.to_string()))?;
    let algorithm_version: String = row.get(5).map_err(|e| to_storage_err(e.to_string()))?;
    let computed_raw: String = row.get(6).map_err(|e| to_storage_err(e.to_string()))?;
    let expires_raw: String = row.get(7).map_err(|e| to_storage_err(e.to_string()))?;

    Ok(ContentScoreRecord {
        content_kind: parse_kind(&kind_raw, key)?,
        content_id,
        user_id: if user_id.is_empty() {
            None
        } else {
            Some(user_id)
        },
        final_score,
        breakdown: serde_json::from_str(&breakdown_raw).map_err(|e| StorageError::CorruptRow {
            key: key.to_string(),
            reason: format!("bad breakdown json: {e}"),
        })?,
        algorithm_version,
        computed_at: parse_timestamp(&computed_raw, key)?,
        expires_at: parse_timestamp(&expires_raw, key)?,
    })
}

impl ScoreStore for ScoreDb {
    fn get_score(
        &self,
        kind: ContentKind,
        content_id: &str,
        user_id: Option<&str>,
    ) -> Result<Option<ContentScoreRecord>, StorageError> {
        let key = format!("{kind}:{content_id}:{}", user_id.unwrap_or(""));
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT content_kind, content_id, user_id, final_score, breakdown,
                        algorithm_version, computed_at, expires_at
                 FROM content_scores
                 WHERE content_kind = ?1 AND content_id = ?2 AND user_id = ?3",
                params![kind.as_str(), content_id, user_id.unwrap_or("")],
                |row| Ok(score_row_to_record(row, &key)),
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?
            .transpose()
        })
    }

    fn upsert_score(&self, record: &ContentScoreRecord) -> Result<(), StorageError> {
        let breakdown =
            serde_json::to_string(&record.breakdown).map_err(|e| to_storage_err(e.to_string()))?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO content_scores (
                    content_kind, content_id, user_id, final_score, breakdown,
                    algorithm_version, computed_at, expires_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                ON CONFLICT(content_kind, content_id, user_id) DO UPDATE SET
                    final_score = excluded.final_score,
                    breakdown = excluded.breakdown,
                    algorithm_version = excluded.algorithm_version,
                    computed_at = excluded.computed_at,
                    expires_at = excluded.expires_at",
                params![
                    record.content_kind.as_str(),
                    record.content_id,
                    record.user_id.as_deref().unwrap_or(""),
                    record.final_score,
                    breakdown,
                    record.algorithm_version,
                    record.computed_at.to_rfc3339(),
                    record.expires_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn cleanup_expired(&self, now: DateTime<Utc>) -> Result<usize, StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "DELETE FROM content_scores
                 WHERE julianday(expires_at) < julianday(?1)",
                params![now.to_rfc3339()],
            )
            .map_err(|e| to_storage_err(e.to_string()))
        })
    }
}

fn window_from_json(raw: &str, key: &str) -> Result<WindowStats, StorageError> {
    serde_json::from_str(raw).map_err(|e| StorageError::CorruptRow {
        key: key.to_string(),
        reason: format!("bad window json: {e}"),
    })
}

impl MetricStore for ScoreDb {
    fn get_trending(
        &self,
        kind: ContentKind,
        metric_id: &str,
    ) -> Result<Option<TrendingMetric>, StorageError> {
        let key = format!("trending:{kind}:{metric_id}");
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT metric_kind, metric_id, velocity_score, viral_coefficient,
                        engagement_volume, last_hour, last_day, last_week,
                        trending_score, calculated_at
                 FROM trending_metrics
                 WHERE metric_kind = ?1 AND metric_id = ?2",
                params![kind.as_str(), metric_id],
                |row| {
                    let kind_raw: String = row.get(0)?;
                    let metric_id: String = row.get(1)?;
                    let velocity_score: f64 = row.get(2)?;
                    let viral_coefficient: f64 = row.get(3)?;
                    let engagement_volume: i64 = row.get(4)?;
                    let hour_raw: String = row.get(5)?;
                    let day_raw: String = row.get(6)?;
                    let week_raw: String = row.get(7)?;
                    let trending_score: f64 = row.get(8)?;
                    let calculated_raw: String = row.get(9)?;
                    Ok((
                        kind_raw,
                        metric_id,
                        velocity_score,
                        viral_coefficient,
                        engagement_volume,
                        hour_raw,
                        day_raw,
                        week_raw,
                        trending_score,
                        calculated_raw,
                    ))
                },
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?
            .map(
                |(
                    kind_raw,
                    metric_id,
                    velocity_score,
                    viral_coefficient,
                    engagement_volume,
                    hour_raw,
                    day_raw,
                    week_raw,
                    trending_score,
                    calculated_raw,
                )| {
                    Ok(TrendingMetric {
                        metric_kind: parse_kind(&kind_raw, &key)?,
                        metric_id,
                        velocity_score,
                        viral_coefficient,
                        engagement_volume: engagement_volume.max(0) as u64,
                        last_hour: window_from_json(&hour_raw, &key)?,
                        last_day: window_from_json(&day_raw, &key)?,
                        last_week: window_from_json(&week_raw, &key)?,
                        trending_score,
                        calculated_at: parse_timestamp(&calculated_raw, &key)?,
                    })
                },
            )
            .transpose()
        })
    }

    fn upsert_trending(&self, metric: &TrendingMetric) -> Result<(), StorageError> {
        let hour =
            serde_json::to_string(&metric.last_hour).map_err(|e| to_storage_err(e.to_string()))?;
        let day =
            serde_json::to_string(&metric.last_day).map_err(|e| to_storage_err(e.to_string()))?;
        let week =
            serde_json::to_string(&metric.last_week).map_err(|e| to_storage_err(e.to_string()))?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO trending_metrics (
                    metric_kind, metric_id, velocity_score, viral_coefficient,
                    engagement_volume, last_hour, last_day, last_week,
                    trending_score, calculated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                ON CONFLICT(metric_kind, metric_id) DO UPDATE SET
                    velocity_score = excluded.velocity_score,
                    viral_coefficient = excluded.viral_coefficient,
                    engagement_volume = excluded.engagement_volume,
                    last_hour = excluded.last_hour,
                    last_day = excluded.last_day,
                    last_week = excluded.last_week,
                    trending_score = excluded.trending_score,
                    calculated_at = excluded.calculated_at",
                params![
                    metric.metric_kind.as_str(),
                    metric.metric_id,
                    metric.velocity_score,
                    metric.viral_coefficient,
                    metric.engagement_volume as i64,
                    hour,
                    day,
                    week,
                    metric.trending_score,
                    metric.calculated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }

    fn get_creator(&self, creator_id: &str) -> Result<Option<CreatorMetric>, StorageError> {
        let key = format!("creator:{creator_id}");
        self.with_conn(|conn| {
            conn.query_row(
                "SELECT creator_id, reputation_score, authority_score, consistency_score,
                        total_engagements, avg_engagement_rate, total_content_created,
                        content_quality_avg, recent_activity_score, calculated_at
                 FROM creator_metrics
                 WHERE creator_id = ?1",
                params![creator_id],
                |row| {
                    let creator_id: String = row.get(0)?;
                    let reputation_score: f64 = row.get(1)?;
                    let authority_score: f64 = row.get(2)?;
                    let consistency_score: f64 = row.get(3)?;
                    let total_engagements: i64 = row.get(4)?;
                    let avg_engagement_rate: f64 = row.get(5)?;
                    let total_content_created: i64 = row.get(6)?;
                    let content_quality_avg: f64 = row.get(7)?;
                    let recent_activity_score: f64 = row.get(8)?;
                    let calculated_raw: String = row.get(9)?;
                    Ok((
                        creator_id,
                        reputation_score,
                        authority_score,
                        consistency_score,
                        total_engagements,
                        avg_engagement_rate,
                        total_content_created,
                        content_quality_avg,
                        recent_activity_score,
                        calculated_raw,
                    ))
                },
            )
            .optional()
            .map_err(|e| to_storage_err(e.to_string()))?
            .map(
                |(
                    creator_id,
                    reputation_score,
                    authority_score,
                    consistency_score,
                    total_engagements,
                    avg_engagement_rate,
                    total_content_created,
                    content_quality_avg,
                    recent_activity_score,
                    calculated_raw,
                )| {
                    Ok(CreatorMetric {
                        creator_id,
                        reputation_score,
                        authority_score,
                        consistency_score,
                        total_engagements: total_engagements.max(0) as u64,
                        avg_engagement_rate,
                        total_content_created: total_content_created.max(0) as u64,
                        content_quality_avg,
                        recent_activity_score,
                        calculated_at: parse_timestamp(&calculated_raw, &key)?,
                    })
                },
            )
            .transpose()
        })
    }

    fn upsert_creator(&self, metric: &CreatorMetric) -> Result<(), StorageError> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO creator_metrics (
                    creator_id, reputation_score, authority_score, consistency_score,
                    total_engagements, avg_engagement_rate, total_content_created,
                    content_quality_avg, recent_activity_score, calculated_at
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                ON CONFLICT(creator_id) DO UPDATE SET
                    reputation_score = excluded.reputation_score,
                    authority_score = excluded.authority_score,
                    consistency_score = excluded.consistency_score,
                    total_engagements = excluded.total_engagements,
                    avg_engagement_rate = excluded.avg_engagement_rate,
                    total_content_created = excluded.total_content_created,
                    content_quality_avg = excluded.content_quality_avg,
                    recent_activity_score = excluded.recent_activity_score,
                    calculated_at = excluded.calculated_at",
                params![
                    metric.creator_id,
                    metric.reputation_score,
                    metric.authority_score,
                    metric.consistency_score,
                    metric.total_engagements as i64,
                    metric.avg_engagement_rate,
                    metric.total_content_created as i64,
                    metric.content_quality_avg,
                    metric.recent_activity_score,
                    metric.calculated_at.to_rfc3339(),
                ],
            )
            .map_err(|e| to_storage_err(e.to_string()))?;
            Ok(())
        })
    }
}
