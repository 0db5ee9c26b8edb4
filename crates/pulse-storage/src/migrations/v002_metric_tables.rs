//! v002: trending_metrics, creator_metrics.

use rusqlite::Connection;

use pulse_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS trending_metrics (
            metric_kind        TEXT NOT NULL,
            metric_id          TEXT NOT NULL,
            velocity_score     REAL NOT NULL,
            viral_coefficient  REAL NOT NULL,
            engagement_volume  INTEGER NOT NULL,
            last_hour          TEXT NOT NULL,
            last_day           TEXT NOT NULL,
            last_week          TEXT NOT NULL,
            trending_score     REAL NOT NULL,
            calculated_at      TEXT NOT NULL,
            PRIMARY KEY (metric_kind, metric_id)
        );

        CREATE INDEX IF NOT EXISTS idx_trending_score
            ON trending_metrics(trending_score);

        CREATE TABLE IF NOT EXISTS creator_metrics (
            creator_id             TEXT PRIMARY KEY,
            reputation_score       REAL NOT NULL,
            authority_score        REAL NOT NULL,
            consistency_score      REAL NOT NULL,
            total_engagements      INTEGER NOT NULL,
            avg_engagement_rate    REAL NOT NULL,
            total_content_created  INTEGER NOT NULL,
            content_quality_avg    REAL NOT NULL,
            recent_activity_score  REAL NOT NULL,
            calculated_at          TEXT NOT NULL
        );
        ",
    )
    .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(())
}
