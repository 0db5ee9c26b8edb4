//! v001: content_scores.

use rusqlite::Connection;

use pulse_core::errors::StorageError;

pub fn migrate(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS content_scores (
            content_kind       TEXT NOT NULL,
            content_id         TEXT NOT NULL,
            user_id            TEXT NOT NULL DEFAULT '',
            final_score        REAL NOT NULL,
            breakdown          TEXT NOT NULL,
            algorithm_version  TEXT NOT NULL,
            computed_at        TEXT NOT NULL,
            expires_at         TEXT NOT NULL,
            PRIMARY KEY (content_kind, content_id, user_id)
        );

        CREATE INDEX IF NOT EXISTS idx_content_scores_expiry
            ON content_scores(expires_at);
        ",
    )
    .map_err(|e| StorageError::Migration(e.to_string()))?;
    Ok(())
}
