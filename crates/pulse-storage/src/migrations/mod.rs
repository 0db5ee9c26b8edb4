//! Schema migrations, one file per version. Each is idempotent
//! (`IF NOT EXISTS` DDL), so re-running the full set on startup is safe.

mod v001_score_tables;
mod v002_metric_tables;

use rusqlite::Connection;
use tracing::debug;

use pulse_core::errors::StorageError;

/// Run every migration in order.
pub fn run_migrations(conn: &Connection) -> Result<(), StorageError> {
    v001_score_tables::migrate(conn)?;
    v002_metric_tables::migrate(conn)?;
    debug!("score store migrations complete");
    Ok(())
}
