//! # pulse-storage
//!
//! Persistence for composite score rows and precomputed metrics:
//! a SQLite-backed [`ScoreDb`] for deployments and a DashMap-backed
//! [`InMemoryStore`] for tests and embedded callers. Both implement the
//! `ScoreStore` + `MetricStore` traits from pulse-core.

pub mod db;
pub mod memory;
pub mod migrations;

pub use db::ScoreDb;
pub use memory::InMemoryStore;

use pulse_core::errors::StorageError;

/// Map any driver error message into our storage error.
pub(crate) fn to_storage_err(msg: impl Into<String>) -> StorageError {
    StorageError::Database(msg.into())
}
