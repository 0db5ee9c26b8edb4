//! Error taxonomy for the scoring core.
//!
//! Data absence (no connection, no interests, no metric row) is NOT an
//! error anywhere in this workspace; engines map it to documented neutral
//! scores. These types cover genuine failures: bad data shapes, storage
//! trouble, configuration mistakes.

mod config_error;
mod engine_error;
mod storage_error;

pub use config_error::ConfigError;
pub use engine_error::EngineError;
pub use storage_error::StorageError;

/// Workspace-wide result alias.
pub type PulseResult<T> = Result<T, PulseError>;

/// Top-level error, aggregating every subsystem.
#[derive(Debug, thiserror::Error)]
pub enum PulseError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error(transparent)]
    Storage(#[from] StorageError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
