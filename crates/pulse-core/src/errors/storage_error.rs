/// Score cache / metric store errors.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("database error: {0}")]
    Database(String),

    #[error("migration failed: {0}")]
    Migration(String),

    #[error("corrupt row for key {key}: {reason}")]
    CorruptRow { key: String, reason: String },
}
