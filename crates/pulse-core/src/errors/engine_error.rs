/// Scoring engine errors. Always absorbed at the engine boundary and
/// converted to the engine's documented fallback score; never propagated
/// to the composite scorer.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("invalid input for {engine}: {reason}")]
    InvalidInput { engine: &'static str, reason: String },

    #[error("computation produced a non-finite value in {engine}")]
    NonFinite { engine: &'static str },

    #[error("unknown engine: {0}")]
    UnknownEngine(String),
}
