/// Configuration errors, raised at load/validation time only.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("weight for {engine} out of range: {value} (allowed 0..=10)")]
    WeightOutOfRange { engine: String, value: f64 },
}
