//! Typed configuration for the scoring system.
//!
//! Weights, TTLs, and engine parameters are data, not code: everything here
//! is overridable at deploy time via TOML, with the documented defaults
//! applied for absent fields.

pub mod defaults;

mod cache_config;
mod weights_config;

pub use cache_config::CacheConfig;
pub use weights_config::WeightsConfig;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// Top-level configuration for the scoring system.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PulseConfig {
    pub weights: WeightsConfig,
    pub cache: CacheConfig,
}

impl PulseConfig {
    /// Parse a TOML document, applying defaults for absent fields.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        toml::from_str(raw).map_err(|e| ConfigError::Parse(e.to_string()))
    }
}
