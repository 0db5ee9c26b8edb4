use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::constants::engine_names;
use crate::errors::ConfigError;

/// Default composite weight per engine. One named field per built-in
/// engine so a typo in a TOML key is a parse error, not a silent no-op.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightsConfig {
    pub personal_connections: f64,
    pub interest_based: f64,
    pub trending: f64,
    pub engagement: f64,
    pub quality: f64,
    pub freshness: f64,
    pub diversity: f64,
    pub discovery: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            personal_connections: defaults::DEFAULT_WEIGHT_PERSONAL_CONNECTIONS,
            interest_based: defaults::DEFAULT_WEIGHT_INTEREST_BASED,
            trending: defaults::DEFAULT_WEIGHT_TRENDING,
            engagement: defaults::DEFAULT_WEIGHT_ENGAGEMENT,
            quality: defaults::DEFAULT_WEIGHT_QUALITY,
            freshness: defaults::DEFAULT_WEIGHT_FRESHNESS,
            diversity: defaults::DEFAULT_WEIGHT_DIVERSITY,
            discovery: defaults::DEFAULT_WEIGHT_DISCOVERY,
        }
    }
}

impl WeightsConfig {
    /// The weight table keyed by engine name, for composite construction
    /// and per-user override merging.
    pub fn as_map(&self) -> HashMap<String, f64> {
        let mut map = HashMap::with_capacity(8);
        map.insert(
            engine_names::PERSONAL_CONNECTIONS.to_string(),
            self.personal_connections,
        );
        map.insert(engine_names::INTEREST_BASED.to_string(), self.interest_based);
        map.insert(engine_names::TRENDING.to_string(), self.trending);
        map.insert(engine_names::ENGAGEMENT.to_string(), self.engagement);
        map.insert(engine_names::QUALITY.to_string(), self.quality);
        map.insert(engine_names::FRESHNESS.to_string(), self.freshness);
        map.insert(engine_names::DIVERSITY.to_string(), self.diversity);
        map.insert(engine_names::DISCOVERY.to_string(), self.discovery);
        map
    }

    /// Validate a single override value against the allowed range.
    pub fn validate_override(engine: &str, value: f64) -> Result<f64, ConfigError> {
        if !value.is_finite() || !(0.0..=defaults::MAX_ENGINE_WEIGHT).contains(&value) {
            return Err(ConfigError::WeightOutOfRange {
                engine: engine.to_string(),
                value,
            });
        }
        Ok(value)
    }

    /// Clamp an override into the allowed range, for callers that prefer
    /// tolerant merging over hard rejection.
    pub fn clamp_override(value: f64) -> f64 {
        if value.is_finite() {
            value.clamp(0.0, defaults::MAX_ENGINE_WEIGHT)
        } else {
            0.0
        }
    }
}
