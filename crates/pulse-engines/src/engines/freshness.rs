//! Freshness scoring: exponential decay over content age.
//!
//! `score = e^(−adjusted_decay · age_days)` with
//! `adjusted_decay = decay_rate · (2 − freshness_preference)`.
//! A viewer who cares about freshness (preference → 1) decays content
//! slower toward their feed; one who doesn't (preference → 0) decays it
//! at double rate. Range: (0, 1]. Content without a timestamp is neutral.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FreshnessConfig {
    /// Base decay rate per day.
    pub decay_rate: f64,
}

impl Default for FreshnessConfig {
    fn default() -> Self {
        Self { decay_rate: 0.1 }
    }
}

#[derive(Debug, Default)]
pub struct FreshnessEngine {
    config: FreshnessConfig,
}

impl FreshnessEngine {
    pub fn new(config: FreshnessConfig) -> Self {
        Self { config }
    }
}

impl ScoringEngine for FreshnessEngine {
    fn name(&self) -> &'static str {
        engine_names::FRESHNESS
    }

    fn try_score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        let Some(age_days) = content.age_days(ctx.now) else {
            return Ok(Score::NEUTRAL);
        };

        let preference = user.map(|u| u.freshness_preference()).unwrap_or(0.5);
        let adjusted_decay = self.config.decay_rate * (2.0 - preference);

        Ok(Score::new((-adjusted_decay * age_days).exp()))
    }

    fn fallback(&self) -> Score {
        Score::NEUTRAL
    }

    fn required_data(&self) -> &'static [&'static str] {
        &["content.created_at", "user.preferences.freshness_preference"]
    }
}
