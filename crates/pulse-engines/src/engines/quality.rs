//! Content quality scoring, blended with creator reputation.
//!
//! `final = quality·(1 − w) + creator_factor·w` where
//! `creator_factor = 0.6·reputation + 0.4·consistency` and `w` defaults to
//! 0.5. Without creator metrics the raw quality is discounted by 0.8.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityConfig {
    /// How much the creator's track record weighs against the item's own
    /// quality score.
    pub creator_reputation_weight: f64,
    pub reputation_factor: f64,
    pub consistency_factor: f64,
    /// Discount applied when no creator metrics exist yet.
    pub no_creator_discount: f64,
}

impl Default for QualityConfig {
    fn default() -> Self {
        Self {
            creator_reputation_weight: 0.5,
            reputation_factor: 0.6,
            consistency_factor: 0.4,
            no_creator_discount: 0.8,
        }
    }
}

#[derive(Debug, Default)]
pub struct QualityEngine {
    config: QualityConfig,
}

impl QualityEngine {
    pub fn new(config: QualityConfig) -> Self {
        Self { config }
    }
}

impl ScoringEngine for QualityEngine {
    fn name(&self) -> &'static str {
        engine_names::QUALITY
    }

    fn try_score(
        &self,
        content: &ContentItem,
        _user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        let quality = content.quality_score.unwrap_or(0.5).clamp(0.0, 1.0);

        match &ctx.creator {
            Some(creator) => {
                let creator_factor = self.config.reputation_factor * creator.reputation_score
                    + self.config.consistency_factor * creator.consistency_score;
                let w = self.config.creator_reputation_weight;
                Ok(Score::new(quality * (1.0 - w) + creator_factor * w))
            }
            None => Ok(Score::new(quality * self.config.no_creator_discount)),
        }
    }

    fn fallback(&self) -> Score {
        Score::NEUTRAL
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "content.quality_score",
            "creator_metric.reputation_score",
            "creator_metric.consistency_score",
        ]
    }
}
