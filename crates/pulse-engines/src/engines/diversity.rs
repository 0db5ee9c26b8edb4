//! Feed diversity scoring.
//!
//! Compares the candidate against items already placed in the feed using an
//! additive similarity rule: same creator +0.3, same kind +0.2, same
//! category +0.3, similar engagement +0.2, capped at 1.0. When the maximum
//! similarity passes the threshold (default 0.7) the score drops by
//! `(max − threshold)/(1 − threshold) × 0.5`, with a further penalty when
//! the average similarity exceeds 0.5. An empty feed means no penalty: 1.0.
//!
//! The additive constants are tuned by trial, not derived; they live in
//! config so experiments can move them without touching code.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::{RecentContent, ScoringContext};
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiversityConfig {
    pub same_creator: f64,
    pub same_kind: f64,
    pub same_category: f64,
    pub similar_engagement: f64,
    /// Two engagement scores count as similar when they differ by at most
    /// this fraction of the larger one.
    pub similar_engagement_ratio: f64,
    /// Max similarity above this triggers the penalty.
    pub penalty_threshold: f64,
    pub penalty_scale: f64,
    /// Average similarity above this triggers the extra penalty.
    pub avg_threshold: f64,
    pub avg_penalty_scale: f64,
    pub avg_penalty_cap: f64,
}

impl Default for DiversityConfig {
    fn default() -> Self {
        Self {
            same_creator: 0.3,
            same_kind: 0.2,
            same_category: 0.3,
            similar_engagement: 0.2,
            similar_engagement_ratio: 0.2,
            penalty_threshold: 0.7,
            penalty_scale: 0.5,
            avg_threshold: 0.5,
            avg_penalty_scale: 0.4,
            avg_penalty_cap: 0.2,
        }
    }
}

/// Penalizes candidates too similar to what the feed already shows.
#[derive(Debug, Default)]
pub struct DiversityEngine {
    config: DiversityConfig,
}

impl DiversityEngine {
    pub fn new(config: DiversityConfig) -> Self {
        Self { config }
    }

    /// Additive similarity between the candidate and one placed item.
    fn similarity(&self, content: &ContentItem, other: &RecentContent) -> f64 {
        let mut sim = 0.0;
        if content.creator_id == other.creator_id {
            sim += self.config.same_creator;
        }
        if content.kind == other.kind {
            sim += self.config.same_kind;
        }
        if let (Some(a), Some(b)) = (&content.category, &other.category) {
            if a.eq_ignore_ascii_case(b) {
                sim += self.config.same_category;
            }
        }
        if self.engagement_similar(content.engagement_score, other.engagement_score) {
            sim += self.config.similar_engagement;
        }
        sim.min(1.0)
    }

    fn engagement_similar(&self, a: f64, b: f64) -> bool {
        let larger = a.max(b);
        (a - b).abs() <= self.config.similar_engagement_ratio * larger
    }
}

impl ScoringEngine for DiversityEngine {
    fn name(&self) -> &'static str {
        engine_names::DIVERSITY
    }

    fn try_score(
        &self,
        content: &ContentItem,
        _user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        if ctx.recent_content.is_empty() {
            return Ok(Score::MAX);
        }

        let sims: Vec<f64> = ctx
            .recent_content
            .iter()
            .map(|r| self.similarity(content, r))
            .collect();
        let max_sim = sims.iter().copied().fold(0.0, f64::max);
        let avg_sim = sims.iter().sum::<f64>() / sims.len() as f64;

        let mut penalty = 0.0;
        if max_sim > self.config.penalty_threshold {
            penalty += (max_sim - self.config.penalty_threshold)
                / (1.0 - self.config.penalty_threshold)
                * self.config.penalty_scale;
        }
        if avg_sim > self.config.avg_threshold {
            penalty += (self.config.avg_penalty_scale * (avg_sim - self.config.avg_threshold))
                .min(self.config.avg_penalty_cap);
        }

        Ok(Score::new(1.0 - penalty))
    }

    fn fallback(&self) -> Score {
        // No penalty on failure: never suppress content we can't compare.
        Score::MAX
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "context.recent_content",
            "content.creator_id",
            "content.kind",
            "content.category",
            "content.engagement_score",
        ]
    }
}
