//! Trending velocity scoring.
//!
//! With a precomputed [`TrendingMetric`]:
//! `0.6·clamp(velocity/100) + 0.4·clamp(volume/1000)` plus a viral bonus
//! `min(0.3, (coefficient − 1)·0.1)` once the coefficient passes 1.0.
//!
//! Without a metric row, degrades to raw velocity from the content's own
//! aggregate: `engagement_score / age_hours`, normalized by 10.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

/// Tunables for [`TrendingEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendingConfig {
    pub velocity_weight: f64,
    pub volume_weight: f64,
    /// Velocity saturates at this many events per hour.
    pub velocity_norm: f64,
    /// Volume saturates at this many weighted events.
    pub volume_norm: f64,
    pub viral_bonus_cap: f64,
    pub viral_bonus_scale: f64,
    /// Normalizer for the metric-less fallback velocity.
    pub basic_velocity_norm: f64,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            velocity_weight: 0.6,
            volume_weight: 0.4,
            velocity_norm: 100.0,
            volume_norm: 1000.0,
            viral_bonus_cap: 0.3,
            viral_bonus_scale: 0.1,
            basic_velocity_norm: 10.0,
        }
    }
}

/// Scores content by engagement velocity and viral spread.
#[derive(Debug, Default)]
pub struct TrendingEngine {
    config: TrendingConfig,
}

impl TrendingEngine {
    pub fn new(config: TrendingConfig) -> Self {
        Self { config }
    }
}

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

impl ScoringEngine for TrendingEngine {
    fn name(&self) -> &'static str {
        engine_names::TRENDING
    }

    fn try_score(
        &self,
        content: &ContentItem,
        _user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        if let Some(metric) = &ctx.trending {
            let velocity = clamp01(metric.velocity_score / self.config.velocity_norm);
            let volume = clamp01(metric.engagement_volume as f64 / self.config.volume_norm);
            let mut score =
                self.config.velocity_weight * velocity + self.config.volume_weight * volume;
            if metric.viral_coefficient > 1.0 {
                score += ((metric.viral_coefficient - 1.0) * self.config.viral_bonus_scale)
                    .min(self.config.viral_bonus_cap);
            }
            return Ok(Score::new(score));
        }

        // No metric row yet (new content, or the job hasn't run): estimate
        // velocity from the content's own aggregate.
        let Some(age_hours) = content.age_hours(ctx.now) else {
            return Ok(Score::ZERO);
        };
        let velocity = content.engagement_score.max(0.0) / age_hours.max(1.0);
        Ok(Score::new(velocity / self.config.basic_velocity_norm))
    }

    fn fallback(&self) -> Score {
        Score::ZERO
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "trending_metric.velocity_score",
            "trending_metric.engagement_volume",
            "trending_metric.viral_coefficient",
            "content.engagement_score",
            "content.created_at",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pulse_core::model::{ContentKind, TrendingMetric, WindowStats};

    fn content(engagement_score: f64, age_hours: i64) -> ContentItem {
        ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: "creator".into(),
            created_at: Some(Utc::now() - Duration::hours(age_hours)),
            category: None,
            tags: vec![],
            quality_score: None,
            engagement_score,
            engagement: vec![],
        }
    }

    fn metric(velocity: f64, volume: u64, viral: f64) -> TrendingMetric {
        TrendingMetric {
            metric_kind: ContentKind::Post,
            metric_id: "c1".into(),
            velocity_score: velocity,
            viral_coefficient: viral,
            engagement_volume: volume,
            last_hour: WindowStats::default(),
            last_day: WindowStats::default(),
            last_week: WindowStats::default(),
            trending_score: 0.0,
            calculated_at: Utc::now(),
        }
    }

    fn ctx_with_metric(m: TrendingMetric) -> ScoringContext {
        let mut ctx = ScoringContext::default();
        ctx.trending = Some(m);
        ctx
    }

    #[test]
    fn metric_path_combines_velocity_and_volume() {
        let engine = TrendingEngine::default();
        // 0.6·(50/100) + 0.4·(500/1000) = 0.5, no viral bonus at coeff 1.0.
        let score = engine
            .try_score(&content(0.0, 1), None, &ctx_with_metric(metric(50.0, 500, 1.0)))
            .unwrap();
        assert!((score.value() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn viral_bonus_applies_above_one() {
        let engine = TrendingEngine::default();
        let base = engine
            .try_score(&content(0.0, 1), None, &ctx_with_metric(metric(50.0, 500, 1.0)))
            .unwrap();
        let boosted = engine
            .try_score(&content(0.0, 1), None, &ctx_with_metric(metric(50.0, 500, 2.5)))
            .unwrap();
        assert!((boosted.value() - base.value() - 0.15).abs() < 1e-9);
    }

    #[test]
    fn viral_bonus_is_capped() {
        let engine = TrendingEngine::default();
        let base = engine
            .try_score(&content(0.0, 1), None, &ctx_with_metric(metric(0.0, 0, 1.0)))
            .unwrap();
        let boosted = engine
            .try_score(&content(0.0, 1), None, &ctx_with_metric(metric(0.0, 0, 50.0)))
            .unwrap();
        assert!((boosted.value() - base.value() - 0.3).abs() < 1e-9);
    }

    #[test]
    fn saturated_metric_clamps_to_one() {
        let engine = TrendingEngine::default();
        let score = engine
            .try_score(
                &content(0.0, 1),
                None,
                &ctx_with_metric(metric(1e6, 1_000_000, 100.0)),
            )
            .unwrap();
        assert_eq!(score.value(), 1.0);
    }

    #[test]
    fn basic_path_estimates_velocity_from_aggregate() {
        let engine = TrendingEngine::default();
        // 40 engagement over 4 hours: velocity 10, normalized to 1.0.
        let score = engine
            .try_score(&content(40.0, 4), None, &ScoringContext::default())
            .unwrap();
        assert!((score.value() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn basic_path_without_created_at_is_zero() {
        let engine = TrendingEngine::default();
        let mut item = content(40.0, 4);
        item.created_at = None;
        let score = engine
            .try_score(&item, None, &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 0.0);
    }
}
