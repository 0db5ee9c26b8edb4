//! Engagement volume scoring.
//!
//! `weighted = Σ(count × avg_score × kind_weight)` over the content's
//! per-kind engagement stats, normalized to a daily rate by content age,
//! then log-compressed: `log10(daily + 1) / log10(saturation + 1)`.
//! A daily weighted rate of 100 saturates at 1.0 by default.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, EngagementKind, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

/// Tunables for [`EngagementEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngagementConfig {
    /// Weight per engagement kind. Heavier kinds signal stronger intent.
    pub kind_weights: HashMap<EngagementKind, f64>,
    /// Daily weighted rate at which the score saturates.
    pub daily_saturation: f64,
}

impl Default for EngagementConfig {
    fn default() -> Self {
        let mut kind_weights = HashMap::new();
        kind_weights.insert(EngagementKind::View, 1.0);
        kind_weights.insert(EngagementKind::Like, 2.0);
        kind_weights.insert(EngagementKind::Comment, 3.0);
        kind_weights.insert(EngagementKind::Share, 4.0);
        kind_weights.insert(EngagementKind::Save, 3.0);
        Self {
            kind_weights,
            daily_saturation: 100.0,
        }
    }
}

impl EngagementConfig {
    pub fn kind_weight(&self, kind: EngagementKind) -> f64 {
        self.kind_weights.get(&kind).copied().unwrap_or(1.0)
    }
}

/// Scores content by how much weighted engagement it earns per day.
#[derive(Debug, Default)]
pub struct EngagementEngine {
    config: EngagementConfig,
}

impl EngagementEngine {
    pub fn new(config: EngagementConfig) -> Self {
        Self { config }
    }
}

impl ScoringEngine for EngagementEngine {
    fn name(&self) -> &'static str {
        engine_names::ENGAGEMENT
    }

    fn try_score(
        &self,
        content: &ContentItem,
        _user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        let total: u64 = content.engagement.iter().map(|s| s.count).sum();
        if total == 0 {
            return Ok(Score::ZERO);
        }

        let weighted: f64 = content
            .engagement
            .iter()
            .map(|s| s.count as f64 * s.avg_score.max(0.0) * self.config.kind_weight(s.kind))
            .sum();

        let age_days = content.age_days(ctx.now).unwrap_or(1.0).max(1.0);
        let daily = weighted / age_days;

        let score = (daily + 1.0).log10() / (self.config.daily_saturation + 1.0).log10();
        Ok(Score::new(score))
    }

    fn fallback(&self) -> Score {
        Score::ZERO
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "content.engagement.counts",
            "content.engagement.avg_scores",
            "content.created_at",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pulse_core::model::{ContentKind, EngagementStat};

    fn content(stats: Vec<EngagementStat>, age_days: i64) -> ContentItem {
        ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: "creator".into(),
            created_at: Some(Utc::now() - Duration::days(age_days)),
            category: None,
            tags: vec![],
            quality_score: None,
            engagement_score: 0.0,
            engagement: stats,
        }
    }

    #[test]
    fn zero_engagement_scores_zero() {
        let engine = EngagementEngine::default();
        let score = engine
            .try_score(&content(vec![], 1), None, &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn saturating_daily_rate_scores_one() {
        let engine = EngagementEngine::default();
        // 50 likes × avg 1.0 × weight 2.0 = 100 weighted over 1 day.
        let stats = vec![EngagementStat::new(EngagementKind::Like, 50, 1.0)];
        let score = engine
            .try_score(&content(stats, 1), None, &ScoringContext::default())
            .unwrap();
        assert!((score.value() - 1.0).abs() < 1e-3);
    }

    #[test]
    fn heavier_kinds_score_higher_at_equal_counts() {
        let engine = EngagementEngine::default();
        let views = vec![EngagementStat::new(EngagementKind::View, 20, 1.0)];
        let shares = vec![EngagementStat::new(EngagementKind::Share, 20, 1.0)];
        let v = engine
            .try_score(&content(views, 1), None, &ScoringContext::default())
            .unwrap();
        let s = engine
            .try_score(&content(shares, 1), None, &ScoringContext::default())
            .unwrap();
        assert!(s.value() > v.value());
    }

    #[test]
    fn older_content_needs_more_engagement() {
        let engine = EngagementEngine::default();
        let stats = vec![EngagementStat::new(EngagementKind::Like, 50, 1.0)];
        let fresh = engine
            .try_score(&content(stats.clone(), 1), None, &ScoringContext::default())
            .unwrap();
        let old = engine
            .try_score(&content(stats, 10), None, &ScoringContext::default())
            .unwrap();
        assert!(fresh.value() > old.value());
    }

    #[test]
    fn missing_created_at_counts_as_one_day() {
        let engine = EngagementEngine::default();
        let stats = vec![EngagementStat::new(EngagementKind::Like, 50, 1.0)];
        let mut item = content(stats, 1);
        item.created_at = None;
        let score = engine
            .try_score(&item, None, &ScoringContext::default())
            .unwrap();
        assert!(score.value() > 0.9);
    }
}
