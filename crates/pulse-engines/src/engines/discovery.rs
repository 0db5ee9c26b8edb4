//! Serendipitous discovery scoring.
//!
//! Starts from a 0.5 base and adds `serendipity_factor × novelty`, where
//! novelty accumulates: +0.4 for a creator the viewer has no connection
//! to, +0.3 / +0.1 by how little the viewer has engaged with that creator
//! before, +0.3 for a category the viewer hasn't engaged with, capped at
//! 1.0. Already-popular content pays `min(0.2, engagement/100)` back, so
//! discovery favors the genuinely unseen. Error fallback: 0.3.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    pub base_score: f64,
    pub serendipity_factor: f64,
    /// Novelty for a creator outside the viewer's graph.
    pub novel_creator: f64,
    /// Novelty when the viewer never engaged with the creator.
    pub unseen_creator: f64,
    /// Novelty when the viewer engaged only a handful of times.
    pub barely_seen_creator: f64,
    /// Engagement count below which a creator is "barely seen".
    pub barely_seen_max: u64,
    /// Novelty for an unengaged category.
    pub novel_category: f64,
    /// Popularity penalty normalizer.
    pub popularity_norm: f64,
    pub popularity_cap: f64,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            base_score: 0.5,
            serendipity_factor: 0.3,
            novel_creator: 0.4,
            unseen_creator: 0.3,
            barely_seen_creator: 0.1,
            barely_seen_max: 5,
            novel_category: 0.3,
            popularity_norm: 100.0,
            popularity_cap: 0.2,
        }
    }
}

/// Rewards content from outside the viewer's usual orbit.
#[derive(Debug, Default)]
pub struct DiscoveryEngine {
    config: DiscoveryConfig,
}

impl DiscoveryEngine {
    pub fn new(config: DiscoveryConfig) -> Self {
        Self { config }
    }
}

impl ScoringEngine for DiscoveryEngine {
    fn name(&self) -> &'static str {
        engine_names::DISCOVERY
    }

    fn try_score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        let Some(user) = user else {
            // No history to assess novelty against.
            return Ok(Score::new(self.config.base_score));
        };

        let mut novelty = 0.0;

        if user.accepted_connection(&content.creator_id).is_none() {
            novelty += self.config.novel_creator;
        }

        let prior_engagements = ctx
            .viewer_history
            .as_ref()
            .map(|h| h.engagements_with(&content.creator_id))
            .unwrap_or(0);
        if prior_engagements == 0 {
            novelty += self.config.unseen_creator;
        } else if prior_engagements < self.config.barely_seen_max {
            novelty += self.config.barely_seen_creator;
        }

        if let Some(category) = &content.category {
            let engaged = ctx
                .viewer_history
                .as_ref()
                .is_some_and(|h| h.has_engaged_category(category));
            if !engaged {
                novelty += self.config.novel_category;
            }
        }

        let novelty = novelty.min(1.0);

        let popularity_penalty = (content.engagement_score.max(0.0)
            / self.config.popularity_norm)
            .min(self.config.popularity_cap);

        Ok(Score::new(
            self.config.base_score + self.config.serendipity_factor * novelty
                - popularity_penalty,
        ))
    }

    fn fallback(&self) -> Score {
        Score::new(0.3)
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "user.connections",
            "context.viewer_history",
            "content.category",
            "content.engagement_score",
        ]
    }
}
