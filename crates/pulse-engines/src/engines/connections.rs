//! Social-graph proximity scoring.
//!
//! Self-authored content scores 1.0. Otherwise the score starts from the
//! circle weight of the accepted connection to the creator (inner 1.0,
//! outer 0.7, universe 0.4), gains a log-scaled interaction bonus
//! `min(0.2, 0.05·log10(interactions + 1))`, and loses a linear staleness
//! penalty `min(0.3, 0.01·days_over)` once the last interaction is more
//! than 30 days old. No accepted connection (or no viewer) scores 0.0.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{CircleType, ContentItem, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

/// Tunables for [`PersonalConnectionsEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionsConfig {
    pub inner_weight: f64,
    pub outer_weight: f64,
    pub universe_weight: f64,
    /// Cap on the interaction bonus.
    pub interaction_bonus_cap: f64,
    /// Multiplier on log10(interactions + 1).
    pub interaction_bonus_scale: f64,
    /// Days of silence before the staleness penalty starts.
    pub stale_after_days: f64,
    /// Penalty per day past the staleness threshold.
    pub stale_penalty_per_day: f64,
    /// Cap on the staleness penalty.
    pub stale_penalty_cap: f64,
}

impl Default for ConnectionsConfig {
    fn default() -> Self {
        Self {
            inner_weight: 1.0,
            outer_weight: 0.7,
            universe_weight: 0.4,
            interaction_bonus_cap: 0.2,
            interaction_bonus_scale: 0.05,
            stale_after_days: 30.0,
            stale_penalty_per_day: 0.01,
            stale_penalty_cap: 0.3,
        }
    }
}

impl ConnectionsConfig {
    fn circle_weight(&self, circle: CircleType) -> f64 {
        match circle {
            CircleType::Inner => self.inner_weight,
            CircleType::Outer => self.outer_weight,
            CircleType::Universe => self.universe_weight,
        }
    }
}

/// Scores content by how close the viewer is to the creator in the
/// social graph.
#[derive(Debug, Default)]
pub struct PersonalConnectionsEngine {
    config: ConnectionsConfig,
}

impl PersonalConnectionsEngine {
    pub fn new(config: ConnectionsConfig) -> Self {
        Self { config }
    }
}

impl ScoringEngine for PersonalConnectionsEngine {
    fn name(&self) -> &'static str {
        engine_names::PERSONAL_CONNECTIONS
    }

    fn try_score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        let Some(user) = user else {
            // Anonymous viewer has no graph.
            return Ok(Score::ZERO);
        };

        if user.id == content.creator_id {
            return Ok(Score::MAX);
        }

        let Some(connection) = user.accepted_connection(&content.creator_id) else {
            return Ok(Score::ZERO);
        };

        let base = self.config.circle_weight(connection.circle);

        let bonus = (self.config.interaction_bonus_scale
            * ((connection.interaction_count as f64) + 1.0).log10())
        .min(self.config.interaction_bonus_cap);

        let penalty = match connection.last_interaction {
            Some(last) => {
                let days_since = (ctx.now - last).num_seconds().max(0) as f64 / 86400.0;
                let days_over = days_since - self.config.stale_after_days;
                if days_over > 0.0 {
                    (self.config.stale_penalty_per_day * days_over)
                        .min(self.config.stale_penalty_cap)
                } else {
                    0.0
                }
            }
            None => 0.0,
        };

        Ok(Score::new(base + bonus - penalty))
    }

    fn fallback(&self) -> Score {
        Score::ZERO
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "user.connections",
            "connection.circle_type",
            "connection.interaction_count",
            "connection.last_interaction",
            "content.creator_id",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use pulse_core::model::{Connection, ConnectionStatus, ContentKind};

    fn content_by(creator: &str) -> ContentItem {
        ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: creator.into(),
            created_at: Some(Utc::now()),
            category: None,
            tags: vec![],
            quality_score: None,
            engagement_score: 0.0,
            engagement: vec![],
        }
    }

    fn user_with(connections: Vec<Connection>) -> UserProfile {
        UserProfile {
            id: "viewer".into(),
            connections,
            interests: vec![],
            preferences: None,
        }
    }

    fn connection(
        circle: CircleType,
        status: ConnectionStatus,
        interactions: u64,
        last_days_ago: Option<i64>,
    ) -> Connection {
        Connection {
            user_id: "creator".into(),
            circle,
            status,
            interaction_count: interactions,
            last_interaction: last_days_ago.map(|d| Utc::now() - Duration::days(d)),
        }
    }

    #[test]
    fn own_content_scores_exactly_one() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![]);
        let score = engine
            .try_score(&content_by("viewer"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 1.0);
    }

    #[test]
    fn no_connection_scores_zero() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![]);
        let score = engine
            .try_score(&content_by("creator"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn pending_connection_scores_zero() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![connection(
            CircleType::Inner,
            ConnectionStatus::Pending,
            50,
            Some(1),
        )]);
        let score = engine
            .try_score(&content_by("creator"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn anonymous_scores_zero() {
        let engine = PersonalConnectionsEngine::default();
        let score = engine
            .try_score(&content_by("creator"), None, &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 0.0);
    }

    #[test]
    fn inner_circle_with_interactions_clamps_at_one() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![connection(
            CircleType::Inner,
            ConnectionStatus::Accepted,
            10,
            Some(0),
        )]);
        // 1.0 + 0.05·log10(11) clamps to 1.0.
        let score = engine
            .try_score(&content_by("creator"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert_eq!(score.value(), 1.0);
    }

    #[test]
    fn outer_circle_base_weight() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![connection(
            CircleType::Outer,
            ConnectionStatus::Accepted,
            0,
            None,
        )]);
        let score = engine
            .try_score(&content_by("creator"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert!((score.value() - 0.7).abs() < 1e-9);
    }

    #[test]
    fn stale_connection_is_penalized_linearly() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![connection(
            CircleType::Outer,
            ConnectionStatus::Accepted,
            0,
            Some(40),
        )]);
        // 10 days over the threshold: 0.7 − 0.01·10 = 0.6.
        let score = engine
            .try_score(&content_by("creator"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert!((score.value() - 0.6).abs() < 1e-6);
    }

    #[test]
    fn stale_penalty_is_capped() {
        let engine = PersonalConnectionsEngine::default();
        let user = user_with(vec![connection(
            CircleType::Universe,
            ConnectionStatus::Accepted,
            0,
            Some(400),
        )]);
        // Penalty caps at 0.3: 0.4 − 0.3 = 0.1.
        let score = engine
            .try_score(&content_by("creator"), Some(&user), &ScoringContext::default())
            .unwrap();
        assert!((score.value() - 0.1).abs() < 1e-6);
    }
}
