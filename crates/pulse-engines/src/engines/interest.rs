//! Interest alignment scoring.
//!
//! Matches the viewer's interests against content tags with case-insensitive
//! substring matching in both directions. Matched strength is
//! `Σ(strength × kind_weight) / (num_interests × explicit_weight)`, capped
//! at 1.0. When no tag matches, falls back to a category match
//! (0.6 × strength, or 0.2 with no category signal at all).
//!
//! Data-absence scores: 0.5 anonymous, 0.3 no interests, 0.4 untagged
//! content. Error fallback: 0.3.

use serde::{Deserialize, Serialize};

use pulse_core::constants::engine_names;
use pulse_core::context::ScoringContext;
use pulse_core::errors::EngineError;
use pulse_core::model::{ContentItem, InterestKind, Score, UserProfile};
use pulse_core::traits::ScoringEngine;

/// Tunables for [`InterestBasedEngine`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InterestConfig {
    pub explicit_weight: f64,
    pub inferred_weight: f64,
    /// Multiplier on interest strength for a category-only match.
    pub category_match_factor: f64,
    /// Floor score when neither tags nor category match anything.
    pub category_default: f64,
}

impl Default for InterestConfig {
    fn default() -> Self {
        Self {
            explicit_weight: 1.0,
            inferred_weight: 0.6,
            category_match_factor: 0.6,
            category_default: 0.2,
        }
    }
}

const ANONYMOUS_SCORE: f64 = 0.5;
const NO_INTERESTS_SCORE: f64 = 0.3;
const NO_TAGS_SCORE: f64 = 0.4;

/// Scores content by overlap between viewer interests and content tags.
#[derive(Debug, Default)]
pub struct InterestBasedEngine {
    config: InterestConfig,
}

impl InterestBasedEngine {
    pub fn new(config: InterestConfig) -> Self {
        Self { config }
    }

    fn kind_weight(&self, kind: InterestKind) -> f64 {
        match kind {
            InterestKind::Explicit => self.config.explicit_weight,
            InterestKind::Inferred => self.config.inferred_weight,
        }
    }
}

/// Case-insensitive substring match in either direction.
fn loose_match(a: &str, b: &str) -> bool {
    let a = a.to_lowercase();
    let b = b.to_lowercase();
    a.contains(&b) || b.contains(&a)
}

impl ScoringEngine for InterestBasedEngine {
    fn name(&self) -> &'static str {
        engine_names::INTEREST_BASED
    }

    fn try_score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        _ctx: &ScoringContext,
    ) -> Result<Score, EngineError> {
        let Some(user) = user else {
            return Ok(Score::new(ANONYMOUS_SCORE));
        };
        if user.interests.is_empty() {
            return Ok(Score::new(NO_INTERESTS_SCORE));
        }
        if content.tags.is_empty() {
            return Ok(Score::new(NO_TAGS_SCORE));
        }

        let mut matched_strength = 0.0;
        let mut any_match = false;
        for interest in &user.interests {
            let hits = content.tags.iter().any(|tag| loose_match(&interest.name, tag));
            if hits {
                any_match = true;
                matched_strength += interest.strength * self.kind_weight(interest.kind);
            }
        }

        if any_match {
            let denominator = user.interests.len() as f64 * self.config.explicit_weight;
            return Ok(Score::new((matched_strength / denominator).min(1.0)));
        }

        // No tag overlap: fall back to the coarser category signal.
        if let Some(category) = &content.category {
            let best = user
                .interests
                .iter()
                .filter(|i| {
                    i.category
                        .as_deref()
                        .is_some_and(|c| c.eq_ignore_ascii_case(category))
                        || loose_match(&i.name, category)
                })
                .map(|i| i.strength)
                .fold(f64::NEG_INFINITY, f64::max);
            if best.is_finite() {
                return Ok(Score::new(self.config.category_match_factor * best));
            }
        }

        Ok(Score::new(self.config.category_default))
    }

    fn fallback(&self) -> Score {
        Score::new(0.3)
    }

    fn required_data(&self) -> &'static [&'static str] {
        &[
            "user.interests",
            "interest.strength",
            "interest.kind",
            "content.tags",
            "content.category",
        ]
    }
}
