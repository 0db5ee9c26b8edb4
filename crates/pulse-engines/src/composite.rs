//! Weighted aggregation of engine sub-scores.
//!
//! `final = Σ(sub_i × weight_i) / Σ(weight_i)` over the engines that
//! produced a result. An engine that fails is excluded from both sums for
//! that one item: one broken factor degrades ranking quality, it never
//! invalidates the rest.

use std::sync::Arc;

use tracing::warn;

use pulse_core::context::ScoringContext;
use pulse_core::model::{CompositeScore, ContentItem, UserProfile};
use pulse_core::traits::ScoringEngine;

/// A prepared weighted subset of engines, ready to score items.
pub struct CompositeScorer {
    entries: Vec<(Arc<dyn ScoringEngine>, f64)>,
}

impl CompositeScorer {
    pub fn new(entries: Vec<(Arc<dyn ScoringEngine>, f64)>) -> Self {
        Self { entries }
    }

    /// Engines participating in this composite.
    pub fn engine_names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(e, _)| e.name()).collect()
    }

    /// Run every engine and aggregate the weighted average.
    pub fn calculate_score(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> CompositeScore {
        let mut weighted_sum = 0.0;
        let mut weight_total = 0.0;
        let mut result = CompositeScore::empty();

        for (engine, weight) in &self.entries {
            match engine.try_score(content, user, ctx) {
                Ok(score) => {
                    let value = score.value();
                    result.breakdown.insert(engine.name().to_string(), value);
                    weighted_sum += value * weight;
                    weight_total += weight;
                }
                Err(e) => {
                    warn!(
                        engine = engine.name(),
                        content_id = %content.id,
                        error = %e,
                        "engine failed, excluding from composite"
                    );
                }
            }
        }

        if weight_total > 0.0 {
            result.final_score = weighted_sum / weight_total;
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulse_core::errors::EngineError;
    use pulse_core::model::{ContentKind, Score};

    /// Test double that returns a fixed score.
    struct FixedEngine {
        name: &'static str,
        value: f64,
    }

    impl ScoringEngine for FixedEngine {
        fn name(&self) -> &'static str {
            self.name
        }
        fn try_score(
            &self,
            _content: &ContentItem,
            _user: Option<&UserProfile>,
            _ctx: &ScoringContext,
        ) -> Result<Score, EngineError> {
            Ok(Score::new(self.value))
        }
        fn fallback(&self) -> Score {
            Score::ZERO
        }
        fn required_data(&self) -> &'static [&'static str] {
            &[]
        }
    }

    /// Test double that always fails.
    struct BrokenEngine;

    impl ScoringEngine for BrokenEngine {
        fn name(&self) -> &'static str {
            "broken"
        }
        fn try_score(
            &self,
            _content: &ContentItem,
            _user: Option<&UserProfile>,
            _ctx: &ScoringContext,
        ) -> Result<Score, EngineError> {
            Err(EngineError::NonFinite { engine: "broken" })
        }
        fn fallback(&self) -> Score {
            Score::ZERO
        }
        fn required_data(&self) -> &'static [&'static str] {
            &[]
        }
    }

    fn content() -> ContentItem {
        ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: "creator".into(),
            created_at: Some(Utc::now()),
            category: None,
            tags: vec![],
            quality_score: None,
            engagement_score: 0.0,
            engagement: vec![],
        }
    }

    #[test]
    fn weighted_average_is_exact() {
        let scorer = CompositeScorer::new(vec![
            (
                Arc::new(FixedEngine {
                    name: "a",
                    value: 0.8,
                }),
                2.0,
            ),
            (
                Arc::new(FixedEngine {
                    name: "b",
                    value: 0.2,
                }),
                1.0,
            ),
        ]);
        let result = scorer.calculate_score(&content(), None, &ScoringContext::default());
        // (0.8·2 + 0.2·1) / 3 = 0.6.
        assert!((result.final_score - 0.6).abs() < 1e-9);
        assert_eq!(result.breakdown.len(), 2);
        assert!((result.breakdown["a"] - 0.8).abs() < 1e-9);
    }

    #[test]
    fn failing_engine_is_excluded_from_both_sums() {
        let scorer = CompositeScorer::new(vec![
            (
                Arc::new(FixedEngine {
                    name: "a",
                    value: 0.9,
                }),
                1.0,
            ),
            (Arc::new(BrokenEngine), 100.0),
        ]);
        let result = scorer.calculate_score(&content(), None, &ScoringContext::default());
        // The broken engine's huge weight must not dilute the average.
        assert!((result.final_score - 0.9).abs() < 1e-9);
        assert!(!result.breakdown.contains_key("broken"));
    }

    #[test]
    fn all_engines_failing_yields_empty_result() {
        let scorer = CompositeScorer::new(vec![(Arc::new(BrokenEngine), 1.0)]);
        let result = scorer.calculate_score(&content(), None, &ScoringContext::default());
        assert_eq!(result.final_score, 0.0);
        assert!(result.breakdown.is_empty());
    }

    #[test]
    fn empty_composite_yields_empty_result() {
        let scorer = CompositeScorer::new(vec![]);
        let result = scorer.calculate_score(&content(), None, &ScoringContext::default());
        assert_eq!(result.final_score, 0.0);
        assert!(result.breakdown.is_empty());
    }
}
