//! FeedScorer: the one call feed renderers make.
//!
//! Pipeline per item: hot-cache check → store check (expiry and algorithm
//! version re-validated) → composite compute → persist with a fresh TTL.
//! Every failure on the compute path collapses to the neutral 0.5 result
//! with the error retained for observability; the feed always renders.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};
use tracing::{debug, info, warn};

use pulse_core::config::WeightsConfig;
use pulse_core::constants::ALGORITHM_VERSION;
use pulse_core::context::{RecentContent, ScoringContext, ViewerHistory};
use pulse_core::errors::PulseResult;
use pulse_core::model::{ContentItem, ContentScoreRecord, ScoredContent, UserProfile};
use pulse_core::traits::{MetricStore, ScoreStore};
use pulse_core::PulseConfig;
use pulse_engines::{EngineSuiteConfig, ScoringEngineRegistry};

use crate::hot_cache::HotScoreCache;

/// Per-call options for [`FeedScorer::get_or_compute`].
#[derive(Default)]
pub struct ScoreOptions {
    /// Skip every cache tier and overwrite the stored row.
    pub force_recalculate: bool,
    /// Explicit engine weights. `None` resolves the viewer's personalized
    /// weights over the configured defaults.
    pub weights: Option<HashMap<String, f64>>,
    /// Items already placed in the feed, for the diversity engine.
    pub recent_content: Vec<RecentContent>,
    /// The viewer's engagement history, for the discovery engine.
    pub viewer_history: Option<ViewerHistory>,
}

/// Orchestrates cached multi-engine scoring.
pub struct FeedScorer {
    registry: ScoringEngineRegistry,
    scores: Arc<dyn ScoreStore>,
    metrics: Arc<dyn MetricStore>,
    config: PulseConfig,
    hot: HotScoreCache,
}

impl FeedScorer {
    /// Build a scorer with the default engine suite registered.
    pub fn new(
        scores: Arc<dyn ScoreStore>,
        metrics: Arc<dyn MetricStore>,
        config: PulseConfig,
    ) -> Self {
        Self::with_registry(
            ScoringEngineRegistry::with_default_engines(EngineSuiteConfig::default()),
            scores,
            metrics,
            config,
        )
    }

    /// Build a scorer over a caller-assembled registry.
    pub fn with_registry(
        registry: ScoringEngineRegistry,
        scores: Arc<dyn ScoreStore>,
        metrics: Arc<dyn MetricStore>,
        config: PulseConfig,
    ) -> Self {
        let hot = HotScoreCache::new(
            config.cache.hot_cache_capacity,
            config.cache.effective_hot_ttl_secs(),
        );
        Self {
            registry,
            scores,
            metrics,
            config,
            hot,
        }
    }

    pub fn registry(&self) -> &ScoringEngineRegistry {
        &self.registry
    }

    /// Single-engine scoring by name. Unknown engines are a logged 0.0.
    pub fn score_content(
        &self,
        engine_name: &str,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> f64 {
        self.registry.score_content(engine_name, content, user, ctx)
    }

    /// One-off composite scoring with explicit weights, bypassing caches.
    pub fn composite_score(
        &self,
        weights: &HashMap<String, f64>,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> pulse_core::model::CompositeScore {
        self.registry
            .create_composite_scorer(weights)
            .calculate_score(content, user, ctx)
    }

    /// The documented default weight table with the viewer's overrides
    /// merged on top, each override clamped into [0, 10]. No preference
    /// record means the defaults come back unchanged.
    pub fn personalized_weights(&self, user: Option<&UserProfile>) -> HashMap<String, f64> {
        let mut weights = self.config.weights.as_map();
        let Some(prefs) = user.and_then(|u| u.preferences.as_ref()) else {
            return weights;
        };
        for (engine, &value) in &prefs.engine_weights {
            weights.insert(engine.clone(), WeightsConfig::clamp_override(value));
        }
        weights
    }

    /// Score one item for one viewer, through every cache tier.
    ///
    /// Never fails: any error on the compute path degrades to the neutral
    /// 0.5 result with `error` set.
    pub fn get_or_compute(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        options: &ScoreOptions,
    ) -> ScoredContent {
        let now = Utc::now();
        let user_id = user.map(|u| u.id.as_str());
        let key = HotScoreCache::key(content.kind, &content.id, user_id);

        if options.force_recalculate {
            self.hot.invalidate(&key);
        } else {
            if let Some(record) = self.hot.get(&key) {
                if self.record_is_live(&record, now) {
                    debug!(%key, "hot cache hit");
                    return Self::record_to_result(record, true);
                }
                self.hot.invalidate(&key);
            }

            match self.scores.get_score(content.kind, &content.id, user_id) {
                Ok(Some(record)) if self.record_is_live(&record, now) => {
                    debug!(%key, "score store hit");
                    self.hot.insert(key, record.clone());
                    return Self::record_to_result(record, true);
                }
                Ok(_) => debug!(%key, "score cache miss"),
                Err(e) => warn!(%key, error = %e, "score lookup failed, recomputing"),
            }
        }

        match self.compute_and_persist(content, user, options, &key) {
            Ok(result) => result,
            Err(e) => {
                warn!(%key, error = %e, "scoring failed, returning neutral fallback");
                ScoredContent::neutral_fallback(now, e.to_string())
            }
        }
    }

    /// A cached row is trusted only while unexpired and produced by the
    /// current algorithm version.
    fn record_is_live(&self, record: &ContentScoreRecord, now: chrono::DateTime<Utc>) -> bool {
        !record.is_expired(now) && record.algorithm_version == ALGORITHM_VERSION
    }

    fn record_to_result(record: ContentScoreRecord, cached: bool) -> ScoredContent {
        ScoredContent {
            final_score: record.final_score,
            breakdown: record.breakdown,
            cached,
            computed_at: record.computed_at,
            error: None,
        }
    }

    fn compute_and_persist(
        &self,
        content: &ContentItem,
        user: Option<&UserProfile>,
        options: &ScoreOptions,
        key: &str,
    ) -> PulseResult<ScoredContent> {
        let now = Utc::now();
        let weights = match &options.weights {
            Some(explicit) => explicit.clone(),
            None => self.personalized_weights(user),
        };

        let ctx = self.build_context(content, options);
        let scorer = self.registry.create_composite_scorer(&weights);
        let composite = scorer.calculate_score(content, user, &ctx);

        let record = ContentScoreRecord {
            content_kind: content.kind,
            content_id: content.id.clone(),
            user_id: user.map(|u| u.id.clone()),
            final_score: composite.final_score,
            breakdown: composite.breakdown,
            algorithm_version: ALGORITHM_VERSION.to_string(),
            computed_at: now,
            expires_at: now + Duration::seconds(self.config.cache.score_ttl_secs as i64),
        };
        self.scores.upsert_score(&record)?;
        self.hot.insert(key.to_string(), record.clone());

        info!(
            %key,
            final_score = record.final_score,
            engines = record.breakdown.len(),
            "composite score computed"
        );

        Ok(ScoredContent {
            final_score: record.final_score,
            breakdown: record.breakdown,
            cached: false,
            computed_at: record.computed_at,
            error: None,
        })
    }

    /// Resolve the per-call context: metric lookups are best-effort; a
    /// failed lookup is missing signal, not a failed render.
    fn build_context(&self, content: &ContentItem, options: &ScoreOptions) -> ScoringContext {
        let trending = match self.metrics.get_trending(content.kind, &content.id) {
            Ok(metric) => metric,
            Err(e) => {
                warn!(content_id = %content.id, error = %e, "trending lookup failed");
                None
            }
        };
        let creator = match self.metrics.get_creator(&content.creator_id) {
            Ok(metric) => metric,
            Err(e) => {
                warn!(creator_id = %content.creator_id, error = %e, "creator lookup failed");
                None
            }
        };

        ScoringContext {
            now: Utc::now(),
            recent_content: options.recent_content.clone(),
            trending,
            creator,
            viewer_history: options.viewer_history.clone(),
        }
    }

    /// Best-effort sweep of expired score rows. Returns the deleted count.
    pub fn cleanup_expired_scores(&self) -> PulseResult<usize> {
        let deleted = self.scores.cleanup_expired(Utc::now())?;
        info!(deleted, "expired score rows swept");
        Ok(deleted)
    }
}
