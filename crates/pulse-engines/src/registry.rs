//! Engine registry: the closed set of scoring strategies, keyed by name.
//!
//! Construction is an explicit call from application bootstrap
//! ([`ScoringEngineRegistry::with_default_engines`]); nothing registers
//! itself as an import-time side effect. The map stays mutable only behind
//! the register/unregister API.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use pulse_core::context::ScoringContext;
use pulse_core::model::{ContentItem, UserProfile};
use pulse_core::traits::ScoringEngine;

use crate::composite::CompositeScorer;
use crate::engines::{
    connections::ConnectionsConfig, discovery::DiscoveryConfig, diversity::DiversityConfig,
    engagement::EngagementConfig, freshness::FreshnessConfig, interest::InterestConfig,
    quality::QualityConfig, trending::TrendingConfig, DiscoveryEngine, DiversityEngine,
    EngagementEngine, FreshnessEngine, InterestBasedEngine, PersonalConnectionsEngine,
    QualityEngine, TrendingEngine,
};

/// Aggregate config for the eight built-in engines.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSuiteConfig {
    pub connections: ConnectionsConfig,
    pub interest: InterestConfig,
    pub trending: TrendingConfig,
    pub engagement: EngagementConfig,
    pub quality: QualityConfig,
    pub freshness: FreshnessConfig,
    pub diversity: DiversityConfig,
    pub discovery: DiscoveryConfig,
}

/// Holds named engine instances and dispatches scoring calls to them.
pub struct ScoringEngineRegistry {
    engines: DashMap<String, Arc<dyn ScoringEngine>>,
}

impl ScoringEngineRegistry {
    /// An empty registry. Callers register engines explicitly.
    pub fn new() -> Self {
        Self {
            engines: DashMap::new(),
        }
    }

    /// A registry pre-populated with the eight built-in engines.
    pub fn with_default_engines(config: EngineSuiteConfig) -> Self {
        let registry = Self::new();
        registry.register(Arc::new(PersonalConnectionsEngine::new(config.connections)));
        registry.register(Arc::new(InterestBasedEngine::new(config.interest)));
        registry.register(Arc::new(TrendingEngine::new(config.trending)));
        registry.register(Arc::new(EngagementEngine::new(config.engagement)));
        registry.register(Arc::new(QualityEngine::new(config.quality)));
        registry.register(Arc::new(FreshnessEngine::new(config.freshness)));
        registry.register(Arc::new(DiversityEngine::new(config.diversity)));
        registry.register(Arc::new(DiscoveryEngine::new(config.discovery)));
        registry
    }

    /// Register an engine under its own name, replacing any previous
    /// holder of that name.
    pub fn register(&self, engine: Arc<dyn ScoringEngine>) {
        self.engines.insert(engine.name().to_string(), engine);
    }

    /// Remove an engine. Returns it if it was registered.
    pub fn unregister(&self, name: &str) -> Option<Arc<dyn ScoringEngine>> {
        self.engines.remove(name).map(|(_, engine)| engine)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ScoringEngine>> {
        self.engines.get(name).map(|e| Arc::clone(e.value()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.engines.contains_key(name)
    }

    /// Registered engine names, unordered.
    pub fn names(&self) -> Vec<String> {
        self.engines.iter().map(|e| e.key().clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.engines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.engines.is_empty()
    }

    /// Dispatch a single-engine scoring call by name.
    ///
    /// An unknown engine is a soft failure: logged, scored 0.0, never
    /// raised. Engine-internal failures resolve to the engine's own
    /// documented fallback via the trait adapter.
    pub fn score_content(
        &self,
        engine_name: &str,
        content: &ContentItem,
        user: Option<&UserProfile>,
        ctx: &ScoringContext,
    ) -> f64 {
        match self.get(engine_name) {
            Some(engine) => engine.score(content, user, ctx).value(),
            None => {
                warn!(engine = engine_name, content_id = %content.id, "unknown scoring engine");
                0.0
            }
        }
    }

    /// Build a composite scorer over the weighted subset of engines named
    /// in `weights`. Names missing from the registry are skipped, not
    /// treated as zero-scoring members.
    pub fn create_composite_scorer(&self, weights: &HashMap<String, f64>) -> CompositeScorer {
        let mut entries = Vec::with_capacity(weights.len());
        for (name, &weight) in weights {
            match self.get(name) {
                Some(engine) => entries.push((engine, weight)),
                None => {
                    debug!(engine = %name, "composite config names unregistered engine, skipping")
                }
            }
        }
        CompositeScorer::new(entries)
    }
}

impl Default for ScoringEngineRegistry {
    fn default() -> Self {
        Self::with_default_engines(EngineSuiteConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pulse_core::constants::engine_names;
    use pulse_core::model::ContentKind;

    fn content() -> ContentItem {
        ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: "creator".into(),
            created_at: Some(Utc::now()),
            category: None,
            tags: vec![],
            quality_score: Some(0.9),
            engagement_score: 0.0,
            engagement: vec![],
        }
    }

    #[test]
    fn default_registry_has_all_eight_engines() {
        let registry = ScoringEngineRegistry::default();
        assert_eq!(registry.len(), 8);
        for name in engine_names::ALL {
            assert!(registry.contains(name), "missing {name}");
        }
    }

    #[test]
    fn unknown_engine_scores_zero() {
        let registry = ScoringEngineRegistry::default();
        let score = registry.score_content(
            "astrology",
            &content(),
            None,
            &ScoringContext::default(),
        );
        assert_eq!(score, 0.0);
    }

    #[test]
    fn unregister_removes_the_engine() {
        let registry = ScoringEngineRegistry::default();
        assert!(registry.unregister(engine_names::QUALITY).is_some());
        assert!(!registry.contains(engine_names::QUALITY));
        assert!(registry.unregister(engine_names::QUALITY).is_none());
    }

    #[test]
    fn dispatch_reaches_the_named_engine() {
        let registry = ScoringEngineRegistry::default();
        // Quality with no creator metrics: 0.9 × 0.8.
        let score = registry.score_content(
            engine_names::QUALITY,
            &content(),
            None,
            &ScoringContext::default(),
        );
        assert!((score - 0.72).abs() < 1e-9);
    }
}
