//! End-to-end orchestration tests over real engines and the in-memory
//! store.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{Duration, Utc};

use pulse_core::constants::{engine_names, ALGORITHM_VERSION};
use pulse_core::context::ScoringContext;
use pulse_core::errors::StorageError;
use pulse_core::model::{
    CircleType, Connection, ConnectionStatus, ContentItem, ContentKind, ContentScoreRecord,
    CreatorMetric, EngagementKind, EngagementRecord, ScoringPreferences, TrendingMetric,
    UserProfile,
};
use pulse_core::traits::{MetricStore, ScoreStore};
use pulse_core::PulseConfig;
use pulse_feed::{FeedScorer, ScoreOptions};
use pulse_storage::InMemoryStore;

fn make_content(id: &str, creator: &str, age_hours: i64) -> ContentItem {
    ContentItem {
        id: id.to_string(),
        kind: ContentKind::Post,
        creator_id: creator.to_string(),
        created_at: Some(Utc::now() - Duration::hours(age_hours)),
        category: Some("tech".into()),
        tags: vec!["rust".into()],
        quality_score: Some(0.8),
        engagement_score: 10.0,
        engagement: vec![],
    }
}

fn make_user(id: &str) -> UserProfile {
    UserProfile {
        id: id.to_string(),
        connections: vec![],
        interests: vec![],
        preferences: None,
    }
}

fn scorer_over(store: Arc<InMemoryStore>) -> FeedScorer {
    FeedScorer::new(store.clone(), store, PulseConfig::default())
}

// ─── Cache behavior ──────────────────────────────────────────────────────────

#[test]
fn second_call_is_cached_and_identical() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store);
    let content = make_content("c1", "u2", 2);
    let user = make_user("u1");

    let first = scorer.get_or_compute(&content, Some(&user), &ScoreOptions::default());
    assert!(!first.cached);
    assert!(first.error.is_none());

    let second = scorer.get_or_compute(&content, Some(&user), &ScoreOptions::default());
    assert!(second.cached);
    assert_eq!(second.final_score, first.final_score);
    assert_eq!(second.breakdown, first.breakdown);
}

#[test]
fn force_recalculate_bypasses_the_cache() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store);
    let content = make_content("c1", "u2", 2);

    let first = scorer.get_or_compute(&content, None, &ScoreOptions::default());
    let forced = scorer.get_or_compute(
        &content,
        None,
        &ScoreOptions {
            force_recalculate: true,
            ..Default::default()
        },
    );
    assert!(!forced.cached);
    assert!(forced.computed_at >= first.computed_at);
}

#[test]
fn expired_row_is_treated_as_absent() {
    let store = Arc::new(InMemoryStore::new());

    // Seed a stale row directly.
    let now = Utc::now();
    store
        .upsert_score(&ContentScoreRecord {
            content_kind: ContentKind::Post,
            content_id: "c1".into(),
            user_id: None,
            final_score: 0.123,
            breakdown: HashMap::new(),
            algorithm_version: ALGORITHM_VERSION.into(),
            computed_at: now - Duration::hours(2),
            expires_at: now - Duration::hours(1),
        })
        .unwrap();

    let scorer = scorer_over(store);
    let result = scorer.get_or_compute(&make_content("c1", "u2", 2), None, &ScoreOptions::default());
    assert!(!result.cached);
    assert_ne!(result.final_score, 0.123);
}

#[test]
fn stale_algorithm_version_forces_recompute() {
    let store = Arc::new(InMemoryStore::new());

    let now = Utc::now();
    store
        .upsert_score(&ContentScoreRecord {
            content_kind: ContentKind::Post,
            content_id: "c1".into(),
            user_id: None,
            final_score: 0.123,
            breakdown: HashMap::new(),
            algorithm_version: "composite-v0".into(),
            computed_at: now,
            expires_at: now + Duration::hours(1),
        })
        .unwrap();

    let scorer = scorer_over(store);
    let result = scorer.get_or_compute(&make_content("c1", "u2", 2), None, &ScoreOptions::default());
    assert!(!result.cached);
}

#[test]
fn anonymous_and_viewer_scores_cache_separately() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store.clone());
    let content = make_content("c1", "u2", 2);
    let user = make_user("u1");

    scorer.get_or_compute(&content, None, &ScoreOptions::default());
    scorer.get_or_compute(&content, Some(&user), &ScoreOptions::default());
    assert_eq!(store.score_count(), 2);
}

#[test]
fn cleanup_reports_deleted_rows() {
    let store = Arc::new(InMemoryStore::new());
    let now = Utc::now();
    store
        .upsert_score(&ContentScoreRecord {
            content_kind: ContentKind::Post,
            content_id: "dead".into(),
            user_id: None,
            final_score: 0.5,
            breakdown: HashMap::new(),
            algorithm_version: ALGORITHM_VERSION.into(),
            computed_at: now - Duration::hours(3),
            expires_at: now - Duration::hours(2),
        })
        .unwrap();

    let scorer = scorer_over(store);
    assert_eq!(scorer.cleanup_expired_scores().unwrap(), 1);
    assert_eq!(scorer.cleanup_expired_scores().unwrap(), 0);
}

// ─── Personalized weights ────────────────────────────────────────────────────

#[test]
fn personalized_weights_default_without_preferences() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store);
    let weights = scorer.personalized_weights(Some(&make_user("u1")));
    assert_eq!(
        weights[engine_names::PERSONAL_CONNECTIONS],
        2.0
    );
    assert_eq!(weights.len(), engine_names::ALL.len());
}

#[test]
fn personalized_weights_merge_and_clamp_overrides() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store);

    let mut user = make_user("u1");
    let mut overrides = HashMap::new();
    overrides.insert(engine_names::TRENDING.to_string(), 25.0);
    overrides.insert(engine_names::DISCOVERY.to_string(), -4.0);
    overrides.insert(engine_names::QUALITY.to_string(), 3.5);
    user.preferences = Some(ScoringPreferences {
        engine_weights: overrides,
        ..Default::default()
    });

    let weights = scorer.personalized_weights(Some(&user));
    assert_eq!(weights[engine_names::TRENDING], 10.0);
    assert_eq!(weights[engine_names::DISCOVERY], 0.0);
    assert_eq!(weights[engine_names::QUALITY], 3.5);
    // Untouched engines keep their defaults.
    assert_eq!(weights[engine_names::FRESHNESS], 1.0);
}

// ─── Metric wiring ───────────────────────────────────────────────────────────

#[test]
fn trending_metric_feeds_the_trending_engine() {
    let store = Arc::new(InMemoryStore::new());
    store
        .upsert_trending(&TrendingMetric {
            metric_kind: ContentKind::Post,
            metric_id: "c1".into(),
            velocity_score: 80.0,
            viral_coefficient: 2.0,
            engagement_volume: 900,
            last_hour: Default::default(),
            last_day: Default::default(),
            last_week: Default::default(),
            trending_score: 0.9,
            calculated_at: Utc::now(),
        })
        .unwrap();
    store
        .upsert_creator(&CreatorMetric {
            creator_id: "u2".into(),
            reputation_score: 1.0,
            authority_score: 1.0,
            consistency_score: 1.0,
            total_engagements: 1000,
            avg_engagement_rate: 50.0,
            total_content_created: 40,
            content_quality_avg: 0.9,
            recent_activity_score: 1.0,
            calculated_at: Utc::now(),
        })
        .unwrap();

    let scorer = scorer_over(store.clone());
    let with_metrics =
        scorer.get_or_compute(&make_content("c1", "u2", 2), None, &ScoreOptions::default());

    let bare_store = Arc::new(InMemoryStore::new());
    let bare_scorer = scorer_over(bare_store);
    let without_metrics =
        bare_scorer.get_or_compute(&make_content("c1", "u2", 2), None, &ScoreOptions::default());

    assert!(
        with_metrics.breakdown[engine_names::TRENDING]
            > without_metrics.breakdown[engine_names::TRENDING]
    );
    assert!(
        with_metrics.breakdown[engine_names::QUALITY]
            > without_metrics.breakdown[engine_names::QUALITY]
    );
    assert!(with_metrics.final_score > without_metrics.final_score);
}

#[test]
fn metric_refresh_feeds_scoring_end_to_end() {
    let store = Arc::new(InMemoryStore::new());
    let content = make_content("c1", "u2", 2);

    // A burst of recent engagement, one share in five.
    let now = Utc::now();
    let records: Vec<EngagementRecord> = (0..60)
        .map(|i| EngagementRecord {
            content_id: "c1".into(),
            user_id: format!("u{i}"),
            kind: if i % 5 == 0 {
                EngagementKind::Share
            } else {
                EngagementKind::Like
            },
            score: None,
            created_at: now - Duration::minutes(i),
        })
        .collect();

    let written = pulse_metrics::refresh_trending_metrics(
        store.as_ref(),
        &[(content.clone(), records)],
        now,
    );
    assert_eq!(written, 1);

    let scorer = scorer_over(store);
    let result = scorer.get_or_compute(&content, None, &ScoreOptions::default());
    assert!(result.breakdown[engine_names::TRENDING] > 0.0);
    assert!(result.error.is_none());
}

// ─── Failure policy ──────────────────────────────────────────────────────────

/// Store double whose writes always fail.
struct BrokenStore;

impl ScoreStore for BrokenStore {
    fn get_score(
        &self,
        _kind: ContentKind,
        _content_id: &str,
        _user_id: Option<&str>,
    ) -> Result<Option<ContentScoreRecord>, StorageError> {
        Err(StorageError::Database("read path down".into()))
    }
    fn upsert_score(&self, _record: &ContentScoreRecord) -> Result<(), StorageError> {
        Err(StorageError::Database("write path down".into()))
    }
    fn cleanup_expired(
        &self,
        _now: chrono::DateTime<Utc>,
    ) -> Result<usize, StorageError> {
        Err(StorageError::Database("sweep down".into()))
    }
}

impl MetricStore for BrokenStore {
    fn get_trending(
        &self,
        _kind: ContentKind,
        _metric_id: &str,
    ) -> Result<Option<TrendingMetric>, StorageError> {
        Err(StorageError::Database("metrics down".into()))
    }
    fn upsert_trending(&self, _metric: &TrendingMetric) -> Result<(), StorageError> {
        Err(StorageError::Database("metrics down".into()))
    }
    fn get_creator(&self, _creator_id: &str) -> Result<Option<CreatorMetric>, StorageError> {
        Err(StorageError::Database("metrics down".into()))
    }
    fn upsert_creator(&self, _metric: &CreatorMetric) -> Result<(), StorageError> {
        Err(StorageError::Database("metrics down".into()))
    }
}

#[test]
fn broken_storage_degrades_to_neutral_fallback() {
    let store = Arc::new(BrokenStore);
    let scorer = FeedScorer::new(store.clone(), store, PulseConfig::default());
    let result =
        scorer.get_or_compute(&make_content("c1", "u2", 2), None, &ScoreOptions::default());

    assert_eq!(result.final_score, 0.5);
    assert!(result.breakdown.is_empty());
    assert!(!result.cached);
    assert!(result.error.is_some());
}

#[test]
fn unknown_engine_dispatch_is_a_soft_zero() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store);
    let score = scorer.score_content(
        "astrology",
        &make_content("c1", "u2", 2),
        None,
        &ScoringContext::default(),
    );
    assert_eq!(score, 0.0);
}

// ─── End-to-end scenario ─────────────────────────────────────────────────────

#[test]
fn inner_circle_fresh_post_scores_high() {
    let store = Arc::new(InMemoryStore::new());
    let scorer = scorer_over(store);

    let content = make_content("c1", "u2", 2);
    let mut user1 = make_user("u1");
    user1.connections.push(Connection {
        user_id: "u2".into(),
        circle: CircleType::Inner,
        status: ConnectionStatus::Accepted,
        interaction_count: 10,
        last_interaction: Some(Utc::now()),
    });

    let result = scorer.get_or_compute(&content, Some(&user1), &ScoreOptions::default());

    assert_eq!(result.breakdown[engine_names::PERSONAL_CONNECTIONS], 1.0);
    let freshness = result.breakdown[engine_names::FRESHNESS];
    let expected = (-0.1_f64 * 1.5 * (2.0 / 24.0)).exp();
    assert!((freshness - expected).abs() < 1e-3);
    assert!((0.0..=1.0).contains(&result.final_score));
    assert!(result.final_score > 0.5);
}
