use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::ContentKind;
use super::engagement::EngagementKind;

/// Aggregated engagement inside one time window.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WindowStats {
    /// Event counts per engagement kind.
    #[serde(default)]
    pub counts: HashMap<EngagementKind, u64>,
    /// Mean per-event score across the window. 0.0 for an empty window.
    #[serde(default)]
    pub avg_score: f64,
}

impl WindowStats {
    /// Total events in the window, across kinds.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Count for one engagement kind.
    pub fn count(&self, kind: EngagementKind) -> u64 {
        self.counts.get(&kind).copied().unwrap_or(0)
    }
}

/// Precomputed trending statistics for one content item.
///
/// Written by the async recalculation job, read by the trending engine.
/// Invariant: `trending_score` is the 50/30/20 weighted combination of
/// normalized velocity, volume, and viral coefficient, each clamped to
/// [0, 1] before combination, and the combination clamped again.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendingMetric {
    pub metric_kind: ContentKind,
    pub metric_id: String,
    /// Blended engagement events per hour over the recent windows.
    pub velocity_score: f64,
    /// Share-driven spread factor; > 1.0 reads as "going viral".
    pub viral_coefficient: f64,
    /// Weighted engagement volume over the 7-day window.
    pub engagement_volume: u64,
    pub last_hour: WindowStats,
    pub last_day: WindowStats,
    pub last_week: WindowStats,
    /// Derived composite, clamped to [0, 1].
    pub trending_score: f64,
    pub calculated_at: DateTime<Utc>,
}

/// Precomputed reputation statistics for one creator.
///
/// Recomputed on a schedule from the creator's full content set and
/// follower counts. Invariant: `reputation_score` is the
/// 0.3/0.3/0.2/0.2 combination of quality, engagement factor,
/// consistency, and volume factor, each clamped to [0, 1] first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatorMetric {
    pub creator_id: String,
    pub reputation_score: f64,
    /// Follower-based authority, log-scaled, in [0, 1].
    pub authority_score: f64,
    /// Posting regularity / output uniformity, in [0, 1].
    pub consistency_score: f64,
    pub total_engagements: u64,
    pub avg_engagement_rate: f64,
    pub total_content_created: u64,
    pub content_quality_avg: f64,
    /// Share of recent days with published content, in [0, 1].
    pub recent_activity_score: f64,
    pub calculated_at: DateTime<Utc>,
}
