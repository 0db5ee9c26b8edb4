//! Per-call scoring context: the read-only auxiliary signal the engines
//! consume beyond the content item and viewer profile.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{ContentKind, CreatorMetric, TrendingMetric};

/// Compact summary of an item already placed in the feed being assembled.
/// The diversity engine compares the candidate against these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecentContent {
    pub content_id: String,
    pub kind: ContentKind,
    pub creator_id: String,
    pub category: Option<String>,
    pub engagement_score: f64,
}

/// The viewer's engagement history, as far as the discovery engine needs it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ViewerHistory {
    /// How many of this creator's items the viewer has engaged with.
    #[serde(default)]
    pub engagements_by_creator: HashMap<String, u64>,
    /// Categories the viewer has engaged with before.
    #[serde(default)]
    pub engaged_categories: HashSet<String>,
}

impl ViewerHistory {
    pub fn engagements_with(&self, creator_id: &str) -> u64 {
        self.engagements_by_creator
            .get(creator_id)
            .copied()
            .unwrap_or(0)
    }

    pub fn has_engaged_category(&self, category: &str) -> bool {
        self.engaged_categories.contains(category)
    }
}

/// Everything an engine may read for one scoring call, resolved up front by
/// the orchestrator. Engines treat every field as optional signal; absence
/// is "no signal", never an error.
#[derive(Debug, Clone)]
pub struct ScoringContext {
    /// The single clock for the whole call. Engines never read the wall
    /// clock themselves, which keeps scoring reproducible in tests.
    pub now: DateTime<Utc>,
    /// Items already placed in the feed being assembled.
    pub recent_content: Vec<RecentContent>,
    /// Trending metric for the candidate, if one has been computed.
    pub trending: Option<TrendingMetric>,
    /// Creator metric for the candidate's creator, if one has been computed.
    pub creator: Option<CreatorMetric>,
    /// The viewer's engagement history, if the caller resolved it.
    pub viewer_history: Option<ViewerHistory>,
}

impl ScoringContext {
    /// Minimal context: just a clock.
    pub fn at(now: DateTime<Utc>) -> Self {
        Self {
            now,
            recent_content: Vec::new(),
            trending: None,
            creator: None,
            viewer_history: None,
        }
    }
}

impl Default for ScoringContext {
    fn default() -> Self {
        Self::at(Utc::now())
    }
}
