use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kinds of engagement the backend records against content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementKind {
    View,
    Like,
    Comment,
    Share,
    Save,
}

impl EngagementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EngagementKind::View => "view",
            EngagementKind::Like => "like",
            EngagementKind::Comment => "comment",
            EngagementKind::Share => "share",
            EngagementKind::Save => "save",
        }
    }

    pub const ALL: [EngagementKind; 5] = [
        EngagementKind::View,
        EngagementKind::Like,
        EngagementKind::Comment,
        EngagementKind::Share,
        EngagementKind::Save,
    ];
}

impl std::fmt::Display for EngagementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Aggregated engagement of one kind against one content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementStat {
    pub kind: EngagementKind,
    pub count: u64,
    /// Mean per-event score (e.g. dwell quality, reaction weight).
    /// 1.0 when the backend doesn't score individual events.
    pub avg_score: f64,
}

impl EngagementStat {
    pub fn new(kind: EngagementKind, count: u64, avg_score: f64) -> Self {
        Self {
            kind,
            count,
            avg_score,
        }
    }
}

/// A raw engagement event, as consumed by metric recalculation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementRecord {
    pub content_id: String,
    pub user_id: String,
    pub kind: EngagementKind,
    /// Optional per-event score; `None` counts as 1.0.
    pub score: Option<f64>,
    pub created_at: DateTime<Utc>,
}
