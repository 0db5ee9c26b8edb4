use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::engagement::EngagementStat;

/// The kinds of content the feed can rank.
/// Closed set — adding a kind is a deliberate schema change, not a stringly
/// typed runtime value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Post,
    Comment,
    Product,
    JobListing,
    DiaryEntry,
}

impl ContentKind {
    /// Stable string form used as a storage key and log field.
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Comment => "comment",
            ContentKind::Product => "product",
            ContentKind::JobListing => "job_listing",
            ContentKind::DiaryEntry => "diary_entry",
        }
    }

    /// Parse the stable string form back into a kind.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "post" => Some(ContentKind::Post),
            "comment" => Some(ContentKind::Comment),
            "product" => Some(ContentKind::Product),
            "job_listing" => Some(ContentKind::JobListing),
            "diary_entry" => Some(ContentKind::DiaryEntry),
            _ => None,
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Read-only view of a content item, as handed to the scoring core.
///
/// The feed backend owns the lifecycle of the underlying record; scoring
/// never mutates it. Attributes the backend may not have for every kind
/// are `Option` rather than probed reflectively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Backend identifier, unique within `kind`.
    pub id: String,
    /// What kind of content this is.
    pub kind: ContentKind,
    /// Creator's user id.
    pub creator_id: String,
    /// Publication time. Absent for drafts or legacy rows.
    pub created_at: Option<DateTime<Utc>>,
    /// Editorial category, if the content module assigns one.
    pub category: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Precomputed quality score in [0, 1], if available.
    pub quality_score: Option<f64>,
    /// Aggregate engagement score, >= 0. Backend-owned aggregate.
    #[serde(default)]
    pub engagement_score: f64,
    /// Per-kind engagement counts and average scores.
    #[serde(default)]
    pub engagement: Vec<EngagementStat>,
}

impl ContentItem {
    /// Age of the content at `now`, in fractional hours.
    /// Returns `None` when `created_at` is absent.
    pub fn age_hours(&self, now: DateTime<Utc>) -> Option<f64> {
        self.created_at
            .map(|created| (now - created).num_seconds().max(0) as f64 / 3600.0)
    }

    /// Age of the content at `now`, in fractional days.
    pub fn age_days(&self, now: DateTime<Utc>) -> Option<f64> {
        self.age_hours(now).map(|h| h / 24.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn kind_round_trips_through_str() {
        for kind in [
            ContentKind::Post,
            ContentKind::Comment,
            ContentKind::Product,
            ContentKind::JobListing,
            ContentKind::DiaryEntry,
        ] {
            assert_eq!(ContentKind::parse(kind.as_str()), Some(kind));
        }
        assert_eq!(ContentKind::parse("unknown"), None);
    }

    #[test]
    fn age_is_none_without_created_at() {
        let item = ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: "u1".into(),
            created_at: None,
            category: None,
            tags: vec![],
            quality_score: None,
            engagement_score: 0.0,
            engagement: vec![],
        };
        assert_eq!(item.age_hours(Utc::now()), None);
    }

    #[test]
    fn age_counts_forward_only() {
        let now = Utc::now();
        let item = ContentItem {
            id: "c1".into(),
            kind: ContentKind::Post,
            creator_id: "u1".into(),
            created_at: Some(now + Duration::hours(2)),
            category: None,
            tags: vec![],
            quality_score: None,
            engagement_score: 0.0,
            engagement: vec![],
        };
        // Clock skew: content "from the future" has age 0, not negative.
        assert_eq!(item.age_hours(now), Some(0.0));
    }
}
