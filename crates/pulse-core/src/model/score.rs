use std::collections::HashMap;
use std::fmt;
use std::ops::{Add, Mul};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::content::ContentKind;

/// A scoring engine output clamped to [0.0, 1.0].
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Score(f64);

impl Score {
    /// Neutral midpoint, used as the global fallback.
    pub const NEUTRAL: Score = Score(0.5);
    /// Zero signal.
    pub const ZERO: Score = Score(0.0);
    /// Maximum score.
    pub const MAX: Score = Score(1.0);

    /// Create a new Score, clamping to [0.0, 1.0].
    /// Non-finite input collapses to 0.0.
    pub fn new(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Get the raw f64 value.
    pub fn value(self) -> f64 {
        self.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.0)
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Self::new(value)
    }
}

impl From<Score> for f64 {
    fn from(s: Score) -> Self {
        s.0
    }
}

impl Add for Score {
    type Output = Self;
    fn add(self, rhs: Self) -> Self {
        Self::new(self.0 + rhs.0)
    }
}

impl Mul<f64> for Score {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self {
        Self::new(self.0 * rhs)
    }
}

/// Result of running a weighted set of engines over one content item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompositeScore {
    /// Weighted average of the contributing engines, in [0, 1].
    pub final_score: f64,
    /// Per-engine sub-scores, keyed by engine name. Engines that failed or
    /// were missing from the registry are absent, not zeroed.
    pub breakdown: HashMap<String, f64>,
}

impl CompositeScore {
    /// Empty result: no engines contributed.
    pub fn empty() -> Self {
        Self {
            final_score: 0.0,
            breakdown: HashMap::new(),
        }
    }
}

/// What the orchestration layer hands back to the feed renderer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredContent {
    pub final_score: f64,
    pub breakdown: HashMap<String, f64>,
    /// True when the result came out of a cache tier rather than a fresh
    /// computation.
    pub cached: bool,
    pub computed_at: DateTime<Utc>,
    /// Set when the scoring path degraded to the neutral fallback.
    pub error: Option<String>,
}

impl ScoredContent {
    /// The neutral fallback the orchestrator returns when scoring itself
    /// failed. The feed must render regardless.
    pub fn neutral_fallback(now: DateTime<Utc>, error: impl Into<String>) -> Self {
        Self {
            final_score: 0.5,
            breakdown: HashMap::new(),
            cached: false,
            computed_at: now,
            error: Some(error.into()),
        }
    }
}

/// Persisted composite score for one (kind, content, viewer) key.
///
/// At most one row exists per key; recomputation overwrites in place.
/// `user_id` is `None` for anonymous / global scores.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentScoreRecord {
    pub content_kind: ContentKind,
    pub content_id: String,
    pub user_id: Option<String>,
    pub final_score: f64,
    pub breakdown: HashMap<String, f64>,
    pub algorithm_version: String,
    pub computed_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl ContentScoreRecord {
    /// A row is expired exactly when `now` is past `expires_at`.
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
