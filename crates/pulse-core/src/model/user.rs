use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Social circle a connection belongs to. Inner is closest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CircleType {
    Inner,
    Outer,
    Universe,
}

/// Lifecycle state of a connection. Only `Accepted` connections carry
/// scoring signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    Accepted,
    Blocked,
}

/// An edge from the profile owner to another user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Connection {
    /// The other user's id.
    pub user_id: String,
    pub circle: CircleType,
    pub status: ConnectionStatus,
    /// Lifetime interaction count across the edge.
    #[serde(default)]
    pub interaction_count: u64,
    /// Last time the two users interacted.
    pub last_interaction: Option<DateTime<Utc>>,
}

/// Whether an interest was stated by the user or inferred from behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterestKind {
    Explicit,
    Inferred,
}

/// A single user interest with a strength in [0, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInterest {
    pub name: String,
    pub category: Option<String>,
    /// Interest strength. Stored clamped to [0, 1].
    pub strength: f64,
    pub kind: InterestKind,
}

impl UserInterest {
    pub fn new(name: impl Into<String>, strength: f64, kind: InterestKind) -> Self {
        Self {
            name: name.into(),
            category: None,
            strength: strength.clamp(0.0, 1.0),
            kind,
        }
    }
}

/// Per-user scoring knobs. All optional; absent means defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringPreferences {
    /// 0 = don't care about freshness, 1 = strongly prefer fresh content.
    pub freshness_preference: f64,
    /// 0 = don't care about variety, 1 = strongly prefer varied feeds.
    pub diversity_preference: f64,
    /// Per-engine weight overrides. Validated to [0, 10] at the boundary.
    pub engine_weights: HashMap<String, f64>,
}

impl Default for ScoringPreferences {
    fn default() -> Self {
        Self {
            freshness_preference: 0.5,
            diversity_preference: 0.5,
            engine_weights: HashMap::new(),
        }
    }
}

/// Read-only view of the viewer, as handed to the scoring core.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default)]
    pub connections: Vec<Connection>,
    #[serde(default)]
    pub interests: Vec<UserInterest>,
    pub preferences: Option<ScoringPreferences>,
}

impl UserProfile {
    /// Look up the accepted connection to `other`, if any.
    /// Pending and blocked edges carry no scoring signal.
    pub fn accepted_connection(&self, other: &str) -> Option<&Connection> {
        self.connections
            .iter()
            .find(|c| c.user_id == other && c.status == ConnectionStatus::Accepted)
    }

    /// Freshness preference with the neutral default applied.
    pub fn freshness_preference(&self) -> f64 {
        self.preferences
            .as_ref()
            .map(|p| p.freshness_preference.clamp(0.0, 1.0))
            .unwrap_or(0.5)
    }

    /// Diversity preference with the neutral default applied.
    pub fn diversity_preference(&self) -> f64 {
        self.preferences
            .as_ref()
            .map(|p| p.diversity_preference.clamp(0.0, 1.0))
            .unwrap_or(0.5)
    }
}
