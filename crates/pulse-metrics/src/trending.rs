//! Trending metric computation.
//!
//! ```text
//! trending_score = clamp(
//!     0.5 × clamp(velocity / 100)
//!   + 0.3 × clamp(volume / 1000)
//!   + 0.2 × clamp(viral / 5)
//! )
//! ```
//!
//! Velocity blends the 1-hour event count with the 24-hour hourly rate.
//! The viral coefficient is `10 × shares / total`, so a 10%-share mix sits
//! exactly at the 1.0 threshold the trending engine's bonus keys on.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};

use pulse_core::model::{ContentItem, EngagementKind, EngagementRecord, TrendingMetric, WindowStats};

/// Weights of the trending combination. Fixed by contract.
const VELOCITY_WEIGHT: f64 = 0.5;
const VOLUME_WEIGHT: f64 = 0.3;
const VIRAL_WEIGHT: f64 = 0.2;

/// Normalization denominators. Tunable in spirit; these are the defaults
/// the engines also assume.
const VELOCITY_NORM: f64 = 100.0;
const VOLUME_NORM: f64 = 1000.0;
const VIRAL_NORM: f64 = 5.0;

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Aggregate the engagement records that fall inside `[now − span, now]`.
fn build_window(
    engagements: &[EngagementRecord],
    now: DateTime<Utc>,
    span: Duration,
) -> WindowStats {
    let cutoff = now - span;
    let mut counts: HashMap<EngagementKind, u64> = HashMap::new();
    let mut score_sum = 0.0;
    let mut total = 0u64;

    for record in engagements {
        if record.created_at > now || record.created_at < cutoff {
            continue;
        }
        *counts.entry(record.kind).or_insert(0) += 1;
        score_sum += record.score.unwrap_or(1.0);
        total += 1;
    }

    WindowStats {
        counts,
        avg_score: if total > 0 {
            score_sum / total as f64
        } else {
            0.0
        },
    }
}

/// Compute the trending metric for one content item from its raw
/// engagement records. Pure and idempotent; safe to re-run concurrently
/// for different items.
pub fn compute_trending(
    content: &ContentItem,
    engagements: &[EngagementRecord],
    now: DateTime<Utc>,
) -> TrendingMetric {
    let last_hour = build_window(engagements, now, Duration::hours(1));
    let last_day = build_window(engagements, now, Duration::days(1));
    let last_week = build_window(engagements, now, Duration::days(7));

    // Events per hour: the last hour counts fully, the day-scale rate
    // smooths out bursts.
    let velocity_score =
        last_hour.total() as f64 + last_day.total() as f64 / 24.0;

    let weekly_total = last_week.total();
    let shares = last_week.count(EngagementKind::Share);
    let viral_coefficient = if weekly_total > 0 {
        10.0 * shares as f64 / weekly_total as f64
    } else {
        0.0
    };

    let trending_score = clamp01(
        VELOCITY_WEIGHT * clamp01(velocity_score / VELOCITY_NORM)
            + VOLUME_WEIGHT * clamp01(weekly_total as f64 / VOLUME_NORM)
            + VIRAL_WEIGHT * clamp01(viral_coefficient / VIRAL_NORM),
    );

    TrendingMetric {
        metric_kind: content.kind,
        metric_id: content.id.clone(),
        velocity_score,
        viral_coefficient,
        engagement_volume: weekly_total,
        last_hour,
        last_day,
        last_week,
        trending_score,
        calculated_at: now,
    }
}
