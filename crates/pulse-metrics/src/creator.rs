//! Creator metric computation.
//!
//! ```text
//! reputation = clamp(
//!     0.3 × quality_avg
//!   + 0.3 × engagement_factor
//!   + 0.2 × consistency
//!   + 0.2 × volume_factor
//! )
//! ```
//!
//! Every sub-factor is clamped to [0, 1] before weighting. A creator with
//! zero content gets the neutral baseline 0.5 for every sub-factor, which
//! lands reputation at exactly 0.5.

use chrono::{DateTime, Duration, Utc};

use pulse_core::model::{ContentItem, CreatorMetric};

const QUALITY_WEIGHT: f64 = 0.3;
const ENGAGEMENT_WEIGHT: f64 = 0.3;
const CONSISTENCY_WEIGHT: f64 = 0.2;
const VOLUME_WEIGHT: f64 = 0.2;

/// Neutral baseline every sub-factor defaults to without data.
const NEUTRAL: f64 = 0.5;

/// Engagement rate at which the engagement factor saturates.
const ENGAGEMENT_RATE_NORM: f64 = 100.0;
/// Content count at which the volume factor saturates.
const VOLUME_NORM: f64 = 50.0;
/// Follower count scale: authority hits 1.0 at 10^4 followers.
const AUTHORITY_LOG_NORM: f64 = 4.0;
/// Recent-activity window and saturation.
const RECENT_WINDOW_DAYS: i64 = 7;
const RECENT_NORM: f64 = 7.0;

fn clamp01(v: f64) -> f64 {
    v.clamp(0.0, 1.0)
}

/// Read model for one creator's metric recalculation.
#[derive(Debug, Clone)]
pub struct CreatorInput<'a> {
    pub creator_id: &'a str,
    /// The creator's full content set.
    pub contents: &'a [ContentItem],
    /// Follower count from the social graph.
    pub followers: u64,
}

/// Mean and population dispersion of the available quality scores.
fn quality_stats(contents: &[ContentItem]) -> Option<(f64, f64)> {
    let scores: Vec<f64> = contents
        .iter()
        .filter_map(|c| c.quality_score)
        .map(|q| q.clamp(0.0, 1.0))
        .collect();
    if scores.is_empty() {
        return None;
    }
    let mean = scores.iter().sum::<f64>() / scores.len() as f64;
    let variance =
        scores.iter().map(|q| (q - mean).powi(2)).sum::<f64>() / scores.len() as f64;
    Some((mean, variance.sqrt()))
}

/// Compute the creator metric from the creator's content set and follower
/// count. Pure and idempotent; tolerant of zero content.
pub fn compute_creator(input: &CreatorInput<'_>, now: DateTime<Utc>) -> CreatorMetric {
    let total_content = input.contents.len() as u64;
    let total_engagements: u64 = input
        .contents
        .iter()
        .flat_map(|c| c.engagement.iter())
        .map(|s| s.count)
        .sum();

    let (quality_avg, consistency, engagement_factor, volume_factor, avg_engagement_rate) =
        if total_content == 0 {
            (NEUTRAL, NEUTRAL, NEUTRAL, NEUTRAL, 0.0)
        } else {
            // Uniform output reads as consistent; dispersion of 0.5 across
            // [0,1] scores zeroes the factor. No quality data at all is
            // neutral, not perfect.
            let (quality_avg, consistency) = match quality_stats(input.contents) {
                Some((mean, dispersion)) => (mean, clamp01(1.0 - 2.0 * dispersion)),
                None => (NEUTRAL, NEUTRAL),
            };
            let avg_engagement_rate = total_engagements as f64 / total_content as f64;
            let engagement_factor = clamp01(avg_engagement_rate / ENGAGEMENT_RATE_NORM);
            let volume_factor = clamp01(total_content as f64 / VOLUME_NORM);
            (
                quality_avg,
                consistency,
                engagement_factor,
                volume_factor,
                avg_engagement_rate,
            )
        };

    let reputation_score = clamp01(
        QUALITY_WEIGHT * clamp01(quality_avg)
            + ENGAGEMENT_WEIGHT * engagement_factor
            + CONSISTENCY_WEIGHT * consistency
            + VOLUME_WEIGHT * volume_factor,
    );

    let authority_score = clamp01(((input.followers as f64) + 1.0).log10() / AUTHORITY_LOG_NORM);

    let recent_cutoff = now - Duration::days(RECENT_WINDOW_DAYS);
    let recent_count = input
        .contents
        .iter()
        .filter(|c| c.created_at.is_some_and(|t| t >= recent_cutoff && t <= now))
        .count();
    let recent_activity_score = clamp01(recent_count as f64 / RECENT_NORM);

    CreatorMetric {
        creator_id: input.creator_id.to_string(),
        reputation_score,
        authority_score,
        consistency_score: consistency,
        total_engagements,
        avg_engagement_rate,
        total_content_created: total_content,
        content_quality_avg: quality_avg,
        recent_activity_score,
        calculated_at: now,
    }
}
