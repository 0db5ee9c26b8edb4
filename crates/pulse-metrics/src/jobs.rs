//! Bulk metric refresh, meant for a scheduler.
//!
//! Computation runs in parallel over disjoint keys (no cross-key shared
//! state); writes go through the store sequentially with last-writer-wins
//! semantics. Per-row store failures are logged and skipped so one bad row
//! never aborts a sweep.

use chrono::{DateTime, Utc};
use rayon::prelude::*;
use tracing::{info, warn};

use pulse_core::model::{ContentItem, EngagementRecord};
use pulse_core::traits::MetricStore;

use crate::creator::{compute_creator, CreatorInput};
use crate::trending::compute_trending;

/// One creator's read model for a bulk refresh.
pub struct CreatorBatchItem<'a> {
    pub creator_id: &'a str,
    pub contents: &'a [ContentItem],
    pub followers: u64,
}

/// Recompute and upsert trending metrics for a batch of content items
/// ("all content from the last 7 days" in the usual schedule).
/// Returns the number of metrics written.
pub fn refresh_trending_metrics(
    store: &dyn MetricStore,
    items: &[(ContentItem, Vec<EngagementRecord>)],
    now: DateTime<Utc>,
) -> usize {
    let metrics: Vec<_> = items
        .par_iter()
        .map(|(content, engagements)| compute_trending(content, engagements, now))
        .collect();

    let mut written = 0;
    for metric in &metrics {
        match store.upsert_trending(metric) {
            Ok(()) => written += 1,
            Err(e) => warn!(
                metric_id = %metric.metric_id,
                error = %e,
                "failed to persist trending metric"
            ),
        }
    }
    info!(total = items.len(), written, "trending metrics refreshed");
    written
}

/// Recompute and upsert creator metrics for a batch of creators
/// ("all creators with content" in the usual schedule).
/// Returns the number of metrics written.
pub fn refresh_creator_metrics(
    store: &dyn MetricStore,
    creators: &[CreatorBatchItem<'_>],
    now: DateTime<Utc>,
) -> usize {
    let metrics: Vec<_> = creators
        .par_iter()
        .map(|c| {
            compute_creator(
                &CreatorInput {
                    creator_id: c.creator_id,
                    contents: c.contents,
                    followers: c.followers,
                },
                now,
            )
        })
        .collect();

    let mut written = 0;
    for metric in &metrics {
        match store.upsert_creator(metric) {
            Ok(()) => written += 1,
            Err(e) => warn!(
                creator_id = %metric.creator_id,
                error = %e,
                "failed to persist creator metric"
            ),
        }
    }
    info!(total = creators.len(), written, "creator metrics refreshed");
    written
}
