//! Trend extractor: per-day, per-deck results over a trailing window.

use chrono::{DateTime, Duration, Utc};

use super::group_by;
use crate::models::{MatchRecord, TrendPoint};

/// Flat trend series for records created within `window_days` of `now`.
///
/// Buckets are keyed by (UTC calendar day, deck). Every non-empty bucket is
/// emitted; there is no sample gating. Output is ordered by date, with
/// same-day points in the order their deck was first seen.
pub fn trend_data(
    records: &[MatchRecord],
    window_days: u32,
    now: DateTime<Utc>,
) -> Vec<TrendPoint> {
    // A window reaching past the representable range has no lower bound.
    let cutoff = Duration::try_days(i64::from(window_days))
        .and_then(|window| now.checked_sub_signed(window));
    let in_window = records
        .iter()
        .filter(|r| cutoff.map_or(true, |cutoff| r.created_at >= cutoff));

    let mut buckets = group_by(in_window, |r| {
        Some((r.created_at.date_naive(), r.my_deck_name.as_str()))
    });
    buckets.sort_by_key(|((day, _), _)| *day);

    buckets
        .into_iter()
        .map(|((date, deck), bucket)| TrendPoint {
            date,
            deck_name: deck.to_string(),
            stats: bucket.stats(),
        })
        .collect()
}
