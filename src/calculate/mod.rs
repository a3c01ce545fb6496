//! Statistics calculation engine.
//!
//! Turns a flat set of match records for one TCG into an [`AnalyticsReport`]:
//! - Scalar totals (games, projects, users)
//! - Deck, matchup, battlefield and category performance, gated by sample size
//! - Popularity ranking by raw play count
//! - Per-day, per-deck trend over a trailing window
//!
//! Every aggregator reads the same record slice and builds its own
//! short-lived bucket map. Nothing is shared between aggregators or calls.
//!
//! [`AnalyticsReport`]: crate::models::AnalyticsReport

mod decks;
mod labels;
mod matchups;
mod popularity;
mod report;
mod totals;
mod trend;

pub use decks::deck_stats;
pub use labels::{battlefield_stats, category_stats};
pub use matchups::matchup_stats;
pub use popularity::most_played_decks;
pub use report::{compute_global_report, compute_global_report_now, compute_project_report};
pub use totals::{scalar_totals, ScalarTotals};
pub use trend::trend_data;

use std::hash::Hash;

use indexmap::IndexMap;

use crate::models::{BucketStats, MatchRecord, MatchResult};

/// Default minimum bucket size for the gated lists.
pub const DEFAULT_MIN_SAMPLE: u32 = 10;

/// Default trailing window for the trend series, in days.
pub const DEFAULT_TREND_WINDOW_DAYS: u32 = 30;

/// Default length of the popularity ranking.
pub const DEFAULT_MOST_PLAYED_LIMIT: usize = 10;

/// Tunables for one engine run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalyticsSettings {
    /// Buckets with fewer games are dropped from deck, matchup,
    /// battlefield and category lists.
    pub min_sample: u32,

    pub trend_window_days: u32,

    pub most_played_limit: usize,
}

impl Default for AnalyticsSettings {
    fn default() -> Self {
        Self {
            min_sample: DEFAULT_MIN_SAMPLE,
            trend_window_days: DEFAULT_TREND_WINDOW_DAYS,
            most_played_limit: DEFAULT_MOST_PLAYED_LIMIT,
        }
    }
}

/// Calculate win rate as a percentage of decided games.
///
/// Draws are neither wins nor losses and do not dilute the rate.
pub fn calculate_win_rate(wins: u32, losses: u32) -> f64 {
    let decided = wins + losses;
    if decided == 0 {
        0.0
    } else {
        wins as f64 / decided as f64 * 100.0
    }
}

/// Win/loss/draw accumulator for one grouping key.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AggregateBucket {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl AggregateBucket {
    /// Tally one result. Returns false, leaving the bucket untouched, for
    /// unrecognized results.
    pub fn record(&mut self, result: &MatchResult) -> bool {
        match result {
            MatchResult::Win => self.wins += 1,
            MatchResult::Loss => self.losses += 1,
            MatchResult::Draw => self.draws += 1,
            MatchResult::Unrecognized(_) => return false,
        }
        true
    }

    pub fn total(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    pub fn win_rate(&self) -> f64 {
        calculate_win_rate(self.wins, self.losses)
    }

    pub fn stats(&self) -> BucketStats {
        BucketStats {
            wins: self.wins,
            losses: self.losses,
            draws: self.draws,
            total: self.total(),
            win_rate: self.win_rate(),
        }
    }
}

/// Group records by an optional key, tallying each group's results.
///
/// Groups come back in the order their key was first seen; the stable sorts
/// applied afterwards rely on this to break ties. Records for which `key`
/// returns `None`, and records with an unrecognized result, never create a
/// group.
pub(crate) fn group_by<'a, I, K, F>(records: I, key: F) -> Vec<(K, AggregateBucket)>
where
    I: IntoIterator<Item = &'a MatchRecord>,
    K: Eq + Hash,
    F: Fn(&'a MatchRecord) -> Option<K>,
{
    let mut buckets: IndexMap<K, AggregateBucket> = IndexMap::new();
    for record in records {
        if !record.result.is_recognized() {
            continue;
        }
        if let Some(k) = key(record) {
            buckets.entry(k).or_default().record(&record.result);
        }
    }
    buckets.into_iter().collect()
}

/// Drop buckets under the sample threshold.
pub(crate) fn gate<K>(
    buckets: Vec<(K, AggregateBucket)>,
    min_sample: u32,
) -> Vec<(K, AggregateBucket)> {
    buckets
        .into_iter()
        .filter(|(_, b)| b.total() >= min_sample)
        .collect()
}

/// Stable sort, most games first.
pub(crate) fn sort_by_total_desc<K>(buckets: &mut [(K, AggregateBucket)]) {
    buckets.sort_by(|a, b| b.1.total().cmp(&a.1.total()));
}
