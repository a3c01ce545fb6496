//! Matchup aggregator: ordered (my deck, opponent deck) pairs.

use super::{gate, group_by, sort_by_total_desc};
use crate::models::{MatchRecord, MatchupStat};

/// Per-matchup tallies, most-played first.
///
/// `(A, B)` and `(B, A)` are separate buckets: each is seen from a different
/// player's side. Ranking is by game count, not win rate.
pub fn matchup_stats(records: &[MatchRecord], min_sample: u32) -> Vec<MatchupStat> {
    let mut buckets = gate(
        group_by(records, |r| {
            Some((r.my_deck_name.as_str(), r.opp_deck_name.as_str()))
        }),
        min_sample,
    );
    sort_by_total_desc(&mut buckets);

    buckets
        .into_iter()
        .map(|((my, opp), bucket)| MatchupStat {
            my_deck: my.to_string(),
            opp_deck: opp.to_string(),
            stats: bucket.stats(),
        })
        .collect()
}
