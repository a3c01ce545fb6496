//! Deck aggregator: how each deck performs, regardless of opponent.

use super::{gate, group_by};
use crate::models::{DeckStat, MatchRecord};

/// Per-deck tallies keyed by `my_deck_name`, best win rate first.
///
/// Decks with fewer than `min_sample` games are dropped. Equal win rates
/// keep the order the decks were first seen in.
pub fn deck_stats(records: &[MatchRecord], min_sample: u32) -> Vec<DeckStat> {
    let mut buckets = gate(
        group_by(records, |r| Some(r.my_deck_name.as_str())),
        min_sample,
    );
    buckets.sort_by(|a, b| {
        b.1.win_rate()
            .partial_cmp(&a.1.win_rate())
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    buckets
        .into_iter()
        .map(|(deck, bucket)| DeckStat {
            deck_name: deck.to_string(),
            stats: bucket.stats(),
        })
        .collect()
}
