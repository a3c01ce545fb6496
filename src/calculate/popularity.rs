//! Popularity ranking: most-played decks by raw count.

use indexmap::IndexMap;

use crate::models::{MatchRecord, PopularDeck};

/// Top `limit` decks by number of records, most played first.
///
/// No sample gating and no regard for results: every record counts once.
/// The first entry is flagged as the most popular.
pub fn most_played_decks(records: &[MatchRecord], limit: usize) -> Vec<PopularDeck> {
    let mut by_deck: IndexMap<&str, u32> = IndexMap::new();
    for record in records {
        *by_deck.entry(record.my_deck_name.as_str()).or_default() += 1;
    }

    let mut counts: Vec<(&str, u32)> = by_deck.into_iter().collect();
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);

    counts
        .into_iter()
        .enumerate()
        .map(|(rank, (deck, count))| PopularDeck {
            deck_name: deck.to_string(),
            count,
            is_most_popular: rank == 0,
        })
        .collect()
}
