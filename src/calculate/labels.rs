//! Battlefield and category aggregators.
//!
//! Both group by an optional label on the record. A record without the label
//! is left out of that list; there is no "unspecified" bucket.

use super::{gate, group_by, sort_by_total_desc, AggregateBucket};
use crate::models::{BattlefieldStat, CategoryStat, MatchRecord};

fn label_buckets<'a, F>(
    records: &'a [MatchRecord],
    label: F,
    min_sample: u32,
) -> Vec<(&'a str, AggregateBucket)>
where
    F: Fn(&'a MatchRecord) -> Option<&'a str>,
{
    let mut buckets = gate(group_by(records, label), min_sample);
    sort_by_total_desc(&mut buckets);
    buckets
}

/// Per-battlefield tallies, most-played first.
pub fn battlefield_stats(records: &[MatchRecord], min_sample: u32) -> Vec<BattlefieldStat> {
    label_buckets(records, |r| r.my_context_name.as_deref(), min_sample)
        .into_iter()
        .map(|(name, bucket)| BattlefieldStat {
            battlefield_name: name.to_string(),
            stats: bucket.stats(),
        })
        .collect()
}

/// Per-category tallies, most-played first.
pub fn category_stats(records: &[MatchRecord], min_sample: u32) -> Vec<CategoryStat> {
    label_buckets(records, |r| r.category_name.as_deref(), min_sample)
        .into_iter()
        .map(|(name, bucket)| CategoryStat {
            category_name: name.to_string(),
            stats: bucket.stats(),
        })
        .collect()
}
