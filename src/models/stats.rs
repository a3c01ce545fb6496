//! Derived statistics models.
//!
//! Field names are the JSON contract consumed by the reporting front end
//! and must stay camelCase.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Win/loss/draw tallies for one grouping key, with derived figures.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BucketStats {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,

    /// wins + losses + draws
    pub total: u32,

    /// Percentage (0-100) of decided games won. Draws are not in the denominator.
    pub win_rate: f64,
}

/// Per-deck performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeckStat {
    pub deck_name: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

/// Performance of one deck against one opposing deck, from the first deck's side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupStat {
    pub my_deck: String,
    pub opp_deck: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

/// Per-battlefield performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BattlefieldStat {
    pub battlefield_name: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

/// Per-category performance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryStat {
    pub category_name: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

/// One day of one deck's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendPoint {
    /// UTC calendar day
    pub date: NaiveDate,
    pub deck_name: String,
    #[serde(flatten)]
    pub stats: BucketStats,
}

/// Play count for a deck in the popularity ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularDeck {
    pub deck_name: String,
    pub count: u32,

    /// Set on the first entry only.
    pub is_most_popular: bool,
}

/// The assembled analytics report for one TCG (or one project within it).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsReport {
    pub total_games: u32,
    pub total_projects: u32,
    pub total_users: u32,
    pub deck_stats: Vec<DeckStat>,
    pub matchup_stats: Vec<MatchupStat>,
    pub battlefield_stats: Vec<BattlefieldStat>,
    pub category_stats: Vec<CategoryStat>,
    pub trend_data: Vec<TrendPoint>,
    pub most_played_decks: Vec<PopularDeck>,
}

impl AnalyticsReport {
    /// Look up a deck's stats by exact name.
    pub fn deck(&self, name: &str) -> Option<&DeckStat> {
        self.deck_stats.iter().find(|d| d.deck_name == name)
    }

    /// Trend points for a single deck, in date order.
    pub fn trend_for_deck(&self, name: &str) -> Vec<&TrendPoint> {
        self.trend_data
            .iter()
            .filter(|p| p.deck_name == name)
            .collect()
    }
}
