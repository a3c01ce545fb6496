//! Match record model: one recorded game from one player's side.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EntityId, MatchId, ProjectId};

/// Outcome of a match from the recording player's side.
///
/// Stored as a lowercase string. Anything that is not `win`, `loss` or
/// `draw` is kept verbatim as `Unrecognized` and ignored by every tally.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum MatchResult {
    Win,
    Loss,
    Draw,
    Unrecognized(String),
}

impl MatchResult {
    pub fn parse(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "win" => MatchResult::Win,
            "loss" => MatchResult::Loss,
            "draw" => MatchResult::Draw,
            _ => MatchResult::Unrecognized(s.to_string()),
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, MatchResult::Unrecognized(_))
    }

    pub fn as_str(&self) -> &str {
        match self {
            MatchResult::Win => "win",
            MatchResult::Loss => "loss",
            MatchResult::Draw => "draw",
            MatchResult::Unrecognized(raw) => raw,
        }
    }
}

impl From<String> for MatchResult {
    fn from(s: String) -> Self {
        MatchResult::parse(&s)
    }
}

impl From<MatchResult> for String {
    fn from(result: MatchResult) -> Self {
        result.as_str().to_string()
    }
}

impl std::fmt::Display for MatchResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single match as supplied by the record store, with related entity
/// names already attached.
///
/// Rows read without an `id` get the content-derived one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "MatchRow")]
pub struct MatchRecord {
    pub id: MatchId,

    /// Deck played by the recording player. Compared case-sensitively.
    pub my_deck_name: String,

    /// Deck played by the opponent.
    pub opp_deck_name: String,

    pub result: MatchResult,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_name: Option<String>,

    /// Battlefield on the recording player's side, for rulesets that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub my_context_name: Option<String>,

    pub created_at: DateTime<Utc>,

    pub owner_project_id: ProjectId,
}

/// Match record as it appears in an import file.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MatchRow {
    #[serde(default)]
    id: Option<MatchId>,
    my_deck_name: String,
    opp_deck_name: String,
    result: MatchResult,
    #[serde(default)]
    category_name: Option<String>,
    #[serde(default)]
    my_context_name: Option<String>,
    created_at: DateTime<Utc>,
    owner_project_id: ProjectId,
}

impl From<MatchRow> for MatchRecord {
    fn from(row: MatchRow) -> Self {
        let mut record = MatchRecord {
            id: MatchId::default(),
            my_deck_name: row.my_deck_name,
            opp_deck_name: row.opp_deck_name,
            result: row.result,
            category_name: row.category_name,
            my_context_name: row.my_context_name,
            created_at: row.created_at,
            owner_project_id: row.owner_project_id,
        };
        record.id = row.id.unwrap_or_else(|| record.content_id());
        record
    }
}

impl MatchRecord {
    /// Create a record with a content-derived id and no category or context.
    pub fn new(
        owner_project_id: ProjectId,
        my_deck_name: impl Into<String>,
        opp_deck_name: impl Into<String>,
        result: MatchResult,
        created_at: DateTime<Utc>,
    ) -> Self {
        let mut record = Self {
            id: MatchId::default(),
            my_deck_name: my_deck_name.into(),
            opp_deck_name: opp_deck_name.into(),
            result,
            category_name: None,
            my_context_name: None,
            created_at,
            owner_project_id,
        };
        record.id = record.content_id();
        record
    }

    /// Id derived from every field that tells one game from another.
    pub fn content_id(&self) -> MatchId {
        EntityId::generate(&[
            self.owner_project_id.as_str(),
            &self.my_deck_name,
            &self.opp_deck_name,
            self.result.as_str(),
            self.category_name.as_deref().unwrap_or(""),
            self.my_context_name.as_deref().unwrap_or(""),
            &self.created_at.to_rfc3339(),
        ])
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category_name = Some(category.into());
        self.id = self.content_id();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.my_context_name = Some(context.into());
        self.id = self.content_id();
        self
    }
}
