//! Project model: a user-owned collection of match records within one TCG.

use serde::{Deserialize, Serialize};

use super::{ProjectId, TcgId, UserId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: ProjectId,

    pub tcg_id: TcgId,

    #[serde(default)]
    pub name: String,

    /// Users that own this project
    #[serde(default)]
    pub owner_user_ids: Vec<UserId>,
}

impl Project {
    pub fn new(id: ProjectId, tcg_id: TcgId, name: impl Into<String>) -> Self {
        Self {
            id,
            tcg_id,
            name: name.into(),
            owner_user_ids: Vec::new(),
        }
    }

    pub fn with_owners(mut self, owners: Vec<UserId>) -> Self {
        self.owner_user_ids = owners;
        self
    }
}
