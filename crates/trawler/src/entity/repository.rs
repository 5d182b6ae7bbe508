//! Repository entity - root of every cached pull request, issue, release and search.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "repositories")]
pub struct Model {
    /// Internal UUID primary key.
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Remote numeric id (external key).
    pub platform_id: i64,

    // ─── Naming ──────────────────────────────────────────────────────────────
    /// Owner login (user or organization).
    pub owner: String,
    /// Repository name.
    pub name: String,

    // ─── Content ─────────────────────────────────────────────────────────────
    pub description: Option<String>,
    pub default_branch: String,
    pub is_private: bool,
    pub is_fork: bool,
    #[sea_orm(column_type = "Text")]
    pub html_url: String,

    // ─── Tracking ────────────────────────────────────────────────────────────
    /// When the repository was last updated on the remote.
    pub updated_at: Option<DateTimeWithTimeZone>,
    /// When this record was last refreshed by a sync.
    pub synced_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Compute the full name (owner/name).
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}
