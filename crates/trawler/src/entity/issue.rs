//! Issue entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "issues")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub platform_id: i64,
    pub repository_id: Uuid,
    pub number: i64,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub state: String,
    pub author_login: String,
    /// Label names (stored as JSON array for cross-database compatibility).
    #[sea_orm(column_type = "Json")]
    pub labels: serde_json::Value,
    #[sea_orm(column_type = "Text")]
    pub html_url: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    pub last_observed_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::repository::Entity",
        from = "Column::RepositoryId",
        to = "super::repository::Column::Id"
    )]
    Repository,
}

impl Related<super::repository::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Repository.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Label names, skipping anything in the JSON column that isn't a string.
    pub fn label_names(&self) -> Vec<String> {
        self.labels
            .as_array()
            .map(|labels| {
                labels
                    .iter()
                    .filter_map(|l| l.as_str().map(String::from))
                    .collect()
            })
            .unwrap_or_default()
    }
}
