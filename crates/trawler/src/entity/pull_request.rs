//! PullRequest entity.

use chrono::{DateTime, Duration, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_requests")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    /// Remote numeric id (external key).
    pub platform_id: i64,
    pub repository_id: Uuid,
    pub number: i64,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    /// Remote state (`open`, `closed`).
    pub state: String,
    pub is_draft: bool,
    pub author_login: String,
    pub head_sha: String,
    pub head_ref: String,
    pub base_ref: String,
    #[sea_orm(column_type = "Text")]
    pub html_url: String,
    /// Latest status snapshot for this pull request.
    pub status_id: Option<Uuid>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    /// Refreshed every time a sync sees this pull request.
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
    /// Whether the remote hasn't touched this pull request within `max_age`.
    pub fn is_inactive(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.updated_at.with_timezone(&Utc) < now - max_age
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model(updated_at: DateTime<Utc>) -> Model {
        Model {
            id: Uuid::new_v4(),
            platform_id: 1,
            repository_id: Uuid::new_v4(),
            number: 7,
            title: "Fix the thing".to_string(),
            state: "open".to_string(),
            is_draft: false,
            author_login: "octocat".to_string(),
            head_sha: "abc".to_string(),
            head_ref: "fix".to_string(),
            base_ref: "main".to_string(),
            html_url: "https://github.com/o/r/pull/7".to_string(),
            status_id: None,
            created_at: updated_at.fixed_offset(),
            updated_at: updated_at.fixed_offset(),
            last_observed_at: updated_at.fixed_offset(),
        }
    }

    #[test]
    fn inactive_after_max_age() {
        let now = Utc::now();
        assert!(model(now - Duration::days(2)).is_inactive(now, Duration::days(1)));
        assert!(!model(now - Duration::hours(3)).is_inactive(now, Duration::days(1)));
    }
}
