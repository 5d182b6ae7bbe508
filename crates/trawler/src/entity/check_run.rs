//! CheckRun entity.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::check_conclusion::CheckConclusion;
use crate::entity::check_run_status::CheckRunStatus;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "check_runs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub platform_id: i64,
    pub pull_request_id: Uuid,
    /// Remote id of the suite this run belongs to.
    pub check_suite_id: Option<i64>,
    pub app_id: Option<i64>,
    pub name: String,
    pub head_sha: String,
    pub status: CheckRunStatus,
    pub conclusion: CheckConclusion,
    #[sea_orm(column_type = "Text", nullable)]
    pub html_url: Option<String>,
    pub started_at: Option<DateTimeWithTimeZone>,
    pub completed_at: Option<DateTimeWithTimeZone>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::pull_request::Entity",
        from = "Column::PullRequestId",
        to = "super::pull_request::Column::Id"
    )]
    PullRequest,
}

impl Related<super::pull_request::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PullRequest.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
