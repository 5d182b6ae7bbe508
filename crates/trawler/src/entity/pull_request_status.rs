//! PullRequestStatus entity - immutable per-sync snapshot of a pull request's checks.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::entity::check_conclusion::CheckConclusion;
use crate::entity::commit_state::CommitState;
use crate::entity::status_state::StatusState;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "pull_request_statuses")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub pull_request_id: Uuid,
    /// The snapshot this one superseded, if any.
    pub previous_status_id: Option<Uuid>,
    pub head_sha: String,
    pub state: StatusState,
    /// Most severe conclusion across the non-excluded check runs and suites.
    pub conclusion: CheckConclusion,
    pub commit_state: CommitState,
    pub created_at: DateTimeWithTimeZone,
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
