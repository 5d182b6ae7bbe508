//! Pull request status snapshots. Rows are only ever inserted.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::pull_request_status::{ActiveModel, Column, Entity as PullRequestStatus, Model};
use crate::notify::AggregateStatus;

use super::errors::Result;

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>> {
    Ok(PullRequestStatus::find_by_id(id).one(conn).await?)
}

/// Snapshot history of a pull request, oldest first.
pub async fn history<C: ConnectionTrait>(conn: &C, pull_request_id: Uuid) -> Result<Vec<Model>> {
    Ok(PullRequestStatus::find()
        .filter(Column::PullRequestId.eq(pull_request_id))
        .order_by_asc(Column::CreatedAt)
        .all(conn)
        .await?)
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
    previous_status_id: Option<Uuid>,
    head_sha: &str,
    aggregate: &AggregateStatus,
    now: DateTime<Utc>,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        pull_request_id: Set(pull_request_id),
        previous_status_id: Set(previous_status_id),
        head_sha: Set(head_sha.to_string()),
        state: Set(aggregate.state),
        conclusion: Set(aggregate.conclusion),
        commit_state: Set(aggregate.commit_state),
        created_at: Set(now.fixed_offset()),
    };
    Ok(model.insert(conn).await?)
}
