use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::review::{ActiveModel, Column, Entity as Review, Model};
use crate::platform::RemoteReview;

use super::errors::Result;

pub async fn find_by_platform_id<C: ConnectionTrait>(
    conn: &C,
    platform_id: i64,
) -> Result<Option<Model>> {
    Ok(Review::find()
        .filter(Column::PlatformId.eq(platform_id))
        .one(conn)
        .await?)
}

pub async fn list_by_pull_request<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
) -> Result<Vec<Model>> {
    Ok(Review::find()
        .filter(Column::PullRequestId.eq(pull_request_id))
        .order_by_asc(Column::SubmittedAt)
        .all(conn)
        .await?)
}

/// Insert or update a review by its remote id, keeping only the latest state.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
    remote: &RemoteReview,
    existing: Option<&Model>,
    now: DateTime<Utc>,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(existing.map_or_else(Uuid::new_v4, |m| m.id)),
        platform_id: Set(remote.platform_id),
        pull_request_id: Set(pull_request_id),
        author_login: Set(remote.author_login.clone()),
        state: Set(remote.state.clone()),
        body: Set(remote.body.clone()),
        html_url: Set(remote.html_url.clone()),
        submitted_at: Set(remote.submitted_at.map(|t| t.fixed_offset())),
        last_observed_at: Set(now.fixed_offset()),
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => model.insert(conn).await?,
    })
}
