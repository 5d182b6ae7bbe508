use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::issue::{ActiveModel, Column, Entity as Issue, Model};
use crate::platform::RemoteIssue;

use super::errors::Result;

pub async fn find_by_platform_id<C: ConnectionTrait>(
    conn: &C,
    platform_id: i64,
) -> Result<Option<Model>> {
    Ok(Issue::find()
        .filter(Column::PlatformId.eq(platform_id))
        .one(conn)
        .await?)
}

pub async fn list_by_repository<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
) -> Result<Vec<Model>> {
    Ok(Issue::find()
        .filter(Column::RepositoryId.eq(repository_id))
        .order_by_desc(Column::UpdatedAt)
        .all(conn)
        .await?)
}

/// Insert or update an issue by its remote id, marking it observed.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    remote: &RemoteIssue,
    now: DateTime<Utc>,
) -> Result<Model> {
    let existing = find_by_platform_id(conn, remote.platform_id).await?;

    let model = ActiveModel {
        id: Set(existing.as_ref().map_or_else(Uuid::new_v4, |m| m.id)),
        platform_id: Set(remote.platform_id),
        repository_id: Set(repository_id),
        number: Set(remote.number),
        title: Set(remote.title.clone()),
        state: Set(remote.state.clone()),
        author_login: Set(remote.author_login.clone()),
        labels: Set(serde_json::json!(remote.labels)),
        html_url: Set(remote.html_url.clone()),
        created_at: Set(remote.created_at.fixed_offset()),
        updated_at: Set(remote.updated_at.fixed_offset()),
        last_observed_at: Set(now.fixed_offset()),
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => model.insert(conn).await?,
    })
}

/// Delete a repository's issues not observed since `cutoff`.
pub async fn delete_unobserved_in_repository<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    cutoff: DateTime<Utc>,
) -> Result<u64> {
    let result = Issue::delete_many()
        .filter(Column::RepositoryId.eq(repository_id))
        .filter(Column::LastObservedAt.lt(cutoff.fixed_offset()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
