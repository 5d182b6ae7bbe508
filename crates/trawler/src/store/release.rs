use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::release::{ActiveModel, Column, Entity as Release, Model};
use crate::platform::RemoteRelease;

use super::errors::{Result, StoreError};

pub async fn find_by_platform_id<C: ConnectionTrait>(
    conn: &C,
    platform_id: i64,
) -> Result<Option<Model>> {
    Ok(Release::find()
        .filter(Column::PlatformId.eq(platform_id))
        .one(conn)
        .await?)
}

/// Releases of a repository, newest first.
pub async fn list_by_repository<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
) -> Result<Vec<Model>> {
    Ok(Release::find()
        .filter(Column::RepositoryId.eq(repository_id))
        .order_by_desc(Column::CreatedAt)
        .all(conn)
        .await?)
}

/// Insert or update a release by its remote id, marking it observed.
///
/// # Errors
/// Returns `StoreError::InvalidInput` for draft releases, which are never cached.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    remote: &RemoteRelease,
    now: DateTime<Utc>,
) -> Result<Model> {
    if remote.is_draft {
        return Err(StoreError::invalid_input(format!(
            "draft release {} cannot be cached",
            remote.tag_name
        )));
    }

    let existing = find_by_platform_id(conn, remote.platform_id).await?;

    let model = ActiveModel {
        id: Set(existing.as_ref().map_or_else(Uuid::new_v4, |m| m.id)),
        platform_id: Set(remote.platform_id),
        repository_id: Set(repository_id),
        name: Set(remote.name.clone()),
        tag_name: Set(remote.tag_name.clone()),
        is_prerelease: Set(remote.is_prerelease),
        html_url: Set(remote.html_url.clone()),
        created_at: Set(remote.created_at.fixed_offset()),
        published_at: Set(remote.published_at.map(|t| t.fixed_offset())),
        last_observed_at: Set(now.fixed_offset()),
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => model.insert(conn).await?,
    })
}

/// Delete a repository's releases not observed since `cutoff`.
pub async fn delete_unobserved_in_repository<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    cutoff: DateTime<Utc>,
) -> Result<u64> {
    let result = Release::delete_many()
        .filter(Column::RepositoryId.eq(repository_id))
        .filter(Column::LastObservedAt.lt(cutoff.fixed_offset()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
