use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::repository::{ActiveModel, Column, Entity as Repository, Model};
use crate::platform::RemoteRepository;

use super::errors::Result;

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>> {
    Ok(Repository::find_by_id(id).one(conn).await?)
}

pub async fn find_by_platform_id<C: ConnectionTrait>(
    conn: &C,
    platform_id: i64,
) -> Result<Option<Model>> {
    Ok(Repository::find()
        .filter(Column::PlatformId.eq(platform_id))
        .one(conn)
        .await?)
}

/// Find a repository by owner and name.
pub async fn find_by_full_name<C: ConnectionTrait>(
    conn: &C,
    owner: &str,
    name: &str,
) -> Result<Option<Model>> {
    Ok(Repository::find()
        .filter(Column::Owner.eq(owner))
        .filter(Column::Name.eq(name))
        .one(conn)
        .await?)
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>> {
    Ok(Repository::find()
        .order_by_asc(Column::Owner)
        .order_by_asc(Column::Name)
        .all(conn)
        .await?)
}

/// Insert or update a repository by its remote id.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    remote: &RemoteRepository,
    now: DateTime<Utc>,
) -> Result<Model> {
    let existing = find_by_platform_id(conn, remote.platform_id).await?;

    let model = ActiveModel {
        id: Set(existing.as_ref().map_or_else(Uuid::new_v4, |m| m.id)),
        platform_id: Set(remote.platform_id),
        owner: Set(remote.owner.clone()),
        name: Set(remote.name.clone()),
        description: Set(remote.description.clone()),
        default_branch: Set(remote.default_branch.clone()),
        is_private: Set(remote.is_private),
        is_fork: Set(remote.is_fork),
        html_url: Set(remote.html_url.clone()),
        updated_at: Set(remote.updated_at.map(|t| t.fixed_offset())),
        synced_at: Set(now.fixed_offset()),
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => model.insert(conn).await?,
    })
}
