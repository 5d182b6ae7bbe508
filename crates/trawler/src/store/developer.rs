use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::developer::{ActiveModel, Column, Entity as Developer, Model};
use crate::platform::RemoteUser;

use super::errors::Result;

pub async fn find_by_login<C: ConnectionTrait>(conn: &C, login: &str) -> Result<Option<Model>> {
    Ok(Developer::find()
        .filter(Column::Login.eq(login))
        .one(conn)
        .await?)
}

pub async fn list_all<C: ConnectionTrait>(conn: &C) -> Result<Vec<Model>> {
    Ok(Developer::find()
        .order_by_asc(Column::Login)
        .all(conn)
        .await?)
}

/// Insert or update a developer by login.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    user: &RemoteUser,
    now: DateTime<Utc>,
) -> Result<Model> {
    let existing = find_by_login(conn, &user.login).await?;

    let model = ActiveModel {
        id: Set(existing.as_ref().map_or_else(Uuid::new_v4, |m| m.id)),
        platform_id: Set(user.platform_id),
        login: Set(user.login.clone()),
        avatar_url: Set(user.avatar_url.clone()),
        last_seen_at: Set(now.fixed_offset()),
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => model.insert(conn).await?,
    })
}
