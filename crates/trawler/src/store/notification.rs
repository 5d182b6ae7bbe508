use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::notification::{ActiveModel, Column, Entity as Notification, Model};
use crate::entity::notification_kind::NotificationKind;

use super::errors::Result;

/// Everything needed to record a notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub repository_full_name: String,
    pub pull_request_id: Option<Uuid>,
    pub pull_request_number: Option<i64>,
    pub user_login: String,
    pub title: String,
    pub description: String,
    pub url: String,
    pub review_id: Option<Uuid>,
    pub status_id: Option<Uuid>,
}

pub async fn insert<C: ConnectionTrait>(
    conn: &C,
    new: NewNotification,
    now: DateTime<Utc>,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(Uuid::new_v4()),
        kind: Set(new.kind),
        repository_full_name: Set(new.repository_full_name),
        pull_request_id: Set(new.pull_request_id),
        pull_request_number: Set(new.pull_request_number),
        user_login: Set(new.user_login),
        title: Set(new.title),
        description: Set(new.description),
        url: Set(new.url),
        review_id: Set(new.review_id),
        status_id: Set(new.status_id),
        created_at: Set(now.fixed_offset()),
        toasted: Set(false),
    };
    Ok(model.insert(conn).await?)
}

/// Notifications newest first, optionally only those created after `since`.
pub async fn list<C: ConnectionTrait>(
    conn: &C,
    since: Option<DateTime<Utc>>,
    include_delivered: bool,
) -> Result<Vec<Model>> {
    let mut query = Notification::find();
    if let Some(since) = since {
        query = query.filter(Column::CreatedAt.gt(since.fixed_offset()));
    }
    if !include_delivered {
        query = query.filter(Column::Toasted.eq(false));
    }
    Ok(query.order_by_desc(Column::CreatedAt).all(conn).await?)
}

/// Mark a notification delivered. Returns whether a row was updated.
pub async fn mark_toasted<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<bool> {
    let result = Notification::update_many()
        .col_expr(Column::Toasted, sea_orm::sea_query::Expr::value(true))
        .filter(Column::Id.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected > 0)
}
