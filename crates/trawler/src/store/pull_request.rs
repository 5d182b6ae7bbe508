use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::pull_request::{ActiveModel, Column, Entity as PullRequest, Model};
use crate::platform::RemotePullRequest;

use super::errors::{Result, StoreError};

pub async fn find_by_id<C: ConnectionTrait>(conn: &C, id: Uuid) -> Result<Option<Model>> {
    Ok(PullRequest::find_by_id(id).one(conn).await?)
}

pub async fn find_by_platform_id<C: ConnectionTrait>(
    conn: &C,
    platform_id: i64,
) -> Result<Option<Model>> {
    Ok(PullRequest::find()
        .filter(Column::PlatformId.eq(platform_id))
        .one(conn)
        .await?)
}

pub async fn list_by_repository<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
) -> Result<Vec<Model>> {
    Ok(PullRequest::find()
        .filter(Column::RepositoryId.eq(repository_id))
        .order_by_desc(Column::Number)
        .all(conn)
        .await?)
}

pub async fn list_by_author<C: ConnectionTrait>(conn: &C, login: &str) -> Result<Vec<Model>> {
    Ok(PullRequest::find()
        .filter(Column::AuthorLogin.eq(login))
        .order_by_desc(Column::UpdatedAt)
        .all(conn)
        .await?)
}

/// Insert or update a pull request by its remote id, marking it observed.
///
/// The status pointer is left untouched on update; it only moves through
/// [`set_status`].
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    remote: &RemotePullRequest,
    now: DateTime<Utc>,
) -> Result<Model> {
    let existing = find_by_platform_id(conn, remote.platform_id).await?;

    let mut model = ActiveModel {
        id: Set(existing.as_ref().map_or_else(Uuid::new_v4, |m| m.id)),
        platform_id: Set(remote.platform_id),
        repository_id: Set(repository_id),
        number: Set(remote.number),
        title: Set(remote.title.clone()),
        state: Set(remote.state.clone()),
        is_draft: Set(remote.is_draft),
        author_login: Set(remote.author_login.clone()),
        head_sha: Set(remote.head_sha.clone()),
        head_ref: Set(remote.head_ref.clone()),
        base_ref: Set(remote.base_ref.clone()),
        html_url: Set(remote.html_url.clone()),
        created_at: Set(remote.created_at.fixed_offset()),
        updated_at: Set(remote.updated_at.fixed_offset()),
        last_observed_at: Set(now.fixed_offset()),
        ..Default::default()
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => {
            model.status_id = Set(None);
            model.insert(conn).await?
        }
    })
}

/// Point the pull request at its newest status snapshot.
pub async fn set_status<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
    status_id: Uuid,
) -> Result<Model> {
    let model = ActiveModel {
        id: Set(pull_request_id),
        status_id: Set(Some(status_id)),
        ..Default::default()
    };
    model.update(conn).await.map_err(|e| match e {
        sea_orm::DbErr::RecordNotUpdated => {
            StoreError::not_found_by_id("pull_requests", pull_request_id)
        }
        other => other.into(),
    })
}

/// Refresh `last_observed_at` of a repository's pull requests by number
/// without touching their contents. Returns the rows updated.
pub async fn mark_observed<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    numbers: impl IntoIterator<Item = i64>,
    now: DateTime<Utc>,
) -> Result<u64> {
    let numbers: Vec<i64> = numbers.into_iter().collect();
    if numbers.is_empty() {
        return Ok(0);
    }
    let result = PullRequest::update_many()
        .col_expr(Column::LastObservedAt, Expr::value(now.fixed_offset()))
        .filter(Column::RepositoryId.eq(repository_id))
        .filter(Column::Number.is_in(numbers))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Delete a repository's pull requests not observed since `cutoff`.
pub async fn delete_unobserved_in_repository<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    cutoff: DateTime<Utc>,
) -> Result<u64> {
    let result = PullRequest::delete_many()
        .filter(Column::RepositoryId.eq(repository_id))
        .filter(Column::LastObservedAt.lt(cutoff.fixed_offset()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Delete pull requests authored by `login` not observed since `cutoff`.
pub async fn delete_unobserved_by_author<C: ConnectionTrait>(
    conn: &C,
    login: &str,
    cutoff: DateTime<Utc>,
) -> Result<u64> {
    let result = PullRequest::delete_many()
        .filter(Column::AuthorLogin.eq(login))
        .filter(Column::LastObservedAt.lt(cutoff.fixed_offset()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}
