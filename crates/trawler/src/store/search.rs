//! Saved issue searches and the issues they returned.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QuerySelect, Set,
};
use uuid::Uuid;

use crate::entity::issue::{self, Entity as Issue};
use crate::entity::search::{self, Entity as Search};
use crate::entity::search_issue::{self, Entity as SearchIssue};

use super::errors::{Result, StoreError};

pub async fn find<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    query: &str,
) -> Result<Option<search::Model>> {
    Ok(Search::find()
        .filter(search::Column::RepositoryId.eq(repository_id))
        .filter(search::Column::Query.eq(query))
        .one(conn)
        .await?)
}

/// Record that a search ran, creating it on first use.
pub async fn upsert<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    query: &str,
    now: DateTime<Utc>,
) -> Result<search::Model> {
    let query = query.trim();
    if query.is_empty() {
        return Err(StoreError::invalid_input("search query must not be empty"));
    }

    match find(conn, repository_id, query).await? {
        Some(existing) => {
            let model = search::ActiveModel {
                id: Set(existing.id),
                searched_at: Set(now.fixed_offset()),
                ..Default::default()
            };
            Ok(model.update(conn).await?)
        }
        None => {
            let model = search::ActiveModel {
                id: Set(Uuid::new_v4()),
                repository_id: Set(repository_id),
                query: Set(query.to_string()),
                created_at: Set(now.fixed_offset()),
                searched_at: Set(now.fixed_offset()),
            };
            Ok(model.insert(conn).await?)
        }
    }
}

/// Link an issue to a search, refreshing `linked_at` if already linked.
pub async fn link_issue<C: ConnectionTrait>(
    conn: &C,
    search_id: Uuid,
    issue_id: Uuid,
    now: DateTime<Utc>,
) -> Result<search_issue::Model> {
    let existing = SearchIssue::find()
        .filter(search_issue::Column::SearchId.eq(search_id))
        .filter(search_issue::Column::IssueId.eq(issue_id))
        .one(conn)
        .await?;

    match existing {
        Some(existing) => {
            let model = search_issue::ActiveModel {
                id: Set(existing.id),
                linked_at: Set(now.fixed_offset()),
                ..Default::default()
            };
            Ok(model.update(conn).await?)
        }
        None => {
            let model = search_issue::ActiveModel {
                id: Set(Uuid::new_v4()),
                search_id: Set(search_id),
                issue_id: Set(issue_id),
                linked_at: Set(now.fixed_offset()),
            };
            Ok(model.insert(conn).await?)
        }
    }
}

/// Unlink issues the search did not return again since `cutoff`.
pub async fn unlink_stale<C: ConnectionTrait>(
    conn: &C,
    search_id: Uuid,
    cutoff: DateTime<Utc>,
) -> Result<u64> {
    let result = SearchIssue::delete_many()
        .filter(search_issue::Column::SearchId.eq(search_id))
        .filter(search_issue::Column::LinkedAt.lt(cutoff.fixed_offset()))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

/// Issues currently linked to a search.
pub async fn issues_for<C: ConnectionTrait>(
    conn: &C,
    search_id: Uuid,
) -> Result<Vec<issue::Model>> {
    let issue_ids: Vec<Uuid> = SearchIssue::find()
        .select_only()
        .column(search_issue::Column::IssueId)
        .filter(search_issue::Column::SearchId.eq(search_id))
        .into_tuple()
        .all(conn)
        .await?;

    Ok(Issue::find()
        .filter(issue::Column::Id.is_in(issue_ids))
        .all(conn)
        .await?)
}
