//! Retention pruning.
//!
//! Runs inside the orchestrator's transaction after a successful update and
//! never spans a remote call. Unreferenced rows go immediately; time-based
//! rules use the windows in [`SyncConfig`].

use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Query};
use sea_orm::{ColumnTrait, Condition, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::config::SyncConfig;
use crate::entity::{
    check_run, check_suite, commit_combined_status, issue, notification, pull_request,
    pull_request_status, release, review, search, search_issue,
};
use crate::store::{self, Result};

/// Rows removed by a prune pass, per kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PruneStats {
    pub check_runs: u64,
    pub check_suites: u64,
    pub statuses: u64,
    pub combined_statuses: u64,
    pub reviews: u64,
    pub notifications: u64,
    pub searches: u64,
    pub search_issues: u64,
    pub releases: u64,
}

impl PruneStats {
    pub fn total(&self) -> u64 {
        self.check_runs
            + self.check_suites
            + self.statuses
            + self.combined_statuses
            + self.reviews
            + self.notifications
            + self.searches
            + self.search_issues
            + self.releases
    }
}

/// The rows a sync just refreshed, used to drop those it no longer sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObservedScope<'a> {
    PullRequests { repository_id: Uuid },
    Issues { repository_id: Uuid },
    Releases { repository_id: Uuid },
    AuthoredPullRequests { login: &'a str },
}

/// Delete rows in `scope` whose `last_observed_at` is older than `cutoff`.
pub async fn delete_unobserved<C: ConnectionTrait>(
    conn: &C,
    scope: ObservedScope<'_>,
    cutoff: DateTime<Utc>,
) -> Result<u64> {
    match scope {
        ObservedScope::PullRequests { repository_id } => {
            store::pull_request::delete_unobserved_in_repository(conn, repository_id, cutoff).await
        }
        ObservedScope::Issues { repository_id } => {
            store::issue::delete_unobserved_in_repository(conn, repository_id, cutoff).await
        }
        ObservedScope::Releases { repository_id } => {
            store::release::delete_unobserved_in_repository(conn, repository_id, cutoff).await
        }
        ObservedScope::AuthoredPullRequests { login } => {
            store::pull_request::delete_unobserved_by_author(conn, login, cutoff).await
        }
    }
}

/// Apply every retention rule.
pub async fn prune<C: ConnectionTrait>(
    conn: &C,
    config: &SyncConfig,
    now: DateTime<Utc>,
) -> Result<PruneStats> {
    let mut stats = PruneStats {
        check_runs: check_run::Entity::delete_many()
            .filter(check_run::Column::PullRequestId.not_in_subquery(pull_request_ids()))
            .exec(conn)
            .await?
            .rows_affected,
        check_suites: check_suite::Entity::delete_many()
            .filter(check_suite::Column::PullRequestId.not_in_subquery(pull_request_ids()))
            .exec(conn)
            .await?
            .rows_affected,
        reviews: review::Entity::delete_many()
            .filter(review::Column::PullRequestId.not_in_subquery(pull_request_ids()))
            .exec(conn)
            .await?
            .rows_affected,
        ..Default::default()
    };

    stats.statuses = pull_request_status::Entity::delete_many()
        .filter(
            pull_request_status::Column::Id.not_in_subquery(
                Query::select()
                    .column(pull_request::Column::StatusId)
                    .from(pull_request::Entity)
                    .and_where(pull_request::Column::StatusId.is_not_null())
                    .to_owned(),
            ),
        )
        .exec(conn)
        .await?
        .rows_affected;

    stats.combined_statuses = commit_combined_status::Entity::delete_many()
        .filter(
            Expr::exists(
                Query::select()
                    .expr(Expr::val(1))
                    .from(pull_request::Entity)
                    .and_where(
                        Expr::col((pull_request::Entity, pull_request::Column::RepositoryId))
                            .equals((
                                commit_combined_status::Entity,
                                commit_combined_status::Column::RepositoryId,
                            )),
                    )
                    .and_where(
                        Expr::col((pull_request::Entity, pull_request::Column::HeadSha)).equals((
                            commit_combined_status::Entity,
                            commit_combined_status::Column::Sha,
                        )),
                    )
                    .to_owned(),
            )
            .not(),
        )
        .exec(conn)
        .await?
        .rows_affected;

    stats.notifications = notification::Entity::delete_many()
        .filter(
            notification::Column::CreatedAt
                .lt((now - config.notification_retention()).fixed_offset()),
        )
        .exec(conn)
        .await?
        .rows_affected;

    stats.searches = search::Entity::delete_many()
        .filter(search::Column::SearchedAt.lt((now - config.search_retention()).fixed_offset()))
        .exec(conn)
        .await?
        .rows_affected;

    stats.search_issues = search_issue::Entity::delete_many()
        .filter(
            Condition::any()
                .add(
                    search_issue::Column::SearchId.not_in_subquery(
                        Query::select()
                            .column(search::Column::Id)
                            .from(search::Entity)
                            .to_owned(),
                    ),
                )
                .add(
                    search_issue::Column::IssueId.not_in_subquery(
                        Query::select()
                            .column(issue::Column::Id)
                            .from(issue::Entity)
                            .to_owned(),
                    ),
                ),
        )
        .exec(conn)
        .await?
        .rows_affected;

    stats.releases = release::Entity::delete_many()
        .filter(
            release::Column::LastObservedAt
                .lt((now - config.release_retention()).fixed_offset()),
        )
        .exec(conn)
        .await?
        .rows_affected;

    tracing::debug!(
        check_runs = stats.check_runs,
        check_suites = stats.check_suites,
        statuses = stats.statuses,
        combined_statuses = stats.combined_statuses,
        reviews = stats.reviews,
        notifications = stats.notifications,
        searches = stats.searches,
        search_issues = stats.search_issues,
        releases = stats.releases,
        "pruned cache"
    );

    Ok(stats)
}

fn pull_request_ids() -> sea_orm::sea_query::SelectStatement {
    Query::select()
        .column(pull_request::Column::Id)
        .from(pull_request::Entity)
        .to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prune_stats_total() {
        let stats = PruneStats {
            check_runs: 2,
            statuses: 1,
            notifications: 4,
            ..Default::default()
        };
        assert_eq!(stats.total(), 7);
        assert_eq!(PruneStats::default().total(), 0);
    }
}
