//! Check runs, check suites and combined commit statuses.

use chrono::{DateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, Set,
};
use uuid::Uuid;

use crate::entity::check_conclusion::CheckConclusion;
use crate::entity::check_run::{self, Entity as CheckRun};
use crate::entity::check_run_status::CheckRunStatus;
use crate::entity::check_suite::{self, Entity as CheckSuite};
use crate::entity::commit_combined_status::{self, Entity as CommitCombinedStatus};
use crate::entity::commit_state::CommitState;
use crate::platform::{RemoteCheckRun, RemoteCheckSuite, RemoteCombinedStatus};

use super::errors::Result;

/// Replace every check run and suite of a pull request.
///
/// Existing rows are deleted before the new generation is inserted, so
/// callers must run this inside a transaction to keep readers from seeing a
/// partial set.
pub async fn replace_for_pull_request<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
    runs: &[RemoteCheckRun],
    suites: &[RemoteCheckSuite],
) -> Result<(Vec<check_run::Model>, Vec<check_suite::Model>)> {
    CheckRun::delete_many()
        .filter(check_run::Column::PullRequestId.eq(pull_request_id))
        .exec(conn)
        .await?;
    CheckSuite::delete_many()
        .filter(check_suite::Column::PullRequestId.eq(pull_request_id))
        .exec(conn)
        .await?;

    let mut run_models = Vec::with_capacity(runs.len());
    for run in runs {
        let model = check_run::ActiveModel {
            id: Set(Uuid::new_v4()),
            platform_id: Set(run.platform_id),
            pull_request_id: Set(pull_request_id),
            check_suite_id: Set(run.check_suite_id),
            app_id: Set(run.app_id),
            name: Set(run.name.clone()),
            head_sha: Set(run.head_sha.clone()),
            status: Set(CheckRunStatus::from_remote(Some(&run.status))),
            conclusion: Set(CheckConclusion::from_remote(run.conclusion.as_deref())),
            html_url: Set(run.html_url.clone()),
            started_at: Set(run.started_at.map(|t| t.fixed_offset())),
            completed_at: Set(run.completed_at.map(|t| t.fixed_offset())),
        };
        run_models.push(model.insert(conn).await?);
    }

    let mut suite_models = Vec::with_capacity(suites.len());
    for suite in suites {
        let model = check_suite::ActiveModel {
            id: Set(Uuid::new_v4()),
            platform_id: Set(suite.platform_id),
            pull_request_id: Set(pull_request_id),
            app_id: Set(suite.app_id),
            app_name: Set(suite.app_name.clone()),
            head_sha: Set(suite.head_sha.clone()),
            status: Set(CheckRunStatus::from_remote(Some(&suite.status))),
            conclusion: Set(CheckConclusion::from_remote(suite.conclusion.as_deref())),
        };
        suite_models.push(model.insert(conn).await?);
    }

    Ok((run_models, suite_models))
}

pub async fn list_runs<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
) -> Result<Vec<check_run::Model>> {
    Ok(CheckRun::find()
        .filter(check_run::Column::PullRequestId.eq(pull_request_id))
        .order_by_asc(check_run::Column::Name)
        .all(conn)
        .await?)
}

pub async fn list_suites<C: ConnectionTrait>(
    conn: &C,
    pull_request_id: Uuid,
) -> Result<Vec<check_suite::Model>> {
    Ok(CheckSuite::find()
        .filter(check_suite::Column::PullRequestId.eq(pull_request_id))
        .all(conn)
        .await?)
}

pub async fn find_combined_status<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    sha: &str,
) -> Result<Option<commit_combined_status::Model>> {
    Ok(CommitCombinedStatus::find()
        .filter(commit_combined_status::Column::RepositoryId.eq(repository_id))
        .filter(commit_combined_status::Column::Sha.eq(sha))
        .one(conn)
        .await?)
}

/// Insert or update the combined status of a commit.
pub async fn upsert_combined_status<C: ConnectionTrait>(
    conn: &C,
    repository_id: Uuid,
    remote: &RemoteCombinedStatus,
    now: DateTime<Utc>,
) -> Result<commit_combined_status::Model> {
    let existing = find_combined_status(conn, repository_id, &remote.sha).await?;

    let model = commit_combined_status::ActiveModel {
        id: Set(existing.as_ref().map_or_else(Uuid::new_v4, |m| m.id)),
        repository_id: Set(repository_id),
        sha: Set(remote.sha.clone()),
        state: Set(CommitState::from_remote(&remote.state)),
        total_count: Set(remote.total_count),
        updated_at: Set(now.fixed_offset()),
    };

    Ok(match existing {
        Some(_) => model.update(conn).await?,
        None => model.insert(conn).await?,
    })
}
