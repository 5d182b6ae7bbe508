//! Per pull request update: upsert, then the guarded check and review steps.

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseTransaction, TransactionTrait};

use crate::config::SyncConfig;
use crate::entity::{pull_request, repository};
use crate::notify::{self, CheckSignals};
use crate::platform::{self, RemoteClient, RemoteError, RemotePullRequest, short_error_message};
use crate::store;

use super::errors::Result;
use super::types::SyncResult;

/// Upsert one pull request and refresh its checks and reviews.
///
/// The check and review steps each fetch first and then write inside their
/// own savepoint. A failing step is logged, recorded in `result.errors` and
/// rolled back to the savepoint, leaving that pull request's derived data as
/// it was. Transport and rate-limit errors abort the whole operation.
pub(crate) async fn update_pull_request(
    txn: &DatabaseTransaction,
    config: &SyncConfig,
    repo: &repository::Model,
    client: &dyn RemoteClient,
    remote: &RemotePullRequest,
    now: DateTime<Utc>,
    result: &mut SyncResult,
) -> Result<pull_request::Model> {
    let pr = store::pull_request::upsert(txn, repo.id, remote, now).await?;
    result.pull_requests += 1;

    refresh_checks(txn, config, repo, client, &pr, now, result).await?;
    refresh_reviews(txn, config, repo, client, &pr, now, result).await?;

    Ok(pr)
}

async fn refresh_checks(
    txn: &DatabaseTransaction,
    config: &SyncConfig,
    repo: &repository::Model,
    client: &dyn RemoteClient,
    pr: &pull_request::Model,
    now: DateTime<Utc>,
    result: &mut SyncResult,
) -> Result<()> {
    let signals = match fetch_checks(client, &repo.owner, &repo.name, &pr.head_sha).await {
        Ok(signals) => signals,
        Err(e) => return skip_remote(repo, pr, "checks", e, result),
    };

    let savepoint = txn.begin().await?;
    match notify::record_checks(&savepoint, repo, pr, signals, config, now).await {
        Ok(outcome) => {
            savepoint.commit().await?;
            if outcome.notification.is_some() {
                result.notifications += 1;
            }
        }
        Err(e) => {
            skip(repo, pr, "checks", &e, result);
            rollback_savepoint(savepoint).await;
        }
    }
    Ok(())
}

async fn refresh_reviews(
    txn: &DatabaseTransaction,
    config: &SyncConfig,
    repo: &repository::Model,
    client: &dyn RemoteClient,
    pr: &pull_request::Model,
    now: DateTime<Utc>,
    result: &mut SyncResult,
) -> Result<()> {
    let reviews = match client.list_reviews(&repo.owner, &repo.name, pr.number).await {
        Ok(reviews) => reviews,
        Err(e) => return skip_remote(repo, pr, "reviews", e, result),
    };

    let savepoint = txn.begin().await?;
    let mut recorded = 0;
    let mut notified = 0;
    let mut failure = None;
    for review in &reviews {
        match notify::record_review(&savepoint, repo, pr, review, config, now).await {
            Ok(outcome) => {
                recorded += 1;
                if outcome.notification.is_some() {
                    notified += 1;
                }
            }
            Err(e) => {
                failure = Some(e);
                break;
            }
        }
    }

    match failure {
        None => {
            savepoint.commit().await?;
            result.reviews += recorded;
            result.notifications += notified;
        }
        Some(e) => {
            skip(repo, pr, "reviews", &e, result);
            rollback_savepoint(savepoint).await;
        }
    }
    Ok(())
}

async fn fetch_checks(
    client: &dyn RemoteClient,
    owner: &str,
    name: &str,
    sha: &str,
) -> platform::Result<CheckSignals> {
    let (runs, suites, combined) = tokio::try_join!(
        client.list_check_runs(owner, name, sha),
        client.list_check_suites(owner, name, sha),
        client.get_combined_status(owner, name, sha),
    )?;
    Ok(CheckSignals {
        runs,
        suites,
        combined: Some(combined),
    })
}

/// Transport and rate-limit failures end the operation; the rest skip a step.
fn is_fatal(e: &RemoteError) -> bool {
    e.is_transient() || e.is_rate_limited()
}

fn skip_remote(
    repo: &repository::Model,
    pr: &pull_request::Model,
    step: &str,
    e: RemoteError,
    result: &mut SyncResult,
) -> Result<()> {
    if is_fatal(&e) {
        return Err(e.into());
    }
    skip(repo, pr, step, &e, result);
    Ok(())
}

fn skip(
    repo: &repository::Model,
    pr: &pull_request::Model,
    step: &str,
    e: &impl std::error::Error,
    result: &mut SyncResult,
) {
    let message = format!(
        "{}#{} {step}: {}",
        repo.full_name(),
        pr.number,
        short_error_message(e)
    );
    tracing::warn!(
        repo = %repo.full_name(),
        number = pr.number,
        step,
        error = %e,
        "skipping pull request step"
    );
    result.errors.push(message);
}

async fn rollback_savepoint(savepoint: DatabaseTransaction) {
    if let Err(e) = savepoint.rollback().await {
        tracing::warn!(error = %e, "savepoint rollback failed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transport_and_rate_limits_are_fatal() {
        assert!(is_fatal(&RemoteError::network("reset")));
        assert!(is_fatal(&RemoteError::RateLimited { reset_at: None }));
        assert!(!is_fatal(&RemoteError::not_found("checks")));
        assert!(!is_fatal(&RemoteError::forbidden("checks")));
        assert!(!is_fatal(&RemoteError::api("422")));
    }
}
