//! Notification derivation.
//!
//! The pure decision functions live in [`checks`] and [`reviews`]; the
//! functions here apply them against the store inside the caller's
//! transaction.

mod checks;
mod reviews;

pub use checks::{AggregateStatus, aggregate_status, check_transition, exclude_dependabot};
pub use reviews::{is_notifiable_state, is_recent, review_transition};

use chrono::{DateTime, Utc};
use sea_orm::ConnectionTrait;

use crate::config::SyncConfig;
use crate::entity::notification_kind::NotificationKind;
use crate::entity::{notification, pull_request, pull_request_status, repository, review};
use crate::platform::{RemoteCheckRun, RemoteCheckSuite, RemoteCombinedStatus, RemoteReview};
use crate::store::{self, NewNotification};

/// Check signals fetched for a pull request's head commit.
#[derive(Debug, Clone, Default)]
pub struct CheckSignals {
    pub runs: Vec<RemoteCheckRun>,
    pub suites: Vec<RemoteCheckSuite>,
    pub combined: Option<RemoteCombinedStatus>,
}

/// Result of recording one pull request's checks.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub status: pull_request_status::Model,
    pub notification: Option<notification::Model>,
}

/// Result of recording one review.
#[derive(Debug, Clone)]
pub struct ReviewOutcome {
    pub review: review::Model,
    pub notification: Option<notification::Model>,
}

/// Replace a pull request's checks, snapshot its status and derive the
/// check notification.
///
/// Runs and suites are replaced as a whole; Dependabot's are dropped first.
/// The new snapshot records the one it supersedes and becomes the pull
/// request's current status.
pub async fn record_checks<C: ConnectionTrait>(
    conn: &C,
    repo: &repository::Model,
    pr: &pull_request::Model,
    signals: CheckSignals,
    config: &SyncConfig,
    now: DateTime<Utc>,
) -> store::Result<CheckOutcome> {
    let CheckSignals {
        runs,
        suites,
        combined,
    } = signals;
    let combined = combined.as_ref();
    let (runs, suites) = exclude_dependabot(runs, suites, config.dependabot_app_id);
    store::checks::replace_for_pull_request(conn, pr.id, &runs, &suites).await?;
    if let Some(combined) = combined {
        store::checks::upsert_combined_status(conn, repo.id, combined, now).await?;
    }

    let aggregate = aggregate_status(&runs, &suites, combined);
    let previous = match pr.status_id {
        Some(id) => store::status::find_by_id(conn, id).await?,
        None => None,
    };

    let status =
        store::status::insert(conn, pr.id, pr.status_id, &pr.head_sha, &aggregate, now).await?;
    store::pull_request::set_status(conn, pr.id, status.id).await?;

    let kind = if pr.is_inactive(now, config.check_staleness()) {
        None
    } else {
        check_transition(previous.as_ref(), &pr.head_sha, &aggregate)
    };

    let notification = match kind {
        Some(kind) => {
            tracing::debug!(
                repo = %repo.full_name(),
                number = pr.number,
                kind = %kind,
                "check status changed"
            );
            let new = NewNotification {
                kind,
                repository_full_name: repo.full_name(),
                pull_request_id: Some(pr.id),
                pull_request_number: Some(pr.number),
                user_login: pr.author_login.clone(),
                title: format!("{}#{} {}", repo.full_name(), pr.number, kind),
                description: check_description(&pr.title, &aggregate),
                url: pr.html_url.clone(),
                review_id: None,
                status_id: Some(status.id),
            };
            Some(store::notification::insert(conn, new, now).await?)
        }
        None => None,
    };

    Ok(CheckOutcome {
        status,
        notification,
    })
}

/// Upsert a review and derive its `NewReview` notification.
pub async fn record_review<C: ConnectionTrait>(
    conn: &C,
    repo: &repository::Model,
    pr: &pull_request::Model,
    remote: &RemoteReview,
    config: &SyncConfig,
    now: DateTime<Utc>,
) -> store::Result<ReviewOutcome> {
    let existing = store::review::find_by_platform_id(conn, remote.platform_id).await?;
    let notify = review_transition(
        existing.as_ref().map(|r| r.state.as_str()),
        remote,
        now,
        config.review_staleness(),
    );

    let review = store::review::upsert(conn, pr.id, remote, existing.as_ref(), now).await?;

    let notification = if notify {
        let new = NewNotification {
            kind: NotificationKind::NewReview,
            repository_full_name: repo.full_name(),
            pull_request_id: Some(pr.id),
            pull_request_number: Some(pr.number),
            user_login: pr.author_login.clone(),
            title: format!(
                "{} {} {}#{}",
                review.author_login,
                review_verb(&review.state),
                repo.full_name(),
                pr.number
            ),
            description: pr.title.clone(),
            url: review.html_url.clone(),
            review_id: Some(review.id),
            status_id: None,
        };
        Some(store::notification::insert(conn, new, now).await?)
    } else {
        None
    };

    Ok(ReviewOutcome {
        review,
        notification,
    })
}

fn check_description(title: &str, aggregate: &AggregateStatus) -> String {
    if aggregate.conclusion.is_failed() || !aggregate.commit_state.is_failed() {
        format!("{title} ({})", aggregate.conclusion)
    } else {
        format!("{title} (status {})", aggregate.commit_state)
    }
}

fn review_verb(state: &str) -> &'static str {
    match state.to_ascii_uppercase().as_str() {
        "APPROVED" => "approved",
        "CHANGES_REQUESTED" => "requested changes on",
        "DISMISSED" => "dismissed a review on",
        _ => "reviewed",
    }
}
