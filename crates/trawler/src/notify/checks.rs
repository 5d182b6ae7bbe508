//! Aggregate check status and check-state transitions.

use std::collections::HashSet;

use crate::entity::check_conclusion::CheckConclusion;
use crate::entity::check_run_status::CheckRunStatus;
use crate::entity::commit_state::CommitState;
use crate::entity::notification_kind::NotificationKind;
use crate::entity::pull_request_status;
use crate::entity::status_state::StatusState;
use crate::platform::{RemoteCheckRun, RemoteCheckSuite, RemoteCombinedStatus};

/// Aggregate of every check signal on a pull request's head commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AggregateStatus {
    pub state: StatusState,
    /// Most severe conclusion among runs and suites.
    pub conclusion: CheckConclusion,
    pub commit_state: CommitState,
}

/// Drop Dependabot suites and the runs that belong to them.
///
/// A run belongs to Dependabot when it was reported by the Dependabot app or
/// sits in one of its suites.
pub fn exclude_dependabot(
    runs: Vec<RemoteCheckRun>,
    suites: Vec<RemoteCheckSuite>,
    dependabot_app_id: i64,
) -> (Vec<RemoteCheckRun>, Vec<RemoteCheckSuite>) {
    let (excluded, suites): (Vec<_>, Vec<_>) = suites
        .into_iter()
        .partition(|s| s.app_id == Some(dependabot_app_id));
    let excluded_ids: HashSet<i64> = excluded.iter().map(|s| s.platform_id).collect();

    let runs = runs
        .into_iter()
        .filter(|r| r.app_id != Some(dependabot_app_id))
        .filter(|r| {
            r.check_suite_id
                .is_none_or(|suite_id| !excluded_ids.contains(&suite_id))
        })
        .collect();

    (runs, suites)
}

pub fn aggregate_status(
    runs: &[RemoteCheckRun],
    suites: &[RemoteCheckSuite],
    combined: Option<&RemoteCombinedStatus>,
) -> AggregateStatus {
    let signals = runs
        .iter()
        .map(|r| (r.status.as_str(), r.conclusion.as_deref()))
        .chain(
            suites
                .iter()
                .map(|s| (s.status.as_str(), s.conclusion.as_deref())),
        )
        .map(|(status, conclusion)| {
            (
                CheckRunStatus::from_remote(Some(status)),
                CheckConclusion::from_remote(conclusion),
            )
        })
        .collect::<Vec<_>>();

    let conclusion = signals
        .iter()
        .map(|(_, c)| *c)
        .max_by_key(|c| c.severity())
        .unwrap_or_default();

    let (commit_state, contexts) = combined
        .map(|c| (CommitState::from_remote(&c.state), c.total_count))
        .unwrap_or((CommitState::None, 0));

    let state = if conclusion.is_failed() || commit_state.is_failed() {
        StatusState::Failed
    } else if signals.iter().any(|(status, _)| !status.is_completed())
        || (commit_state == CommitState::Pending && contexts > 0)
    {
        StatusState::Pending
    } else if !signals.is_empty() || contexts > 0 {
        StatusState::Succeeded
    } else {
        StatusState::None
    };

    AggregateStatus {
        state,
        conclusion,
        commit_state,
    }
}

/// Decide whether a new snapshot warrants a check notification.
///
/// Only the previous snapshot and the new one are compared. A changed head
/// SHA is treated like a first sighting.
pub fn check_transition(
    previous: Option<&pull_request_status::Model>,
    head_sha: &str,
    current: &AggregateStatus,
) -> Option<NotificationKind> {
    let previous = previous.filter(|p| p.head_sha == head_sha);

    match current.state {
        StatusState::Failed => {
            let notify = match previous {
                None => true,
                Some(prev) => {
                    prev.state != StatusState::Failed
                        || prev.conclusion != current.conclusion
                        || prev.commit_state != current.commit_state
                }
            };
            notify.then_some(NotificationKind::CheckRunFailed)
        }
        StatusState::Succeeded => {
            let notify = previous.is_none_or(|prev| prev.state != StatusState::Succeeded);
            notify.then_some(NotificationKind::CheckRunSucceeded)
        }
        StatusState::Pending | StatusState::None => None,
    }
}
