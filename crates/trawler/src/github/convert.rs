//! Conversion from GitHub wire types to the platform types.

use crate::platform::{
    RemoteCheckRun, RemoteCheckSuite, RemoteCombinedStatus, RemoteIssue, RemotePullRequest,
    RemotePullRequestHit, RemoteRelease, RemoteRepository, RemoteReview, RemoteUser,
};

use super::types::{
    GhCheckRun, GhCheckSuite, GhCombinedStatus, GhIssue, GhPullRequest, GhRelease, GhRepository,
    GhReview, GhUser,
};

/// Login recorded when GitHub omits the user (deleted accounts).
const GHOST_LOGIN: &str = "ghost";

fn login_of(user: Option<GhUser>) -> String {
    user.map_or_else(|| GHOST_LOGIN.to_string(), |u| u.login)
}

/// Split `https://api.github.com/repos/{owner}/{name}` into owner and name.
pub fn parse_repository_url(url: &str) -> Option<(String, String)> {
    let mut segments = url.trim_end_matches('/').rsplit('/');
    let name = segments.next()?;
    let owner = segments.next()?;
    if segments.next() != Some("repos") || owner.is_empty() || name.is_empty() {
        return None;
    }
    Some((owner.to_string(), name.to_string()))
}

pub fn to_remote_repository(repo: GhRepository) -> RemoteRepository {
    RemoteRepository {
        platform_id: repo.id,
        owner: repo.owner.login,
        name: repo.name,
        description: repo.description,
        default_branch: repo.default_branch.unwrap_or_else(|| "main".to_string()),
        is_private: repo.private,
        is_fork: repo.fork,
        html_url: repo.html_url,
        updated_at: repo.updated_at,
    }
}

pub fn to_remote_pull_request(pr: GhPullRequest) -> RemotePullRequest {
    RemotePullRequest {
        platform_id: pr.id,
        number: pr.number,
        title: pr.title.unwrap_or_default(),
        state: pr.state,
        is_draft: pr.draft.unwrap_or(false),
        author_login: login_of(pr.user),
        head_sha: pr.head.sha,
        head_ref: pr.head.name,
        base_ref: pr.base.name,
        html_url: pr.html_url,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
    }
}

pub fn to_remote_check_run(run: GhCheckRun) -> RemoteCheckRun {
    RemoteCheckRun {
        platform_id: run.id,
        name: run.name,
        head_sha: run.head_sha,
        status: run.status,
        conclusion: run.conclusion,
        app_id: run.app.map(|app| app.id),
        check_suite_id: run.check_suite.map(|suite| suite.id),
        html_url: run.html_url,
        started_at: run.started_at,
        completed_at: run.completed_at,
    }
}

pub fn to_remote_check_suite(suite: GhCheckSuite) -> RemoteCheckSuite {
    let (app_id, app_name) = suite
        .app
        .map_or((None, None), |app| (Some(app.id), app.name));
    RemoteCheckSuite {
        platform_id: suite.id,
        head_sha: suite.head_sha,
        status: suite.status.unwrap_or_else(|| "queued".to_string()),
        conclusion: suite.conclusion,
        app_id,
        app_name,
    }
}

pub fn to_remote_combined_status(status: GhCombinedStatus) -> RemoteCombinedStatus {
    RemoteCombinedStatus {
        sha: status.sha,
        state: status.state,
        total_count: status.total_count,
    }
}

pub fn to_remote_review(review: GhReview) -> RemoteReview {
    RemoteReview {
        platform_id: review.id,
        author_login: login_of(review.user),
        state: review.state,
        body: review.body.filter(|body| !body.is_empty()),
        html_url: review.html_url,
        submitted_at: review.submitted_at,
    }
}

pub fn to_remote_issue(issue: GhIssue) -> RemoteIssue {
    RemoteIssue {
        platform_id: issue.id,
        number: issue.number,
        title: issue.title,
        state: issue.state,
        author_login: login_of(issue.user),
        labels: issue.labels.into_iter().map(|label| label.name).collect(),
        html_url: issue.html_url,
        created_at: issue.created_at,
        updated_at: issue.updated_at,
    }
}

/// Search hits without a parseable repository URL are dropped.
pub fn to_remote_pull_request_hit(issue: GhIssue) -> Option<RemotePullRequestHit> {
    let (owner, name) = parse_repository_url(issue.repository_url.as_deref()?)?;
    Some(RemotePullRequestHit {
        number: issue.number,
        owner,
        name,
        author_login: login_of(issue.user),
    })
}

pub fn to_remote_release(release: GhRelease) -> RemoteRelease {
    RemoteRelease {
        platform_id: release.id,
        name: release
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| release.tag_name.clone()),
        tag_name: release.tag_name,
        is_draft: release.draft,
        is_prerelease: release.prerelease,
        html_url: release.html_url,
        created_at: release.created_at,
        published_at: release.published_at,
    }
}

pub fn to_remote_user(user: GhUser) -> RemoteUser {
    RemoteUser {
        platform_id: user.id,
        login: user.login,
        avatar_url: user.avatar_url,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::types::{GhCheckRuns, GhSearchResults};
    use super::*;

    #[test]
    fn test_parse_repository_url() {
        assert_eq!(
            parse_repository_url("https://api.github.com/repos/octo/hello"),
            Some(("octo".to_string(), "hello".to_string()))
        );
        assert_eq!(parse_repository_url("https://api.github.com/users/octo"), None);
        assert_eq!(parse_repository_url("hello"), None);
    }

    #[test]
    fn test_repository_conversion() {
        let repo: GhRepository = serde_json::from_value(json!({
            "id": 7,
            "name": "hello",
            "owner": { "id": 1, "login": "octo" },
            "description": null,
            "default_branch": "trunk",
            "private": true,
            "fork": false,
            "html_url": "https://github.com/octo/hello",
            "updated_at": "2025-03-01T12:00:00Z"
        }))
        .unwrap();

        let remote = to_remote_repository(repo);
        assert_eq!(remote.platform_id, 7);
        assert_eq!(remote.full_name(), "octo/hello");
        assert_eq!(remote.default_branch, "trunk");
        assert!(remote.is_private);
        assert!(remote.updated_at.is_some());
    }

    #[test]
    fn test_pull_request_conversion() {
        let pr: GhPullRequest = serde_json::from_value(json!({
            "id": 100,
            "number": 5,
            "title": "Fix things",
            "state": "open",
            "draft": true,
            "user": { "id": 2, "login": "alice" },
            "head": { "sha": "abc123", "ref": "fix" },
            "base": { "sha": "def456", "ref": "main" },
            "html_url": "https://github.com/octo/hello/pull/5",
            "created_at": "2025-03-01T12:00:00Z",
            "updated_at": "2025-03-02T12:00:00Z"
        }))
        .unwrap();

        let remote = to_remote_pull_request(pr);
        assert_eq!(remote.number, 5);
        assert!(remote.is_draft);
        assert_eq!(remote.author_login, "alice");
        assert_eq!(remote.head_sha, "abc123");
        assert_eq!(remote.head_ref, "fix");
        assert_eq!(remote.base_ref, "main");
    }

    #[test]
    fn test_check_run_conversion_keeps_app_and_suite() {
        let runs: GhCheckRuns = serde_json::from_value(json!({
            "total_count": 1,
            "check_runs": [{
                "id": 9,
                "name": "build",
                "head_sha": "abc123",
                "status": "completed",
                "conclusion": "failure",
                "app": { "id": 29110, "name": "Dependabot" },
                "check_suite": { "id": 44 },
                "html_url": null,
                "started_at": "2025-03-01T12:00:00Z",
                "completed_at": null
            }]
        }))
        .unwrap();

        let run = to_remote_check_run(runs.check_runs.into_iter().next().unwrap());
        assert_eq!(run.app_id, Some(29110));
        assert_eq!(run.check_suite_id, Some(44));
        assert_eq!(run.conclusion.as_deref(), Some("failure"));
        assert!(run.completed_at.is_none());
    }

    #[test]
    fn test_review_without_user_is_ghost() {
        let review: GhReview = serde_json::from_value(json!({
            "id": 3,
            "user": null,
            "state": "APPROVED",
            "body": "",
            "html_url": "https://github.com/octo/hello/pull/5#pullrequestreview-3",
            "submitted_at": "2025-03-01T12:00:00Z"
        }))
        .unwrap();

        let remote = to_remote_review(review);
        assert_eq!(remote.author_login, "ghost");
        assert_eq!(remote.body, None);
    }

    #[test]
    fn test_search_hits() {
        let results: GhSearchResults<GhIssue> = serde_json::from_value(json!({
            "total_count": 2,
            "items": [
                {
                    "id": 1, "number": 12, "title": "A", "state": "open",
                    "user": { "id": 2, "login": "alice" },
                    "labels": [{ "name": "bug" }],
                    "html_url": "https://github.com/octo/hello/pull/12",
                    "created_at": "2025-03-01T12:00:00Z",
                    "updated_at": "2025-03-01T12:00:00Z",
                    "pull_request": { "url": "x" },
                    "repository_url": "https://api.github.com/repos/octo/hello"
                },
                {
                    "id": 2, "number": 13, "title": "B", "state": "open",
                    "html_url": "https://github.com/octo/hello/pull/13",
                    "created_at": "2025-03-01T12:00:00Z",
                    "updated_at": "2025-03-01T12:00:00Z"
                }
            ]
        }))
        .unwrap();

        let hits: Vec<_> = results
            .items
            .into_iter()
            .filter_map(to_remote_pull_request_hit)
            .collect();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].owner, "octo");
        assert_eq!(hits[0].number, 12);
    }

    #[test]
    fn test_issue_labels_and_release_name_fallback() {
        let issue: GhIssue = serde_json::from_value(json!({
            "id": 1, "number": 2, "title": "Crash", "state": "open",
            "user": { "id": 2, "login": "bob" },
            "labels": [{ "name": "bug" }, { "name": "p1" }],
            "html_url": "https://github.com/octo/hello/issues/2",
            "created_at": "2025-03-01T12:00:00Z",
            "updated_at": "2025-03-01T12:00:00Z"
        }))
        .unwrap();
        assert!(!issue.is_pull_request());
        assert_eq!(to_remote_issue(issue).labels, vec!["bug", "p1"]);

        let release: GhRelease = serde_json::from_value(json!({
            "id": 5, "name": "", "tag_name": "v1.0.0",
            "draft": false, "prerelease": true,
            "html_url": "https://github.com/octo/hello/releases/v1.0.0",
            "created_at": "2025-03-01T12:00:00Z",
            "published_at": null
        }))
        .unwrap();
        let release = to_remote_release(release);
        assert_eq!(release.name, "v1.0.0");
        assert!(release.is_prerelease);
    }
}
