//! Shared fixtures for integration tests: an in-memory database and a
//! scripted in-process remote.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sea_orm::DatabaseConnection;
use trawler::platform::{
    Identity, PageOptions, RemoteCheckRun, RemoteCheckSuite, RemoteClient, RemoteCombinedStatus,
    RemoteError, RemoteIssue, RemotePullRequest, RemotePullRequestHit, RemoteRelease,
    RemoteRepository, RemoteReview, RemoteUser, Result, StateFilter, StaticIdentityProvider,
};
use trawler::{Orchestrator, SyncConfig, connect_and_migrate};

/// Create an in-memory SQLite database with migrations applied.
pub async fn setup_test_db() -> DatabaseConnection {
    connect_and_migrate("sqlite::memory:")
        .await
        .expect("Failed to create test database")
}

pub fn orchestrator(db: DatabaseConnection, identities: Vec<Identity>) -> Orchestrator {
    Orchestrator::new(
        db,
        SyncConfig::default(),
        Arc::new(StaticIdentityProvider::new(identities)),
    )
}

pub fn identity(login: &str, remote: &Arc<FakeRemote>) -> Identity {
    Identity::new(login, remote.clone())
}

// ─── Remote fixtures ─────────────────────────────────────────────────────────

pub const SHA: &str = "0123456789abcdef0123456789abcdef01234567";

pub fn remote_repo(platform_id: i64, owner: &str, name: &str) -> RemoteRepository {
    RemoteRepository {
        platform_id,
        owner: owner.to_string(),
        name: name.to_string(),
        description: Some(format!("Test repo {owner}/{name}")),
        default_branch: "main".to_string(),
        is_private: false,
        is_fork: false,
        html_url: format!("https://github.com/{owner}/{name}"),
        updated_at: Some(Utc::now()),
    }
}

/// An open pull request last updated `age` ago.
pub fn remote_pull(
    platform_id: i64,
    number: i64,
    author: &str,
    head_sha: &str,
    age: Duration,
) -> RemotePullRequest {
    let updated_at = Utc::now() - age;
    RemotePullRequest {
        platform_id,
        number,
        title: format!("Pull request {number}"),
        state: "open".to_string(),
        is_draft: false,
        author_login: author.to_string(),
        head_sha: head_sha.to_string(),
        head_ref: format!("feature-{number}"),
        base_ref: "main".to_string(),
        html_url: format!("https://github.com/octo/hello/pull/{number}"),
        created_at: updated_at - Duration::hours(1),
        updated_at,
    }
}

pub fn check_run(platform_id: i64, status: &str, conclusion: Option<&str>) -> RemoteCheckRun {
    RemoteCheckRun {
        platform_id,
        name: format!("check-{platform_id}"),
        head_sha: SHA.to_string(),
        status: status.to_string(),
        conclusion: conclusion.map(str::to_string),
        app_id: Some(15368),
        check_suite_id: None,
        html_url: None,
        started_at: Some(Utc::now()),
        completed_at: None,
    }
}

pub fn check_suite(platform_id: i64, app_id: i64, conclusion: Option<&str>) -> RemoteCheckSuite {
    RemoteCheckSuite {
        platform_id,
        head_sha: SHA.to_string(),
        status: "completed".to_string(),
        conclusion: conclusion.map(str::to_string),
        app_id: Some(app_id),
        app_name: None,
    }
}

pub fn combined(state: &str, total_count: i32) -> RemoteCombinedStatus {
    RemoteCombinedStatus {
        sha: SHA.to_string(),
        state: state.to_string(),
        total_count,
    }
}

pub fn remote_review(platform_id: i64, author: &str, state: &str) -> RemoteReview {
    RemoteReview {
        platform_id,
        author_login: author.to_string(),
        state: state.to_string(),
        body: None,
        html_url: format!("https://github.com/octo/hello/pull/1#pullrequestreview-{platform_id}"),
        submitted_at: Some(Utc::now() - Duration::hours(1)),
    }
}

pub fn remote_issue(platform_id: i64, number: i64, title: &str) -> RemoteIssue {
    RemoteIssue {
        platform_id,
        number,
        title: title.to_string(),
        state: "open".to_string(),
        author_login: "carol".to_string(),
        labels: vec!["bug".to_string()],
        html_url: format!("https://github.com/octo/hello/issues/{number}"),
        created_at: Utc::now() - Duration::days(3),
        updated_at: Utc::now() - Duration::days(1),
    }
}

pub fn remote_release(platform_id: i64, tag: &str, is_draft: bool) -> RemoteRelease {
    RemoteRelease {
        platform_id,
        name: tag.to_string(),
        tag_name: tag.to_string(),
        is_draft,
        is_prerelease: false,
        html_url: format!("https://github.com/octo/hello/releases/{tag}"),
        created_at: Utc::now() - Duration::days(2),
        published_at: (!is_draft).then(Utc::now),
    }
}

pub fn remote_user(platform_id: i64, login: &str) -> RemoteUser {
    RemoteUser {
        platform_id,
        login: login.to_string(),
        avatar_url: None,
    }
}

// ─── Fake remote ─────────────────────────────────────────────────────────────

/// Scripted remote state. Collections are keyed by `owner/name`, check data by
/// SHA and reviews by pull request number.
#[derive(Debug, Default)]
pub struct FakeState {
    pub repositories: HashMap<String, RemoteRepository>,
    pub pulls: HashMap<String, Vec<RemotePullRequest>>,
    pub check_runs: HashMap<String, Vec<RemoteCheckRun>>,
    pub check_suites: HashMap<String, Vec<RemoteCheckSuite>>,
    pub combined: HashMap<String, RemoteCombinedStatus>,
    pub reviews: HashMap<i64, Vec<RemoteReview>>,
    pub issues: HashMap<String, Vec<RemoteIssue>>,
    pub search_results: Vec<RemoteIssue>,
    pub pull_request_hits: Vec<RemotePullRequestHit>,
    pub releases: HashMap<String, Vec<RemoteRelease>>,
    pub user: Option<RemoteUser>,
    /// Errors returned by a method, keyed by method name.
    pub failures: HashMap<&'static str, RemoteError>,
    /// Method names in call order.
    pub calls: Vec<&'static str>,
    /// Queries passed to the search methods.
    pub queries: Vec<String>,
}

#[derive(Debug, Default)]
pub struct FakeRemote {
    state: Mutex<FakeState>,
}

impl FakeRemote {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Mutate the scripted state.
    pub fn with<R>(&self, f: impl FnOnce(&mut FakeState) -> R) -> R {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }

    /// Add a repository together with its pull requests.
    pub fn add_repository(&self, repo: RemoteRepository, pulls: Vec<RemotePullRequest>) {
        self.with(|s| {
            let full_name = repo.full_name();
            s.pulls.insert(full_name.clone(), pulls);
            s.repositories.insert(full_name, repo);
        });
    }

    pub fn fail(&self, method: &'static str, error: RemoteError) {
        self.with(|s| s.failures.insert(method, error));
    }

    pub fn recover(&self, method: &'static str) {
        self.with(|s| s.failures.remove(method));
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.with(|s| s.calls.clone())
    }

    fn enter(&self, method: &'static str) -> Result<std::sync::MutexGuard<'_, FakeState>> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(method);
        match state.failures.get(method) {
            Some(e) => Err(e.clone()),
            None => Ok(state),
        }
    }
}

#[async_trait]
impl RemoteClient for FakeRemote {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RemoteRepository> {
        let state = self.enter("get_repository")?;
        let full_name = format!("{owner}/{name}");
        state
            .repositories
            .get(&full_name)
            .cloned()
            .ok_or_else(|| RemoteError::not_found(full_name))
    }

    async fn list_pull_requests(
        &self,
        owner: &str,
        name: &str,
        _state: StateFilter,
        _page: PageOptions,
    ) -> Result<Vec<RemotePullRequest>> {
        let state = self.enter("list_pull_requests")?;
        Ok(state
            .pulls
            .get(&format!("{owner}/{name}"))
            .cloned()
            .unwrap_or_default())
    }

    async fn list_check_runs(
        &self,
        _owner: &str,
        _name: &str,
        sha: &str,
    ) -> Result<Vec<RemoteCheckRun>> {
        let state = self.enter("list_check_runs")?;
        Ok(state.check_runs.get(sha).cloned().unwrap_or_default())
    }

    async fn list_check_suites(
        &self,
        _owner: &str,
        _name: &str,
        sha: &str,
    ) -> Result<Vec<RemoteCheckSuite>> {
        let state = self.enter("list_check_suites")?;
        Ok(state.check_suites.get(sha).cloned().unwrap_or_default())
    }

    async fn get_combined_status(
        &self,
        _owner: &str,
        _name: &str,
        sha: &str,
    ) -> Result<RemoteCombinedStatus> {
        let state = self.enter("get_combined_status")?;
        Ok(state
            .combined
            .get(sha)
            .cloned()
            .unwrap_or_else(|| RemoteCombinedStatus {
                sha: sha.to_string(),
                state: "pending".to_string(),
                total_count: 0,
            }))
    }

    async fn list_reviews(
        &self,
        _owner: &str,
        _name: &str,
        number: i64,
    ) -> Result<Vec<RemoteReview>> {
        let state = self.enter("list_reviews")?;
        Ok(state.reviews.get(&number).cloned().unwrap_or_default())
    }

    async fn list_issues(
        &self,
        owner: &str,
        name: &str,
        _page: PageOptions,
    ) -> Result<Vec<RemoteIssue>> {
        let state = self.enter("list_issues")?;
        Ok(state
            .issues
            .get(&format!("{owner}/{name}"))
            .cloned()
            .unwrap_or_default())
    }

    async fn search_issues(&self, query: &str, _page: PageOptions) -> Result<Vec<RemoteIssue>> {
        let mut state = self.enter("search_issues")?;
        state.queries.push(query.to_string());
        Ok(state.search_results.clone())
    }

    async fn search_pull_requests(
        &self,
        query: &str,
        _page: PageOptions,
    ) -> Result<Vec<RemotePullRequestHit>> {
        let mut state = self.enter("search_pull_requests")?;
        state.queries.push(query.to_string());
        Ok(state.pull_request_hits.clone())
    }

    async fn list_releases(
        &self,
        owner: &str,
        name: &str,
        _page: PageOptions,
    ) -> Result<Vec<RemoteRelease>> {
        let state = self.enter("list_releases")?;
        Ok(state
            .releases
            .get(&format!("{owner}/{name}"))
            .cloned()
            .unwrap_or_default())
    }

    async fn get_current_user(&self) -> Result<RemoteUser> {
        let state = self.enter("get_current_user")?;
        state
            .user
            .clone()
            .ok_or_else(|| RemoteError::forbidden("no authenticated user"))
    }
}

pub fn ago(duration: Duration) -> DateTime<Utc> {
    Utc::now() - duration
}
