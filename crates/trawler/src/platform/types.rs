use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::errors::Result;

/// Pagination passed through to list and search calls.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageOptions {
    /// Items requested per page.
    pub per_page: u32,
    /// Upper bound on pages fetched per call.
    pub max_pages: u32,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            per_page: 50,
            max_pages: 2,
        }
    }
}

impl PageOptions {
    /// A single page of at most `limit` items.
    pub fn first(limit: u32) -> Self {
        Self {
            per_page: limit.max(1),
            max_pages: 1,
        }
    }
}

/// State filter for pull request listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StateFilter {
    #[default]
    Open,
    Closed,
    All,
}

impl StateFilter {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

/// A repository as reported by the remote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRepository {
    pub platform_id: i64,
    pub owner: String,
    pub name: String,
    pub description: Option<String>,
    pub default_branch: String,
    pub is_private: bool,
    pub is_fork: bool,
    pub html_url: String,
    pub updated_at: Option<DateTime<Utc>>,
}

impl RemoteRepository {
    #[inline]
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePullRequest {
    pub platform_id: i64,
    pub number: i64,
    pub title: String,
    pub state: String,
    pub is_draft: bool,
    pub author_login: String,
    pub head_sha: String,
    pub head_ref: String,
    pub base_ref: String,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A pull request returned by a search; only enough to locate it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemotePullRequestHit {
    pub number: i64,
    pub owner: String,
    pub name: String,
    pub author_login: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCheckRun {
    pub platform_id: i64,
    pub name: String,
    pub head_sha: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub app_id: Option<i64>,
    pub check_suite_id: Option<i64>,
    pub html_url: Option<String>,
    pub started_at: Option<DateTime<Utc>>,
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCheckSuite {
    pub platform_id: i64,
    pub head_sha: String,
    pub status: String,
    pub conclusion: Option<String>,
    pub app_id: Option<i64>,
    pub app_name: Option<String>,
}

/// Combined legacy commit status for a SHA.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteCombinedStatus {
    pub sha: String,
    pub state: String,
    pub total_count: i32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteReview {
    pub platform_id: i64,
    pub author_login: String,
    pub state: String,
    pub body: Option<String>,
    pub html_url: String,
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteIssue {
    pub platform_id: i64,
    pub number: i64,
    pub title: String,
    pub state: String,
    pub author_login: String,
    pub labels: Vec<String>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteRelease {
    pub platform_id: i64,
    pub name: String,
    pub tag_name: String,
    pub is_draft: bool,
    pub is_prerelease: bool,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub published_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteUser {
    pub platform_id: i64,
    pub login: String,
    pub avatar_url: Option<String>,
}

/// Client for the remote hosting service, bound to one credential.
///
/// Implementors should:
/// - Follow pagination internally, bounded by the given [`PageOptions`]
/// - Map every failure onto [`RemoteError`](super::RemoteError); the
///   not-found variant drives credential fallback
#[async_trait]
pub trait RemoteClient: Send + Sync {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RemoteRepository>;

    async fn list_pull_requests(
        &self,
        owner: &str,
        name: &str,
        state: StateFilter,
        page: PageOptions,
    ) -> Result<Vec<RemotePullRequest>>;

    async fn list_check_runs(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<RemoteCheckRun>>;

    async fn list_check_suites(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<RemoteCheckSuite>>;

    async fn get_combined_status(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<RemoteCombinedStatus>;

    async fn list_reviews(&self, owner: &str, name: &str, number: i64)
    -> Result<Vec<RemoteReview>>;

    async fn list_issues(
        &self,
        owner: &str,
        name: &str,
        page: PageOptions,
    ) -> Result<Vec<RemoteIssue>>;

    /// Run an issue search; `query` uses the remote search syntax.
    async fn search_issues(&self, query: &str, page: PageOptions) -> Result<Vec<RemoteIssue>>;

    async fn search_pull_requests(
        &self,
        query: &str,
        page: PageOptions,
    ) -> Result<Vec<RemotePullRequestHit>>;

    /// Releases, newest first. Includes drafts when the credential can see them.
    async fn list_releases(
        &self,
        owner: &str,
        name: &str,
        page: PageOptions,
    ) -> Result<Vec<RemoteRelease>>;

    async fn get_current_user(&self) -> Result<RemoteUser>;
}
