//! Wire shapes of the GitHub REST responses the client reads.
//!
//! Only the fields the cache stores are modelled; everything else in the
//! payload is ignored by serde.

use chrono::{DateTime, Utc};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GhUser {
    pub id: i64,
    pub login: String,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhRepository {
    pub id: i64,
    pub name: String,
    pub owner: GhUser,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub default_branch: Option<String>,
    #[serde(default)]
    pub private: bool,
    #[serde(default)]
    pub fork: bool,
    pub html_url: String,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhRef {
    pub sha: String,
    #[serde(rename = "ref")]
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhPullRequest {
    pub id: i64,
    pub number: i64,
    #[serde(default)]
    pub title: Option<String>,
    pub state: String,
    #[serde(default)]
    pub draft: Option<bool>,
    #[serde(default)]
    pub user: Option<GhUser>,
    pub head: GhRef,
    pub base: GhRef,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhApp {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhId {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhCheckRun {
    pub id: i64,
    pub name: String,
    pub head_sha: String,
    pub status: String,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub app: Option<GhApp>,
    #[serde(default)]
    pub check_suite: Option<GhId>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhCheckRuns {
    pub check_runs: Vec<GhCheckRun>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhCheckSuite {
    pub id: i64,
    pub head_sha: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
    #[serde(default)]
    pub app: Option<GhApp>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhCheckSuites {
    pub check_suites: Vec<GhCheckSuite>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhCombinedStatus {
    pub state: String,
    pub sha: String,
    #[serde(default)]
    pub total_count: i32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhReview {
    pub id: i64,
    #[serde(default)]
    pub user: Option<GhUser>,
    pub state: String,
    #[serde(default)]
    pub body: Option<String>,
    pub html_url: String,
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhLabel {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhIssue {
    pub id: i64,
    pub number: i64,
    pub title: String,
    pub state: String,
    #[serde(default)]
    pub user: Option<GhUser>,
    #[serde(default)]
    pub labels: Vec<GhLabel>,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Present when the issue is a pull request.
    #[serde(default)]
    pub pull_request: Option<serde_json::Value>,
    #[serde(default)]
    pub repository_url: Option<String>,
}

impl GhIssue {
    pub fn is_pull_request(&self) -> bool {
        self.pull_request.is_some()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhSearchResults<T> {
    #[serde(default)]
    pub total_count: i64,
    pub items: Vec<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GhRelease {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
    #[serde(default)]
    pub draft: bool,
    #[serde(default)]
    pub prerelease: bool,
    pub html_url: String,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}
