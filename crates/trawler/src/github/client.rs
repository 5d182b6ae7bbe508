//! GitHub REST client implementing [`RemoteClient`].

use std::sync::Arc;

use async_trait::async_trait;
use octocrab::Octocrab;
use serde::Serialize;
use serde::de::DeserializeOwned;

use super::convert::{
    to_remote_check_run, to_remote_check_suite, to_remote_combined_status, to_remote_issue,
    to_remote_pull_request, to_remote_pull_request_hit, to_remote_release, to_remote_repository,
    to_remote_review, to_remote_user,
};
use super::error::map_octocrab_error;
use super::types::{
    GhCheckRuns, GhCheckSuites, GhCombinedStatus, GhIssue, GhPullRequest, GhRelease,
    GhRepository, GhReview, GhSearchResults, GhUser,
};
use crate::platform::{
    PageOptions, RemoteCheckRun, RemoteCheckSuite, RemoteClient, RemoteCombinedStatus,
    RemoteError, RemoteIssue, RemotePullRequest, RemotePullRequestHit, RemoteRelease,
    RemoteRepository, RemoteReview, RemoteUser, Result, StateFilter,
};
use crate::retry::{RetryConfig, with_retry};

/// GitHub caps `per_page` at 100 on every list endpoint.
const MAX_PER_PAGE: u32 = 100;

/// Pagination for per-commit and per-PR listings, which have no caller-supplied bound.
const DETAIL_PAGES: PageOptions = PageOptions {
    per_page: MAX_PER_PAGE,
    max_pages: 3,
};

/// Create an authenticated Octocrab instance from a GitHub token.
pub fn create_client(token: &str) -> Result<Octocrab> {
    Octocrab::builder()
        .personal_token(token.to_string())
        .build()
        .map_err(|e| RemoteError::api(format!("failed to build GitHub client: {e}")))
}

/// Create an Octocrab instance without credentials (public data, low rate limit).
pub fn create_anonymous_client() -> Result<Octocrab> {
    Octocrab::builder()
        .build()
        .map_err(|e| RemoteError::api(format!("failed to build GitHub client: {e}")))
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
struct Params<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    q: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    state: Option<&'a str>,
    per_page: u32,
    page: u32,
}

/// GitHub client bound to one credential.
#[derive(Clone)]
pub struct GitHubClient {
    inner: Arc<Octocrab>,
    retry: RetryConfig,
}

impl GitHubClient {
    /// Create a new GitHub client from an authentication token.
    pub fn new(token: &str) -> Result<Self> {
        Ok(Self::from_octocrab(create_client(token)?))
    }

    /// Create a client without credentials.
    pub fn anonymous() -> Result<Self> {
        Ok(Self::from_octocrab(create_anonymous_client()?))
    }

    /// Create a GitHub client from an existing Octocrab instance.
    pub fn from_octocrab(client: Octocrab) -> Self {
        Self {
            inner: Arc::new(client),
            retry: RetryConfig::default(),
        }
    }

    #[must_use]
    pub fn with_retry_config(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    /// Get a reference to the inner Octocrab client.
    pub fn inner(&self) -> &Octocrab {
        &self.inner
    }

    async fn get<R, P>(&self, route: &str, params: Option<&P>) -> Result<R>
    where
        R: DeserializeOwned + Send,
        P: Serialize + Sync + ?Sized,
    {
        with_retry(
            || async move {
                self.inner
                    .get::<R, _, P>(route, params)
                    .await
                    .map_err(|e| map_octocrab_error(e, route))
            },
            &self.retry,
            route,
        )
        .await
    }

    /// Fetch pages until one comes back short or `page.max_pages` is reached.
    async fn collect_pages<R, T, F>(
        &self,
        route: &str,
        params: Params<'_>,
        page: PageOptions,
        items: F,
    ) -> Result<Vec<T>>
    where
        R: DeserializeOwned + Send,
        T: Send,
        F: Fn(R) -> Vec<T> + Send + Sync,
    {
        let per_page = page.per_page.clamp(1, MAX_PER_PAGE);
        let mut all = Vec::new();

        for number in 1..=page.max_pages.max(1) {
            let params = Params {
                per_page,
                page: number,
                ..params
            };
            let batch = items(self.get::<R, _>(route, Some(&params)).await?);
            let short = batch.len() < per_page as usize;
            all.extend(batch);
            if short {
                break;
            }
        }

        tracing::trace!(route, count = all.len(), "fetched paginated listing");
        Ok(all)
    }

    async fn search(&self, query: &str, page: PageOptions) -> Result<Vec<GhIssue>> {
        let params = Params {
            q: Some(query),
            ..Params::default()
        };
        self.collect_pages(
            "/search/issues",
            params,
            page,
            |results: GhSearchResults<GhIssue>| results.items,
        )
        .await
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RemoteClient for GitHubClient {
    async fn get_repository(&self, owner: &str, name: &str) -> Result<RemoteRepository> {
        let route = format!("/repos/{owner}/{name}");
        let repo: GhRepository = self.get(&route, None::<&()>).await?;
        Ok(to_remote_repository(repo))
    }

    async fn list_pull_requests(
        &self,
        owner: &str,
        name: &str,
        state: StateFilter,
        page: PageOptions,
    ) -> Result<Vec<RemotePullRequest>> {
        let route = format!("/repos/{owner}/{name}/pulls");
        let params = Params {
            state: Some(state.as_str()),
            ..Params::default()
        };
        let prs = self
            .collect_pages(&route, params, page, |prs: Vec<GhPullRequest>| prs)
            .await?;
        Ok(prs.into_iter().map(to_remote_pull_request).collect())
    }

    async fn list_check_runs(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<RemoteCheckRun>> {
        let route = format!("/repos/{owner}/{name}/commits/{sha}/check-runs");
        let runs = self
            .collect_pages(&route, Params::default(), DETAIL_PAGES, |r: GhCheckRuns| {
                r.check_runs
            })
            .await?;
        Ok(runs.into_iter().map(to_remote_check_run).collect())
    }

    async fn list_check_suites(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<Vec<RemoteCheckSuite>> {
        let route = format!("/repos/{owner}/{name}/commits/{sha}/check-suites");
        let suites = self
            .collect_pages(&route, Params::default(), DETAIL_PAGES, |s: GhCheckSuites| {
                s.check_suites
            })
            .await?;
        Ok(suites.into_iter().map(to_remote_check_suite).collect())
    }

    async fn get_combined_status(
        &self,
        owner: &str,
        name: &str,
        sha: &str,
    ) -> Result<RemoteCombinedStatus> {
        let route = format!("/repos/{owner}/{name}/commits/{sha}/status");
        let status: GhCombinedStatus = self.get(&route, None::<&()>).await?;
        Ok(to_remote_combined_status(status))
    }

    async fn list_reviews(
        &self,
        owner: &str,
        name: &str,
        number: i64,
    ) -> Result<Vec<RemoteReview>> {
        let route = format!("/repos/{owner}/{name}/pulls/{number}/reviews");
        let reviews = self
            .collect_pages(&route, Params::default(), DETAIL_PAGES, |r: Vec<GhReview>| r)
            .await?;
        Ok(reviews.into_iter().map(to_remote_review).collect())
    }

    async fn list_issues(
        &self,
        owner: &str,
        name: &str,
        page: PageOptions,
    ) -> Result<Vec<RemoteIssue>> {
        let route = format!("/repos/{owner}/{name}/issues");
        let params = Params {
            state: Some("open"),
            ..Params::default()
        };
        // The issues endpoint also returns pull requests; filter after paging
        // so a page of mostly PRs does not look like the last page.
        let issues = self
            .collect_pages(&route, params, page, |i: Vec<GhIssue>| i)
            .await?;
        Ok(issues
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .map(to_remote_issue)
            .collect())
    }

    async fn search_issues(&self, query: &str, page: PageOptions) -> Result<Vec<RemoteIssue>> {
        let hits = self.search(query, page).await?;
        Ok(hits
            .into_iter()
            .filter(|issue| !issue.is_pull_request())
            .map(to_remote_issue)
            .collect())
    }

    async fn search_pull_requests(
        &self,
        query: &str,
        page: PageOptions,
    ) -> Result<Vec<RemotePullRequestHit>> {
        let hits = self.search(query, page).await?;
        Ok(hits
            .into_iter()
            .filter(GhIssue::is_pull_request)
            .filter_map(to_remote_pull_request_hit)
            .collect())
    }

    async fn list_releases(
        &self,
        owner: &str,
        name: &str,
        page: PageOptions,
    ) -> Result<Vec<RemoteRelease>> {
        let route = format!("/repos/{owner}/{name}/releases");
        let releases = self
            .collect_pages(&route, Params::default(), page, |r: Vec<GhRelease>| r)
            .await?;
        Ok(releases.into_iter().map(to_remote_release).collect())
    }

    async fn get_current_user(&self) -> Result<RemoteUser> {
        let user: GhUser = self.get("/user", None::<&()>).await?;
        Ok(to_remote_user(user))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_serialization() {
        let params = Params {
            q: Some("repo:octo/hello is:issue"),
            per_page: 50,
            page: 2,
            ..Params::default()
        };
        let value = serde_json::to_value(params).unwrap();
        assert_eq!(value["q"], "repo:octo/hello is:issue");
        assert_eq!(value["per_page"], 50);
        assert_eq!(value["page"], 2);
        assert!(value.get("state").is_none());
    }

    #[test]
    fn test_detail_pages_within_github_cap() {
        assert!(DETAIL_PAGES.per_page <= MAX_PER_PAGE);
    }

    #[tokio::test]
    async fn test_with_retry_config_replaces_default() {
        let retry = RetryConfig::new(
            std::time::Duration::from_millis(1),
            std::time::Duration::from_millis(5),
            1,
        );
        let client = GitHubClient::anonymous()
            .expect("anonymous client")
            .with_retry_config(retry);
        assert_eq!(client.retry.max_retries, 1);
        assert_eq!(client.retry.max_delay.as_millis(), 5);
    }
}
