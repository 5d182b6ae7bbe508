//! The sync orchestrator.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};
use tokio::sync::{Mutex, broadcast};
use uuid::Uuid;

use crate::access::{self, Accessed};
use crate::config::SyncConfig;
use crate::entity::{
    developer, issue, notification, pull_request, pull_request_status, release, repository,
};
use crate::platform::{
    Identity, IdentityProvider, PageOptions, RemoteRepository, StateFilter,
};
use crate::prune::{self, ObservedScope};
use crate::store;

use super::errors::{Result, SyncError};
use super::events::{EventBus, SyncEvent, SyncTarget, UpdateKind};
use super::pull_request::update_pull_request;
use super::types::{SyncOptions, SyncResult};

/// Runs transactional sync operations against one cache database.
///
/// Write operations are serialized: at most one transaction is open at a
/// time. Each operation commits everything or nothing, apart from the
/// per pull request steps that are skipped on failure. Dropping an
/// operation's future rolls its transaction back.
pub struct Orchestrator {
    db: DatabaseConnection,
    config: SyncConfig,
    identities: Arc<dyn IdentityProvider>,
    events: EventBus,
    write_lock: Mutex<()>,
}

impl Orchestrator {
    pub fn new(
        db: DatabaseConnection,
        config: SyncConfig,
        identities: Arc<dyn IdentityProvider>,
    ) -> Self {
        if let Err(e) = config.validate() {
            tracing::warn!(error = %e, "sync setting out of range, clamping");
        }
        Self {
            db,
            config,
            identities,
            events: EventBus::default(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn database(&self) -> &DatabaseConnection {
        &self.db
    }

    /// Receive a [`SyncEvent`] after every committed operation.
    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.events.subscribe()
    }

    // ─── Operations ──────────────────────────────────────────────────────────

    /// Refresh a repository with its pull requests, issues and releases.
    #[tracing::instrument(skip_all, fields(owner = %owner, name = %name))]
    pub async fn sync_repository(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
    ) -> Result<SyncResult> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;
        let Accessed { identity, value } = self.resolve(owner, name, options).await?;
        let page = self.page(options);

        let now = Utc::now();
        let txn = self.db.begin().await?;
        let outcome = async {
            let mut result = SyncResult::default();
            let repo = self.upsert_repository(&txn, &value, now, &mut result).await?;
            self.pull_requests_in(&txn, &repo, &identity, options, page, now, &mut result)
                .await?;
            self.issues_in(&txn, &repo, &identity, options, page, now, &mut result)
                .await?;
            self.releases_in(&txn, &repo, &identity, page, now, &mut result)
                .await?;

            let cutoff = now - self.config.observed_window();
            for scope in [
                ObservedScope::PullRequests {
                    repository_id: repo.id,
                },
                ObservedScope::Issues {
                    repository_id: repo.id,
                },
                ObservedScope::Releases {
                    repository_id: repo.id,
                },
            ] {
                result.unobserved_deleted += prune::delete_unobserved(&txn, scope, cutoff).await?;
            }

            Ok::<_, SyncError>((
                result,
                vec![repository_event(
                    &repo,
                    vec![
                        UpdateKind::Repository,
                        UpdateKind::PullRequests,
                        UpdateKind::Issues,
                        UpdateKind::Releases,
                        UpdateKind::Notifications,
                    ],
                )],
            ))
        }
        .await;

        self.complete(txn, outcome, now).await
    }

    /// Refresh a repository's pull requests with their checks and reviews.
    #[tracing::instrument(skip_all, fields(owner = %owner, name = %name))]
    pub async fn sync_pull_requests(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
    ) -> Result<SyncResult> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;
        let Accessed { identity, value } = self.resolve(owner, name, options).await?;
        let page = self.page(options);

        let now = Utc::now();
        let txn = self.db.begin().await?;
        let outcome = async {
            let mut result = SyncResult::default();
            let repo = self.upsert_repository(&txn, &value, now, &mut result).await?;
            self.pull_requests_in(&txn, &repo, &identity, options, page, now, &mut result)
                .await?;

            let scope = ObservedScope::PullRequests {
                repository_id: repo.id,
            };
            result.unobserved_deleted += prune::delete_unobserved(
                &txn,
                scope,
                now - self.config.observed_window(),
            )
            .await?;

            Ok::<_, SyncError>((
                result,
                vec![repository_event(
                    &repo,
                    vec![
                        UpdateKind::Repository,
                        UpdateKind::PullRequests,
                        UpdateKind::Notifications,
                    ],
                )],
            ))
        }
        .await;

        self.complete(txn, outcome, now).await
    }

    /// Refresh a repository's issues, or only those matching `options.search_term`.
    #[tracing::instrument(skip_all, fields(owner = %owner, name = %name))]
    pub async fn sync_issues(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
    ) -> Result<SyncResult> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;
        let Accessed { identity, value } = self.resolve(owner, name, options).await?;
        let page = self.page(options);

        let now = Utc::now();
        let txn = self.db.begin().await?;
        let outcome = async {
            let mut result = SyncResult::default();
            let repo = self.upsert_repository(&txn, &value, now, &mut result).await?;
            self.issues_in(&txn, &repo, &identity, options, page, now, &mut result)
                .await?;

            let scope = ObservedScope::Issues {
                repository_id: repo.id,
            };
            result.unobserved_deleted += prune::delete_unobserved(
                &txn,
                scope,
                now - self.config.observed_window(),
            )
            .await?;

            Ok::<_, SyncError>((
                result,
                vec![repository_event(
                    &repo,
                    vec![UpdateKind::Repository, UpdateKind::Issues],
                )],
            ))
        }
        .await;

        self.complete(txn, outcome, now).await
    }

    /// Refresh every non-draft release on the requested pages.
    #[tracing::instrument(skip_all, fields(owner = %owner, name = %name))]
    pub async fn sync_releases(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
    ) -> Result<SyncResult> {
        let page = self.page(options);
        self.releases_operation(owner, name, options, page).await
    }

    /// Refresh only the most recent non-draft releases.
    #[tracing::instrument(skip_all, fields(owner = %owner, name = %name))]
    pub async fn sync_recent_releases(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
    ) -> Result<SyncResult> {
        let page = PageOptions::first(self.config.recent_release_limit);
        self.releases_operation(owner, name, options, page).await
    }

    /// Refresh the open pull requests authored by each logged-in identity.
    #[tracing::instrument(skip_all)]
    pub async fn sync_my_pull_requests(&self, options: &SyncOptions) -> Result<SyncResult> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;
        let identities = self.identities.logged_in_identities().await?;
        if identities.is_empty() {
            return Err(SyncError::NoIdentities);
        }
        let page = self.page(options);

        let now = Utc::now();
        let txn = self.db.begin().await?;
        let outcome = async {
            let mut result = SyncResult::default();
            let mut events = Vec::with_capacity(identities.len());
            for identity in &identities {
                let login = self
                    .authored_pull_requests_in(&txn, identity, page, now, &mut result)
                    .await?;
                events.push(SyncEvent {
                    target: SyncTarget::Developer { login },
                    kinds: vec![
                        UpdateKind::Developers,
                        UpdateKind::PullRequests,
                        UpdateKind::Notifications,
                    ],
                });
            }
            Ok::<_, SyncError>((result, events))
        }
        .await;

        self.complete(txn, outcome, now).await
    }

    // ─── Read queries ────────────────────────────────────────────────────────

    pub async fn list_repositories(&self) -> Result<Vec<repository::Model>> {
        Ok(store::repository::list_all(&self.db).await?)
    }

    pub async fn get_repository(&self, owner: &str, name: &str) -> Result<Option<repository::Model>> {
        Ok(store::repository::find_by_full_name(&self.db, owner, name).await?)
    }

    /// Cached pull requests of a repository, newest first. Empty if the
    /// repository was never synced.
    pub async fn list_pull_requests(
        &self,
        owner: &str,
        name: &str,
    ) -> Result<Vec<pull_request::Model>> {
        match self.get_repository(owner, name).await? {
            Some(repo) => Ok(store::pull_request::list_by_repository(&self.db, repo.id).await?),
            None => Ok(Vec::new()),
        }
    }

    /// Current status snapshot of a pull request.
    pub async fn pull_request_status(
        &self,
        pr: &pull_request::Model,
    ) -> Result<Option<pull_request_status::Model>> {
        match pr.status_id {
            Some(id) => Ok(store::status::find_by_id(&self.db, id).await?),
            None => Ok(None),
        }
    }

    pub async fn list_issues(&self, owner: &str, name: &str) -> Result<Vec<issue::Model>> {
        match self.get_repository(owner, name).await? {
            Some(repo) => Ok(store::issue::list_by_repository(&self.db, repo.id).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_releases(&self, owner: &str, name: &str) -> Result<Vec<release::Model>> {
        match self.get_repository(owner, name).await? {
            Some(repo) => Ok(store::release::list_by_repository(&self.db, repo.id).await?),
            None => Ok(Vec::new()),
        }
    }

    pub async fn list_developer_users(&self) -> Result<Vec<developer::Model>> {
        Ok(store::developer::list_all(&self.db).await?)
    }

    pub async fn list_notifications(
        &self,
        since: Option<DateTime<Utc>>,
        include_delivered: bool,
    ) -> Result<Vec<notification::Model>> {
        Ok(store::notification::list(&self.db, since, include_delivered).await?)
    }

    /// Mark a notification delivered. Returns `false` if it no longer exists.
    pub async fn mark_notification_toasted(&self, id: Uuid) -> Result<bool> {
        Ok(store::notification::mark_toasted(&self.db, id).await?)
    }

    /// Time of the last successful sync operation.
    pub async fn last_updated(&self) -> Result<Option<DateTime<Utc>>> {
        Ok(store::meta::last_updated(&self.db).await?)
    }

    // ─── Steps ───────────────────────────────────────────────────────────────

    async fn ensure_store(&self) -> Result<()> {
        self.db
            .ping()
            .await
            .map_err(|e| SyncError::StoreUnavailable {
                message: e.to_string(),
            })
    }

    async fn resolve(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
    ) -> Result<Accessed<RemoteRepository>> {
        access::resolve_repository(
            self.identities.as_ref(),
            owner,
            name,
            options.use_public_fallback,
        )
        .await
    }

    fn page(&self, options: &SyncOptions) -> PageOptions {
        options.page.unwrap_or(self.config.page)
    }

    async fn releases_operation(
        &self,
        owner: &str,
        name: &str,
        options: &SyncOptions,
        page: PageOptions,
    ) -> Result<SyncResult> {
        let _guard = self.write_lock.lock().await;
        self.ensure_store().await?;
        let Accessed { identity, value } = self.resolve(owner, name, options).await?;

        let now = Utc::now();
        let txn = self.db.begin().await?;
        let outcome = async {
            let mut result = SyncResult::default();
            let repo = self.upsert_repository(&txn, &value, now, &mut result).await?;
            self.releases_in(&txn, &repo, &identity, page, now, &mut result)
                .await?;

            let scope = ObservedScope::Releases {
                repository_id: repo.id,
            };
            result.unobserved_deleted += prune::delete_unobserved(
                &txn,
                scope,
                now - self.config.observed_window(),
            )
            .await?;

            Ok::<_, SyncError>((
                result,
                vec![repository_event(
                    &repo,
                    vec![UpdateKind::Repository, UpdateKind::Releases],
                )],
            ))
        }
        .await;

        self.complete(txn, outcome, now).await
    }

    async fn upsert_repository(
        &self,
        txn: &DatabaseTransaction,
        remote: &RemoteRepository,
        now: DateTime<Utc>,
        result: &mut SyncResult,
    ) -> Result<repository::Model> {
        let repo = store::repository::upsert(txn, remote, now).await?;
        result.repositories += 1;
        Ok(repo)
    }

    #[allow(clippy::too_many_arguments)]
    async fn pull_requests_in(
        &self,
        txn: &DatabaseTransaction,
        repo: &repository::Model,
        identity: &Identity,
        options: &SyncOptions,
        page: PageOptions,
        now: DateTime<Utc>,
        result: &mut SyncResult,
    ) -> Result<()> {
        let pulls = identity
            .client
            .list_pull_requests(&repo.owner, &repo.name, options.pull_request_state, page)
            .await?;
        tracing::debug!(repo = %repo.full_name(), count = pulls.len(), "fetched pull requests");

        for remote in &pulls {
            update_pull_request(
                txn,
                &self.config,
                repo,
                identity.client.as_ref(),
                remote,
                now,
                result,
            )
            .await?;
        }
        Ok(())
    }

    #[allow(clippy::too_many_arguments)]
    async fn issues_in(
        &self,
        txn: &DatabaseTransaction,
        repo: &repository::Model,
        identity: &Identity,
        options: &SyncOptions,
        page: PageOptions,
        now: DateTime<Utc>,
        result: &mut SyncResult,
    ) -> Result<()> {
        let term = options
            .search_term
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty());

        let Some(term) = term else {
            let issues = identity
                .client
                .list_issues(&repo.owner, &repo.name, page)
                .await?;
            for remote in &issues {
                store::issue::upsert(txn, repo.id, remote, now).await?;
                result.issues += 1;
            }
            return Ok(());
        };

        let query = format!("repo:{} is:issue {term}", repo.full_name());
        let issues = identity.client.search_issues(&query, page).await?;

        let search = store::search::upsert(txn, repo.id, term, now).await?;
        for remote in &issues {
            let issue = store::issue::upsert(txn, repo.id, remote, now).await?;
            store::search::link_issue(txn, search.id, issue.id, now).await?;
            result.issues += 1;
        }
        let unlinked =
            store::search::unlink_stale(txn, search.id, now - self.config.search_link_window())
                .await?;
        tracing::debug!(
            repo = %repo.full_name(),
            term,
            found = issues.len(),
            unlinked,
            "refreshed issue search"
        );
        Ok(())
    }

    async fn releases_in(
        &self,
        txn: &DatabaseTransaction,
        repo: &repository::Model,
        identity: &Identity,
        page: PageOptions,
        now: DateTime<Utc>,
        result: &mut SyncResult,
    ) -> Result<()> {
        let releases = identity
            .client
            .list_releases(&repo.owner, &repo.name, page)
            .await?;

        for remote in releases.iter().filter(|r| !r.is_draft) {
            store::release::upsert(txn, repo.id, remote, now).await?;
            result.releases += 1;
        }
        Ok(())
    }

    /// Record the identity as a developer and refresh the open pull requests
    /// they authored. Returns the identity's login.
    async fn authored_pull_requests_in(
        &self,
        txn: &DatabaseTransaction,
        identity: &Identity,
        page: PageOptions,
        now: DateTime<Utc>,
        result: &mut SyncResult,
    ) -> Result<String> {
        let client = identity.client.as_ref();
        let user = client.get_current_user().await?;
        store::developer::upsert(txn, &user, now).await?;

        let query = format!("is:pr is:open author:{}", user.login);
        let hits = client.search_pull_requests(&query, page).await?;
        let mut repositories: BTreeMap<(String, String), BTreeSet<i64>> = BTreeMap::new();
        for hit in hits {
            repositories
                .entry((hit.owner, hit.name))
                .or_default()
                .insert(hit.number);
        }
        tracing::debug!(
            login = %user.login,
            repositories = repositories.len(),
            "found authored pull requests"
        );

        for ((owner, name), numbers) in &repositories {
            let remote = match client.get_repository(owner, name).await {
                Ok(remote) => remote,
                Err(e) if e.is_forbidden() || e.is_not_found() => {
                    tracing::warn!(
                        repo = %format!("{owner}/{name}"),
                        login = %user.login,
                        error = %e,
                        "skipping inaccessible repository"
                    );
                    result.errors.push(format!("{owner}/{name}: {e}"));
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let repo = self.upsert_repository(txn, &remote, now, result).await?;
            let pulls = match client
                .list_pull_requests(owner, name, StateFilter::Open, page)
                .await
            {
                Ok(pulls) => pulls,
                Err(e) if e.is_forbidden() || e.is_not_found() => {
                    tracing::warn!(
                        repo = %repo.full_name(),
                        login = %user.login,
                        error = %e,
                        "skipping repository whose pull requests are inaccessible"
                    );
                    result.errors.push(format!("{}: {e}", repo.full_name()));
                    store::pull_request::mark_observed(txn, repo.id, numbers.iter().copied(), now)
                        .await?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };

            let mut listed = BTreeSet::new();
            for pr in pulls
                .iter()
                .filter(|pr| pr.author_login.eq_ignore_ascii_case(&user.login))
            {
                listed.insert(pr.number);
                update_pull_request(txn, &self.config, &repo, client, pr, now, result).await?;
            }

            // Search hits beyond the listed pages are still open; keep their rows.
            let unlisted: Vec<i64> = numbers.difference(&listed).copied().collect();
            if !unlisted.is_empty() {
                tracing::debug!(
                    repo = %repo.full_name(),
                    unlisted = unlisted.len(),
                    "authored pull requests outside the listed pages"
                );
                store::pull_request::mark_observed(txn, repo.id, unlisted, now).await?;
            }
        }

        let scope = ObservedScope::AuthoredPullRequests { login: &user.login };
        result.unobserved_deleted +=
            prune::delete_unobserved(txn, scope, now - self.config.observed_window()).await?;

        Ok(user.login)
    }

    async fn finalize(
        &self,
        txn: &DatabaseTransaction,
        result: &mut SyncResult,
        now: DateTime<Utc>,
    ) -> Result<()> {
        let stats = prune::prune(txn, &self.config, now).await?;
        result.pruned = stats.total();
        store::meta::set_last_updated(txn, now).await?;
        Ok(())
    }

    /// Prune, stamp and commit a successful operation, then publish its
    /// events; roll back a failed one and return its error unchanged.
    async fn complete(
        &self,
        txn: DatabaseTransaction,
        outcome: Result<(SyncResult, Vec<SyncEvent>)>,
        now: DateTime<Utc>,
    ) -> Result<SyncResult> {
        let finalized = match outcome {
            Ok((mut result, events)) => self
                .finalize(&txn, &mut result, now)
                .await
                .map(|()| (result, events)),
            Err(e) => Err(e),
        };

        let (result, events) = match finalized {
            Ok(done) => done,
            Err(e) => {
                tracing::warn!(error = %e, "sync failed, rolling back");
                if let Err(rollback) = txn.rollback().await {
                    tracing::warn!(error = %rollback, "rollback failed");
                }
                return Err(e);
            }
        };

        txn.commit().await?;

        tracing::info!(
            repositories = result.repositories,
            pull_requests = result.pull_requests,
            issues = result.issues,
            releases = result.releases,
            notifications = result.notifications,
            pruned = result.pruned,
            skipped = result.errors.len(),
            "sync committed"
        );
        for event in events {
            self.events.publish(event);
        }
        Ok(result)
    }
}

fn repository_event(repo: &repository::Model, kinds: Vec<UpdateKind>) -> SyncEvent {
    SyncEvent {
        target: SyncTarget::Repository {
            owner: repo.owner.clone(),
            name: repo.name.clone(),
        },
        kinds,
    }
}
