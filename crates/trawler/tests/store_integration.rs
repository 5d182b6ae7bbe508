//! Integration tests for the cache store and retention pruning.
//!
//! These tests require the `sqlite` and `migrate` features to be enabled
//! and use an in-memory SQLite database.

#![cfg(all(feature = "sqlite", feature = "migrate"))]

mod common;

use chrono::{Duration, Utc};
use sea_orm::{EntityTrait, PaginatorTrait};
use trawler::notify::AggregateStatus;
use trawler::prune::{self, ObservedScope};
use trawler::store::{self, NewNotification, StoreError};
use trawler::{
    NotificationKind, PullRequest, PullRequestStatus, Release, Repository, SyncConfig,
};

use common::*;

fn notification(login: &str) -> NewNotification {
    NewNotification {
        kind: NotificationKind::NewReview,
        repository_full_name: "octo/hello".to_string(),
        pull_request_id: None,
        pull_request_number: Some(1),
        user_login: login.to_string(),
        title: "alice approved octo/hello#1".to_string(),
        description: "Pull request 1".to_string(),
        url: "https://github.com/octo/hello/pull/1".to_string(),
        review_id: None,
        status_id: None,
    }
}

// ─── Upserts ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_repository_upsert_is_idempotent() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let remote = remote_repo(1, "octo", "hello");

    let first = store::repository::upsert(&db, &remote, now).await.unwrap();
    let second = store::repository::upsert(&db, &remote, now).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(Repository::find().count(&db).await.unwrap(), 1);

    let found = store::repository::find_by_full_name(&db, "octo", "hello")
        .await
        .unwrap()
        .expect("repository cached");
    assert_eq!(found.platform_id, 1);

    let by_id = store::repository::find_by_id(&db, first.id).await.unwrap();
    assert_eq!(by_id.map(|r| r.full_name()), Some("octo/hello".to_string()));
}

#[tokio::test]
async fn test_pull_request_upsert_updates_in_place_and_keeps_status() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();

    let mut remote = remote_pull(10, 1, "alice", SHA, Duration::hours(1));
    let pr = store::pull_request::upsert(&db, repo.id, &remote, now)
        .await
        .unwrap();
    let status = store::status::insert(&db, pr.id, None, SHA, &AggregateStatus::default(), now)
        .await
        .unwrap();
    store::pull_request::set_status(&db, pr.id, status.id)
        .await
        .unwrap();

    remote.title = "Renamed".to_string();
    let updated = store::pull_request::upsert(&db, repo.id, &remote, now)
        .await
        .unwrap();

    assert_eq!(updated.id, pr.id);
    assert_eq!(updated.title, "Renamed");
    assert_eq!(updated.status_id, Some(status.id));
    assert_eq!(PullRequest::find().count(&db).await.unwrap(), 1);

    let by_id = store::pull_request::find_by_id(&db, pr.id).await.unwrap();
    assert_eq!(by_id.map(|p| p.title), Some("Renamed".to_string()));
    let authored = store::pull_request::list_by_author(&db, "alice").await.unwrap();
    assert_eq!(authored.len(), 1);
    assert!(
        store::pull_request::list_by_author(&db, "bob")
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn test_draft_release_is_rejected() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();

    let err = store::release::upsert(&db, repo.id, &remote_release(5, "v2.0.0", true), now)
        .await
        .expect_err("drafts are never cached");
    assert!(matches!(err, StoreError::InvalidInput { .. }));
    assert_eq!(Release::find().count(&db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_empty_search_query_is_rejected() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();

    let err = store::search::upsert(&db, repo.id, "   ", now)
        .await
        .expect_err("empty query");
    assert!(matches!(err, StoreError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_search_links_are_refreshed_and_unlinked() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();
    let search = store::search::upsert(&db, repo.id, "crash", now)
        .await
        .unwrap();

    let old = store::issue::upsert(&db, repo.id, &remote_issue(1, 1, "Old crash"), now)
        .await
        .unwrap();
    let fresh = store::issue::upsert(&db, repo.id, &remote_issue(2, 2, "New crash"), now)
        .await
        .unwrap();
    store::search::link_issue(&db, search.id, old.id, now - Duration::minutes(5))
        .await
        .unwrap();
    store::search::link_issue(&db, search.id, fresh.id, now)
        .await
        .unwrap();

    let unlinked = store::search::unlink_stale(&db, search.id, now - Duration::minutes(1))
        .await
        .unwrap();
    assert_eq!(unlinked, 1);

    let issues = store::search::issues_for(&db, search.id).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].id, fresh.id);
}

// ─── Notifications and metadata ──────────────────────────────────────────────

#[tokio::test]
async fn test_mark_toasted_hides_delivered_notifications() {
    let db = setup_test_db().await;
    let now = Utc::now();

    let first = store::notification::insert(&db, notification("alice"), now)
        .await
        .unwrap();
    store::notification::insert(&db, notification("alice"), now)
        .await
        .unwrap();

    assert!(store::notification::mark_toasted(&db, first.id).await.unwrap());
    assert!(
        !store::notification::mark_toasted(&db, uuid::Uuid::new_v4())
            .await
            .unwrap()
    );

    let pending = store::notification::list(&db, None, false).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert!(pending.iter().all(|n| !n.toasted));
    assert_eq!(store::notification::list(&db, None, true).await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_last_updated_round_trip() {
    let db = setup_test_db().await;
    assert!(store::meta::last_updated(&db).await.unwrap().is_none());

    let now = Utc::now();
    store::meta::set_last_updated(&db, now).await.unwrap();
    store::meta::set_last_updated(&db, now).await.unwrap();

    let stored = store::meta::last_updated(&db).await.unwrap().unwrap();
    assert_eq!(stored.timestamp(), now.timestamp());
}

// ─── Pruning ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_prune_keeps_only_referenced_status() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();
    let pr = store::pull_request::upsert(
        &db,
        repo.id,
        &remote_pull(10, 1, "alice", SHA, Duration::hours(1)),
        now,
    )
    .await
    .unwrap();

    let aggregate = AggregateStatus::default();
    let old = store::status::insert(&db, pr.id, None, SHA, &aggregate, now)
        .await
        .unwrap();
    let current = store::status::insert(&db, pr.id, Some(old.id), SHA, &aggregate, now)
        .await
        .unwrap();
    store::pull_request::set_status(&db, pr.id, current.id)
        .await
        .unwrap();

    let stats = prune::prune(&db, &SyncConfig::default(), now).await.unwrap();
    assert_eq!(stats.statuses, 1);

    let remaining = PullRequestStatus::find().all(&db).await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, current.id);
}

#[tokio::test]
async fn test_prune_applies_retention_windows() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let config = SyncConfig::default();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();

    store::notification::insert(&db, notification("alice"), now - Duration::days(8))
        .await
        .unwrap();
    store::notification::insert(&db, notification("alice"), now - Duration::days(6))
        .await
        .unwrap();
    store::search::upsert(&db, repo.id, "stale", now - Duration::days(8))
        .await
        .unwrap();
    store::search::upsert(&db, repo.id, "fresh", now)
        .await
        .unwrap();
    store::release::upsert(
        &db,
        repo.id,
        &remote_release(1, "v0.1.0", false),
        now - Duration::days(8),
    )
    .await
    .unwrap();
    store::release::upsert(&db, repo.id, &remote_release(2, "v0.2.0", false), now)
        .await
        .unwrap();

    let stats = prune::prune(&db, &config, now).await.unwrap();
    assert_eq!(stats.notifications, 1);
    assert_eq!(stats.searches, 1);
    assert_eq!(stats.releases, 1);

    assert_eq!(store::notification::list(&db, None, true).await.unwrap().len(), 1);
    assert!(store::search::find(&db, repo.id, "stale").await.unwrap().is_none());
    assert!(store::search::find(&db, repo.id, "fresh").await.unwrap().is_some());
    let releases = store::release::list_by_repository(&db, repo.id).await.unwrap();
    assert_eq!(releases.len(), 1);
    assert_eq!(releases[0].tag_name, "v0.2.0");
}

#[tokio::test]
async fn test_prune_removes_orphaned_check_data() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();
    let pr = store::pull_request::upsert(
        &db,
        repo.id,
        &remote_pull(10, 1, "alice", SHA, Duration::hours(1)),
        now - Duration::minutes(10),
    )
    .await
    .unwrap();
    store::checks::replace_for_pull_request(
        &db,
        pr.id,
        &[check_run(1, "completed", Some("success"))],
        &[check_suite(2, 15368, Some("success"))],
    )
    .await
    .unwrap();
    store::checks::upsert_combined_status(&db, repo.id, &combined("success", 1), now)
        .await
        .unwrap();

    let deleted = prune::delete_unobserved(
        &db,
        ObservedScope::PullRequests {
            repository_id: repo.id,
        },
        now - Duration::minutes(6),
    )
    .await
    .unwrap();
    assert_eq!(deleted, 1);

    let stats = prune::prune(&db, &SyncConfig::default(), now).await.unwrap();
    assert_eq!(stats.check_runs, 1);
    assert_eq!(stats.check_suites, 1);
    assert_eq!(stats.combined_statuses, 1);
    assert!(store::checks::list_runs(&db, pr.id).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_observed_window_deletes_only_stale_rows() {
    let db = setup_test_db().await;
    let now = Utc::now();
    let repo = store::repository::upsert(&db, &remote_repo(1, "octo", "hello"), now)
        .await
        .unwrap();

    store::issue::upsert(&db, repo.id, &remote_issue(1, 1, "Stale"), now - Duration::minutes(7))
        .await
        .unwrap();
    store::issue::upsert(&db, repo.id, &remote_issue(2, 2, "Recent"), now - Duration::minutes(5))
        .await
        .unwrap();

    let deleted = prune::delete_unobserved(
        &db,
        ObservedScope::Issues {
            repository_id: repo.id,
        },
        now - SyncConfig::default().observed_window(),
    )
    .await
    .unwrap();
    assert_eq!(deleted, 1);

    let issues = store::issue::list_by_repository(&db, repo.id).await.unwrap();
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].title, "Recent");
}
