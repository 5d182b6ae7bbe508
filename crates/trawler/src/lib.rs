//! Trawler - a local, transactional cache of GitHub repository state.
//!
//! Trawler mirrors repositories, pull requests with their checks and reviews,
//! issues and releases into a relational store, and turns changes it sees
//! between syncs into notifications for the people they concern.
//!
//! # Features
//!
//! - `sqlite` / `postgres` - Database backends.
//! - `migrate` - Enables [`connect_and_migrate`] and the schema migrations.
//! - `github` - The octocrab-backed [`github::GitHubClient`] and
//!   [`github::TokenIdentityProvider`].
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use trawler::{connect_and_migrate, Orchestrator, SyncConfig, SyncOptions};
//! use trawler::github::TokenIdentityProvider;
//!
//! let db = connect_and_migrate("sqlite://trawler.db?mode=rwc").await?;
//! let identities = Arc::new(TokenIdentityProvider::new(tokens, true)?);
//! let orchestrator = Orchestrator::new(db, SyncConfig::default(), identities);
//!
//! let result = orchestrator
//!     .sync_repository("rust-lang", "rust", &SyncOptions::default())
//!     .await?;
//! println!("{} pull requests, {} notifications", result.pull_requests, result.notifications);
//! ```

pub mod access;
pub mod config;
pub mod db;
pub mod entity;
pub mod notify;
pub mod platform;
pub mod prune;
pub mod store;
pub mod sync;

#[cfg(feature = "github")]
pub mod retry;

#[cfg(feature = "github")]
pub mod github;

#[cfg(feature = "migrate")]
pub mod migration;

pub use config::SyncConfig;
pub use db::connect;
#[cfg(feature = "migrate")]
pub use db::connect_and_migrate;
pub use entity::prelude::*;
pub use platform::{
    Identity, IdentityProvider, PageOptions, RemoteClient, RemoteError, StateFilter,
    StaticIdentityProvider,
};
pub use store::StoreError;
pub use sync::{Orchestrator, SyncError, SyncEvent, SyncOptions, SyncResult, SyncTarget};
