//! GitHub implementation of the remote client.
//!
//! # Module Structure
//!
//! - [`client`] - [`GitHubClient`] and client construction
//! - [`error`] - Mapping of octocrab errors onto [`RemoteError`](crate::platform::RemoteError)
//! - [`identity`] - Token-backed [`IdentityProvider`](crate::platform::IdentityProvider)
//! - `types` / `convert` - Wire shapes and their conversion to platform types
//!
//! Every request goes through [`with_retry`](crate::retry::with_retry), so
//! transient network failures are retried before surfacing to a sync.

pub mod client;
mod convert;
pub mod error;
pub mod identity;
mod types;

pub use client::{GitHubClient, create_anonymous_client, create_client};
pub use identity::TokenIdentityProvider;
