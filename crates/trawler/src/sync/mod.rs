//! Sync orchestration.
//!
//! [`Orchestrator`] runs each public operation as one database transaction:
//! fetch, upsert, derive notifications, drop rows the sync no longer sees,
//! prune, stamp `last_updated`, commit and publish a [`SyncEvent`].

mod engine;
mod errors;
mod events;
mod pull_request;
mod types;

pub use engine::Orchestrator;
pub use errors::{Result, SyncError};
pub use events::{EVENT_CHANNEL_CAPACITY, EventBus, SyncEvent, SyncTarget, UpdateKind};
pub use types::{SyncOptions, SyncResult};
