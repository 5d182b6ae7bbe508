//! Update events published after a sync commits.

use std::fmt;

use serde::Serialize;
use tokio::sync::broadcast;

/// Capacity of the update channel; slow subscribers see `Lagged`.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;

/// What a sync refreshed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SyncTarget {
    Repository { owner: String, name: String },
    Developer { login: String },
}

impl fmt::Display for SyncTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Repository { owner, name } => write!(f, "{owner}/{name}"),
            Self::Developer { login } => write!(f, "@{login}"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    Repository,
    PullRequests,
    Issues,
    Releases,
    Notifications,
    Developers,
}

/// Published once per committed operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyncEvent {
    pub target: SyncTarget,
    pub kinds: Vec<UpdateKind>,
}

/// Broadcast bus for [`SyncEvent`]s.
#[derive(Debug, Clone)]
pub struct EventBus {
    tx: broadcast::Sender<SyncEvent>,
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(EVENT_CHANNEL_CAPACITY)
    }
}

impl EventBus {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SyncEvent> {
        self.tx.subscribe()
    }

    /// Publish to current subscribers. Returns how many received it.
    pub fn publish(&self, event: SyncEvent) -> usize {
        // Sending only fails when nobody is subscribed.
        self.tx.send(event).unwrap_or(0)
    }
}
