use thiserror::Error;

use crate::platform::RemoteError;
use crate::store::StoreError;

/// Errors returned by orchestrator operations.
///
/// Failures are propagated unchanged after the operation's transaction has
/// been rolled back.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Malformed repository identifier; raised before any remote call.
    #[error("Invalid repository: {message}")]
    InvalidRepository { message: String },

    /// No candidate identity can see the repository.
    #[error("Repository not accessible: {full_name}")]
    RepositoryNotAccessible { full_name: String },

    /// No logged-in identity to sync on behalf of.
    #[error("No logged-in identities")]
    NoIdentities,

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// The store could not be reached before the operation started.
    #[error("Store unavailable: {message}")]
    StoreUnavailable { message: String },
}

impl SyncError {
    pub fn invalid_repository(message: impl Into<String>) -> Self {
        Self::InvalidRepository {
            message: message.into(),
        }
    }

    pub fn not_accessible(full_name: impl Into<String>) -> Self {
        Self::RepositoryNotAccessible {
            full_name: full_name.into(),
        }
    }

    /// The remote error behind this failure, if any.
    pub fn remote(&self) -> Option<&RemoteError> {
        match self {
            Self::Remote(e) => Some(e),
            _ => None,
        }
    }
}

impl From<sea_orm::DbErr> for SyncError {
    fn from(e: sea_orm::DbErr) -> Self {
        Self::Store(StoreError::Database(e))
    }
}

/// Result type for orchestrator operations.
pub type Result<T> = std::result::Result<T, SyncError>;
