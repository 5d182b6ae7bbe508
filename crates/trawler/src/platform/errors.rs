use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors returned by a remote client.
///
/// The variants are what the access resolver and the orchestrator branch on,
/// so clients must map their transport errors onto them faithfully.
#[derive(Debug, Clone, Error)]
pub enum RemoteError {
    /// Resource not found, or hidden from the current credential.
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    /// Credential was recognized but lacks permission.
    #[error("Forbidden: {message}")]
    Forbidden { message: String },

    /// Rate limit exceeded.
    #[error(
        "Rate limit exceeded{}",
        .reset_at.map(|t| format!(". Resets at {t}")).unwrap_or_default()
    )]
    RateLimited { reset_at: Option<DateTime<Utc>> },

    /// Transport failure (connection, timeout, TLS).
    #[error("Network error: {message}")]
    Network { message: String },

    /// Any other error reported by the remote API.
    #[error("API error: {message}")]
    Api { message: String },
}

impl RemoteError {
    #[inline]
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    #[inline]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    #[inline]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    #[inline]
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api {
            message: message.into(),
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[inline]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden { .. })
    }

    #[inline]
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }

    /// Whether retrying the same request may succeed.
    #[inline]
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network { .. })
    }
}

/// Extract a short error message suitable for display.
///
/// Takes the first line of an error message, which is useful for errors
/// that carry multi-line API payloads.
#[inline]
pub fn short_error_message(e: &impl std::error::Error) -> String {
    let full = e.to_string();
    full.lines().next().unwrap_or(&full).to_string()
}

/// Result type for remote operations.
pub type Result<T> = std::result::Result<T, RemoteError>;
