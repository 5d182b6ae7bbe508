//! Mapping of octocrab errors onto [`RemoteError`].

use crate::platform::RemoteError;

/// Whether a 403 body describes a rate limit rather than a permission problem.
fn mentions_rate_limit(message: &str) -> bool {
    let message = message.to_ascii_lowercase();
    message.contains("rate limit") || message.contains("abuse detection")
}

/// Map an HTTP status and GitHub error message to a [`RemoteError`].
pub fn from_status(status: u16, message: &str, resource: &str) -> RemoteError {
    match status {
        404 | 410 => RemoteError::not_found(resource),
        429 => RemoteError::RateLimited { reset_at: None },
        403 if mentions_rate_limit(message) => RemoteError::RateLimited { reset_at: None },
        401 | 403 => RemoteError::forbidden(format!("{resource}: {message}")),
        500..=599 => RemoteError::network(format!("{resource}: HTTP {status} {message}")),
        _ => RemoteError::api(format!("{resource}: HTTP {status} {message}")),
    }
}

/// Convert an octocrab error for a request on `resource`.
pub fn map_octocrab_error(e: octocrab::Error, resource: &str) -> RemoteError {
    match e {
        octocrab::Error::GitHub { source, .. } => {
            from_status(source.status_code.as_u16(), &source.message, resource)
        }
        octocrab::Error::Json { source, .. } => {
            RemoteError::api(format!("{resource}: unexpected response: {source}"))
        }
        octocrab::Error::Serde { source, .. } => {
            RemoteError::api(format!("{resource}: unexpected response: {source}"))
        }
        other => RemoteError::network(format!("{resource}: {other}")),
    }
}
