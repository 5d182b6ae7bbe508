//! Credential fallback.
//!
//! A repository may be visible to only some of the user's credentials. The
//! resolver tries candidates in order and moves on only when the remote says
//! "not found"; every other failure ends the attempt so a rate limit or an
//! outage is never mistaken for a missing repository.

use std::future::Future;

use crate::platform::{Identity, IdentityProvider, RemoteError, RemoteRepository};
use crate::sync::{Result, SyncError};

/// A value fetched together with the identity that could see it.
#[derive(Debug, Clone)]
pub struct Accessed<T> {
    pub identity: Identity,
    pub value: T,
}

/// Check an owner/name pair before any remote call.
pub fn validate_repository(owner: &str, name: &str) -> Result<()> {
    let valid = |part: &str| {
        !part.is_empty() && part.trim() == part && !part.contains('/') && !part.contains(' ')
    };
    if !valid(owner) {
        return Err(SyncError::invalid_repository(format!(
            "invalid owner {owner:?}"
        )));
    }
    if !valid(name) {
        return Err(SyncError::invalid_repository(format!(
            "invalid name {name:?}"
        )));
    }
    Ok(())
}

/// Split `owner/name` into its parts.
pub fn parse_full_name(full_name: &str) -> Result<(String, String)> {
    let mut parts = full_name.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(owner), Some(name), None) => {
            validate_repository(owner, name)?;
            Ok((owner.to_string(), name.to_string()))
        }
        _ => Err(SyncError::invalid_repository(format!(
            "expected owner/name, got {full_name:?}"
        ))),
    }
}

/// Logged-in identities in order, then the public identity when requested.
pub async fn candidates(
    provider: &dyn IdentityProvider,
    use_public_fallback: bool,
) -> Result<Vec<Identity>> {
    let mut candidates = provider.logged_in_identities().await?;
    if use_public_fallback && let Some(public) = provider.public_identity() {
        candidates.push(public);
    }
    Ok(candidates)
}

/// Run `attempt` with each candidate until one succeeds.
///
/// # Errors
/// - the first error that is not "not found", unchanged
/// - `SyncError::RepositoryNotAccessible` when every candidate reported
///   "not found" or there were no candidates
pub async fn first_accessible<T, F, Fut>(
    full_name: &str,
    candidates: &[Identity],
    mut attempt: F,
) -> Result<Accessed<T>>
where
    F: FnMut(Identity) -> Fut,
    Fut: Future<Output = std::result::Result<T, RemoteError>>,
{
    for identity in candidates {
        match attempt(identity.clone()).await {
            Ok(value) => {
                tracing::debug!(repo = %full_name, login = %identity.login, "resolved identity");
                return Ok(Accessed {
                    identity: identity.clone(),
                    value,
                });
            }
            Err(e) if e.is_not_found() => {
                tracing::debug!(
                    repo = %full_name,
                    login = %identity.login,
                    "not visible to identity, trying next"
                );
            }
            Err(e) => {
                tracing::warn!(
                    repo = %full_name,
                    login = %identity.login,
                    error = %e,
                    "identity failed, giving up"
                );
                return Err(e.into());
            }
        }
    }

    Err(SyncError::not_accessible(full_name))
}

/// Fetch a repository with the first identity that can see it.
pub async fn resolve_repository(
    provider: &dyn IdentityProvider,
    owner: &str,
    name: &str,
    use_public_fallback: bool,
) -> Result<Accessed<RemoteRepository>> {
    validate_repository(owner, name)?;
    let candidates = candidates(provider, use_public_fallback).await?;
    let full_name = format!("{owner}/{name}");
    first_accessible(&full_name, &candidates, |identity| async move {
        identity.client.get_repository(owner, name).await
    })
    .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_name_accepts_owner_slash_name() {
        let (owner, name) = parse_full_name("rust-lang/rust").expect("valid name");
        assert_eq!(owner, "rust-lang");
        assert_eq!(name, "rust");
    }

    #[test]
    fn parse_full_name_rejects_malformed() {
        for bad in ["", "rust", "/rust", "rust-lang/", "a/b/c", "a b/c"] {
            let err = parse_full_name(bad).expect_err("should be rejected");
            assert!(
                matches!(err, SyncError::InvalidRepository { .. }),
                "{bad:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn validate_rejects_empty_parts() {
        assert!(validate_repository("", "repo").is_err());
        assert!(validate_repository("owner", "").is_err());
        assert!(validate_repository("owner", "repo").is_ok());
    }
}
