//! Identities backed by GitHub personal access tokens.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::OnceCell;

use super::client::GitHubClient;
use crate::platform::{Identity, IdentityProvider, RemoteClient, Result};

/// Provides one identity per configured token, plus an optional anonymous one.
///
/// Logins are resolved with a `/user` call the first time identities are
/// requested and cached for the life of the provider.
pub struct TokenIdentityProvider {
    tokens: Vec<String>,
    public: Option<Identity>,
    resolved: OnceCell<Vec<Identity>>,
}

impl TokenIdentityProvider {
    /// Build a provider; `include_public` adds an unauthenticated identity.
    pub fn new(tokens: Vec<String>, include_public: bool) -> Result<Self> {
        let public = if include_public {
            let client: Arc<dyn RemoteClient> = Arc::new(GitHubClient::anonymous()?);
            Some(Identity::anonymous(client))
        } else {
            None
        };

        Ok(Self {
            tokens: tokens
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            public,
            resolved: OnceCell::new(),
        })
    }

    async fn resolve(&self) -> Result<Vec<Identity>> {
        let mut identities = Vec::with_capacity(self.tokens.len());
        for token in &self.tokens {
            let client = GitHubClient::new(token)?;
            let user = client.get_current_user().await?;
            tracing::debug!(login = %user.login, "resolved token identity");
            if identities.iter().any(|i: &Identity| i.login == user.login) {
                continue;
            }
            identities.push(Identity::new(user.login, Arc::new(client)));
        }
        Ok(identities)
    }
}

impl std::fmt::Debug for TokenIdentityProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenIdentityProvider")
            .field("tokens", &self.tokens.len())
            .field("public", &self.public.is_some())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl IdentityProvider for TokenIdentityProvider {
    async fn logged_in_identities(&self) -> Result<Vec<Identity>> {
        self.resolved
            .get_or_try_init(|| self.resolve())
            .await
            .cloned()
    }

    fn public_identity(&self) -> Option<Identity> {
        self.public.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_no_tokens_means_no_identities() {
        let provider = TokenIdentityProvider::new(vec![" ".to_string()], false).unwrap();
        assert!(provider.logged_in_identities().await.unwrap().is_empty());
        assert!(provider.public_identity().is_none());
    }

    #[tokio::test]
    async fn test_public_identity_is_anonymous() {
        let provider = TokenIdentityProvider::new(Vec::new(), true).unwrap();
        let public = provider.public_identity().expect("public identity");
        assert!(public.anonymous);
    }

    #[test]
    fn test_debug_hides_tokens() {
        let provider = TokenIdentityProvider::new(vec!["ghp_secret".to_string()], false).unwrap();
        let debug = format!("{provider:?}");
        assert!(!debug.contains("ghp_secret"));
    }
}
