use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;

use super::errors::Result;
use super::types::RemoteClient;

/// A credential a sync can act as.
#[derive(Clone)]
pub struct Identity {
    pub login: String,
    pub client: Arc<dyn RemoteClient>,
    /// Unauthenticated access to public data only.
    pub anonymous: bool,
}

impl Identity {
    pub fn new(login: impl Into<String>, client: Arc<dyn RemoteClient>) -> Self {
        Self {
            login: login.into(),
            client,
            anonymous: false,
        }
    }

    pub fn anonymous(client: Arc<dyn RemoteClient>) -> Self {
        Self {
            login: "anonymous".to_string(),
            client,
            anonymous: true,
        }
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Identity")
            .field("login", &self.login)
            .field("anonymous", &self.anonymous)
            .finish_non_exhaustive()
    }
}

/// Source of the identities a sync may use.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Logged-in identities, in the order they should be tried.
    async fn logged_in_identities(&self) -> Result<Vec<Identity>>;

    /// Anonymous identity used for public repositories, if one is available.
    fn public_identity(&self) -> Option<Identity>;
}

/// Provider over a fixed list of identities.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentityProvider {
    identities: Vec<Identity>,
    public: Option<Identity>,
}

impl StaticIdentityProvider {
    pub fn new(identities: Vec<Identity>) -> Self {
        Self {
            identities,
            public: None,
        }
    }

    #[must_use]
    pub fn with_public(mut self, public: Identity) -> Self {
        self.public = Some(public);
        self
    }
}

#[async_trait]
impl IdentityProvider for StaticIdentityProvider {
    async fn logged_in_identities(&self) -> Result<Vec<Identity>> {
        Ok(self.identities.clone())
    }

    fn public_identity(&self) -> Option<Identity> {
        self.public.clone()
    }
}
