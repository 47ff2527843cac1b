//! Shared handler / middleware state

use std::sync::Arc;

use crate::application::config::IdentityConfig;
use crate::domain::repository::CredentialStore;

/// Shared state for identity handlers and the authorization gate
pub struct IdentityState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub store: Arc<S>,
    pub config: Arc<IdentityConfig>,
}

impl<S> IdentityState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    pub fn new(store: S, config: IdentityConfig) -> Self {
        Self {
            store: Arc::new(store),
            config: Arc::new(config),
        }
    }
}

// Manual impl: cloning the state only clones the Arcs
impl<S> Clone for IdentityState<S>
where
    S: CredentialStore + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}
