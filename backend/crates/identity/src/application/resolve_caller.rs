//! Resolve Caller Use Case
//!
//! Core of the authorization gate: turns a bearer token into a [`Caller`].
//! Every token failure collapses into `Unauthorized`; storage failures
//! keep their own kind so a slow store is not reported as a bad token.

use std::sync::Arc;

use kernel::caller::Caller;
use kernel::deadline::within;

use crate::application::config::IdentityConfig;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::UserId;
use crate::error::{IdentityError, IdentityResult};

/// Resolve caller use case
pub struct ResolveCallerUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<S> ResolveCallerUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, token: &str) -> IdentityResult<Caller> {
        let claims = self
            .config
            .token_signer()
            .verify(token)
            .map_err(|_| IdentityError::Unauthorized)?;

        let user_id: UserId = claims.sub.parse().map_err(|_| {
            tracing::debug!(sub = %claims.sub, "token rejected: subject is not a user id");
            IdentityError::Unauthorized
        })?;

        // Tokens outlive deleted accounts; the subject must still exist
        let exists = within(
            self.config.storage_timeout,
            "users.find_by_id",
            self.store.find_by_id(&user_id),
        )
        .await?
        .is_some();

        if !exists {
            tracing::debug!(user_id = %user_id, "token rejected: subject no longer exists");
            return Err(IdentityError::Unauthorized);
        }

        Ok(Caller::new(user_id))
    }
}
