//! Authenticate Use Case
//!
//! Verifies email + password and issues a signed access token.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::deadline::within;

use crate::application::config::IdentityConfig;
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{UserId, email::Email, user_password::SubmittedPassword};
use crate::error::{IdentityError, IdentityResult};

/// Authenticate input
pub struct AuthenticateInput {
    pub email: String,
    pub password: String,
}

/// Authenticate output
#[derive(Debug, Clone)]
pub struct AuthenticateOutput {
    /// Bearer token
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: UserId,
}

/// Authenticate use case
pub struct AuthenticateUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<S> AuthenticateUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, input: AuthenticateInput) -> IdentityResult<AuthenticateOutput> {
        let password = SubmittedPassword::new(input.password);
        let hasher = self.config.password_hasher()?;

        // A malformed email cannot belong to anyone
        let user = match Email::new(&input.email) {
            Ok(email) => {
                within(
                    self.config.storage_timeout,
                    "users.find_by_email",
                    self.store.find_by_email(&email),
                )
                .await?
            }
            Err(_) => None,
        };

        let Some(mut user) = user else {
            // Spend the same hashing work as a real verification
            let _ = hasher.hash(password.inner());
            tracing::warn!(reason = "unknown_email", "Authentication failed");
            return Err(IdentityError::InvalidCredentials);
        };

        if !hasher.verify(password.inner(), &user.password_hash) {
            tracing::warn!(user_id = %user.id, reason = "wrong_password", "Authentication failed");
            return Err(IdentityError::InvalidCredentials);
        }

        if hasher.needs_rehash(&user.password_hash) {
            self.upgrade_hash(&mut user, &password).await;
        }

        let issued = self
            .config
            .token_signer()
            .issue(&user.id.to_string(), self.config.token_ttl)
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        tracing::info!(user_id = %user.id, expires_at = %issued.expires_at, "User authenticated");

        Ok(AuthenticateOutput {
            token: issued.token,
            expires_at: issued.expires_at,
            user_id: user.id,
        })
    }

    /// Re-hash with the current cost; failures never block the login
    async fn upgrade_hash(&self, user: &mut crate::domain::User, password: &SubmittedPassword) {
        let rehashed = match self.config.password_hasher() {
            Ok(hasher) => hasher.hash(password.inner()),
            Err(_) => return,
        };

        match rehashed {
            Ok(hash) => {
                user.password_hash = hash;
                let saved = within(
                    self.config.storage_timeout,
                    "users.save",
                    self.store.save(user),
                )
                .await;
                match saved {
                    Ok(()) => tracing::info!(user_id = %user.id, "Password hash upgraded"),
                    Err(e) => {
                        tracing::warn!(user_id = %user.id, error = %e, "Password hash upgrade failed")
                    }
                }
            }
            Err(e) => {
                tracing::warn!(user_id = %user.id, error = %e, "Password re-hash failed");
            }
        }
    }
}
