//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use kernel::deadline::within;

use crate::application::config::IdentityConfig;
use crate::domain::entity::user::{User, UserProfile};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{email::Email, person_name, user_password::NewPassword};
use crate::error::{IdentityError, IdentityResult};

/// Register input
pub struct RegisterInput {
    pub name: String,
    pub firstname: Option<String>,
    pub email: String,
    pub password: String,
}

/// Register use case
pub struct RegisterUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<S> RegisterUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self { store, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> IdentityResult<UserProfile> {
        let name = person_name::required_name(&input.name)?;
        let firstname = person_name::non_blank(input.firstname.as_deref());
        let email = Email::new(&input.email)?;
        let password = NewPassword::new(input.password, &self.config.password_policy)?;

        let timeout = self.config.storage_timeout;

        if within(timeout, "users.find_by_email", self.store.find_by_email(&email))
            .await?
            .is_some()
        {
            tracing::debug!(email = %email, "Registration rejected: email taken");
            return Err(IdentityError::AlreadyExists);
        }

        let password_hash = self
            .config
            .password_hasher()?
            .hash(password.inner())
            .map_err(|e| IdentityError::Internal(e.to_string()))?;

        let user = User::new(name, firstname, email, password_hash);

        // The store re-checks uniqueness, which closes the race with a
        // concurrent registration of the same email.
        within(timeout, "users.save", self.store.save(&user)).await?;

        tracing::info!(user_id = %user.id, "User registered");

        Ok(user.profile())
    }
}
