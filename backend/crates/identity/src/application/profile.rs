//! Profile Use Cases
//!
//! Read, update and delete a user record. Mutations are self-only: the
//! ownership check runs before any lookup, so a foreign id is never probed.

use std::sync::Arc;

use kernel::caller::Caller;
use kernel::deadline::within;

use crate::application::config::IdentityConfig;
use crate::domain::entity::user::{ProfileChanges, User, UserProfile};
use crate::domain::repository::CredentialStore;
use crate::domain::value_object::{
    UserId, email::Email, person_name, user_password::NewPassword,
};
use crate::error::{IdentityError, IdentityResult};

/// Raw profile update; blank fields mean "leave unchanged"
#[derive(Debug, Default)]
pub struct ProfileUpdateInput {
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Profile use case
pub struct ProfileUseCase<S>
where
    S: CredentialStore,
{
    store: Arc<S>,
    config: Arc<IdentityConfig>,
}

impl<S> ProfileUseCase<S>
where
    S: CredentialStore,
{
    pub fn new(store: Arc<S>, config: Arc<IdentityConfig>) -> Self {
        Self { store, config }
    }

    /// Fetch a profile (never includes the password hash)
    pub async fn get(&self, id: &UserId) -> IdentityResult<UserProfile> {
        self.load(id).await.map(|user| user.profile())
    }

    /// Merge the supplied non-blank fields into the caller's own record
    pub async fn update(
        &self,
        caller: &Caller,
        target: &UserId,
        input: ProfileUpdateInput,
    ) -> IdentityResult<UserProfile> {
        ensure_self(caller, target)?;

        let mut user = self.load(target).await?;
        let changes = self.validate(&user, input).await?;

        if changes.is_empty() {
            return Ok(user.profile());
        }

        let password_changed = changes.password_hash.is_some();
        user.apply(changes);

        within(
            self.config.storage_timeout,
            "users.save",
            self.store.save(&user),
        )
        .await?;

        tracing::info!(user_id = %user.id, password_changed, "Profile updated");

        Ok(user.profile())
    }

    /// Delete the caller's own account
    pub async fn delete(&self, caller: &Caller, target: &UserId) -> IdentityResult<()> {
        ensure_self(caller, target)?;

        let deleted = within(
            self.config.storage_timeout,
            "users.delete",
            self.store.delete(target),
        )
        .await?;

        if !deleted {
            return Err(IdentityError::NotFound);
        }

        tracing::info!(user_id = %target, "User deleted");
        Ok(())
    }

    async fn load(&self, id: &UserId) -> IdentityResult<User> {
        within(
            self.config.storage_timeout,
            "users.find_by_id",
            self.store.find_by_id(id),
        )
        .await?
        .ok_or(IdentityError::NotFound)
    }

    async fn validate(&self, user: &User, input: ProfileUpdateInput) -> IdentityResult<ProfileChanges> {
        let name = match person_name::non_blank(input.name.as_deref()) {
            Some(name) => Some(person_name::required_name(&name)?),
            None => None,
        };
        let firstname = person_name::non_blank(input.firstname.as_deref());

        let email = match person_name::non_blank(input.email.as_deref()) {
            Some(raw) => {
                let email = Email::new(raw)?;
                if email == user.email {
                    None
                } else {
                    let owner = within(
                        self.config.storage_timeout,
                        "users.find_by_email",
                        self.store.find_by_email(&email),
                    )
                    .await?;
                    if owner.is_some_and(|other| other.id != user.id) {
                        return Err(IdentityError::AlreadyExists);
                    }
                    Some(email)
                }
            }
            None => None,
        };

        let password_hash = match input.password.filter(|p| !p.is_empty()) {
            Some(raw) => {
                let password = NewPassword::new(raw, &self.config.password_policy)?;
                let hash = self
                    .config
                    .password_hasher()?
                    .hash(password.inner())
                    .map_err(|e| IdentityError::Internal(e.to_string()))?;
                Some(hash)
            }
            None => None,
        };

        Ok(ProfileChanges {
            name,
            firstname,
            email,
            password_hash,
        })
    }
}

fn ensure_self(caller: &Caller, target: &UserId) -> IdentityResult<()> {
    if caller.is(target) {
        Ok(())
    } else {
        tracing::warn!(caller = %caller, target = %target, "Cross-account modification rejected");
        Err(IdentityError::Forbidden)
    }
}
