//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.
//! "Not found" is `Ok(None)` / `Ok(false)`, never an error.

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::IdentityResult;

/// Credential store trait
#[trait_variant::make(CredentialStore: Send)]
pub trait LocalCredentialStore {
    /// Find user by (normalized) email
    async fn find_by_email(&self, email: &Email) -> IdentityResult<Option<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: &UserId) -> IdentityResult<Option<User>>;

    /// Insert or replace a user
    ///
    /// Fails with `AlreadyExists` when the email belongs to another user.
    async fn save(&self, user: &User) -> IdentityResult<()>;

    /// Delete a user; `false` if there was nothing to delete
    async fn delete(&self, id: &UserId) -> IdentityResult<bool>;
}
