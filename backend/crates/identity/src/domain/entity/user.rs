//! User Entity
//!
//! The stored identity record. The password field only ever holds an
//! Argon2id hash; [`UserProfile`] is the view handed to anything outside
//! the crate and has no hash at all.

use chrono::{DateTime, Utc};
use platform::password::HashedPassword;
use serde::Serialize;

use crate::domain::value_object::{UserId, email::Email};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier (token subject)
    pub id: UserId,
    /// Family or display name
    pub name: String,
    /// Optional given name
    pub firstname: Option<String>,
    /// Unique, lowercased login identifier
    pub email: Email,
    /// Argon2id PHC string
    pub password_hash: HashedPassword,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(
        name: String,
        firstname: Option<String>,
        email: Email,
        password_hash: HashedPassword,
    ) -> Self {
        let now = Utc::now();

        Self {
            id: UserId::new(),
            name,
            firstname,
            email,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Public representation without credentials
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            firstname: self.firstname.clone(),
            email: self.email.as_str().to_string(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Merge already-validated changes; absent fields keep their value
    pub fn apply(&mut self, changes: ProfileChanges) {
        let ProfileChanges {
            name,
            firstname,
            email,
            password_hash,
        } = changes;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(firstname) = firstname {
            self.firstname = Some(firstname);
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(hash) = password_hash {
            self.password_hash = hash;
        }
        self.updated_at = Utc::now();
    }
}

/// Validated profile changes
///
/// A password only ever arrives here hashed.
#[derive(Debug, Clone, Default)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub firstname: Option<String>,
    pub email: Option<Email>,
    pub password_hash: Option<HashedPassword>,
}

impl ProfileChanges {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.firstname.is_none()
            && self.email.is_none()
            && self.password_hash.is_none()
    }
}

/// User representation safe to return to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: UserId,
    pub name: String,
    pub firstname: Option<String>,
    pub email: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
