//! Resolved Caller
//!
//! The identity established by the authorization gate for the current
//! request. Use cases receive it explicitly; they never look at tokens.

use std::fmt;

use crate::id::UserId;

/// Authenticated principal attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    /// Identifier of the user the bearer token was issued to
    pub user_id: UserId,
}

impl Caller {
    pub fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Whether the caller is acting on their own record
    pub fn is(&self, user_id: &UserId) -> bool {
        &self.user_id == user_id
    }
}

impl fmt::Display for Caller {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.user_id)
    }
}
