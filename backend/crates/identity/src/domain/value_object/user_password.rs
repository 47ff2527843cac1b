//! User Password Value Objects
//!
//! Domain-facing wrappers around `platform::password`. A [`NewPassword`]
//! has passed the configured policy and may be hashed; a
//! [`SubmittedPassword`] is whatever was typed at login and is only ever
//! verified.

use std::fmt;

use platform::password::{ClearTextPassword, PasswordPolicy, PasswordPolicyError};

use crate::error::{IdentityError, IdentityResult};

/// Password chosen at registration or on a profile change
pub struct NewPassword(ClearTextPassword);

impl NewPassword {
    pub fn new(raw: String, policy: &PasswordPolicy) -> IdentityResult<Self> {
        ClearTextPassword::new(raw, policy)
            .map(Self)
            .map_err(policy_error)
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

/// Password typed at login; no policy applies
pub struct SubmittedPassword(ClearTextPassword);

impl SubmittedPassword {
    pub fn new(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    pub(crate) fn inner(&self) -> &ClearTextPassword {
        &self.0
    }
}

impl fmt::Debug for NewPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("NewPassword").field(&"[REDACTED]").finish()
    }
}

impl fmt::Debug for SubmittedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SubmittedPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

fn policy_error(err: PasswordPolicyError) -> IdentityError {
    let message = match err {
        PasswordPolicyError::TooShort { min, .. } => {
            format!("Password must be at least {min} characters")
        }
        PasswordPolicyError::TooLong { max, .. } => {
            format!("Password must be at most {max} characters")
        }
        PasswordPolicyError::EmptyOrWhitespace => "Password cannot be empty".to_string(),
        PasswordPolicyError::InvalidCharacter => {
            "Password contains invalid control characters".to_string()
        }
        PasswordPolicyError::CommonPattern => {
            "Password is too common or follows a predictable pattern".to_string()
        }
    };
    IdentityError::InvalidInput(message)
}
