//! Application Configuration
//!
//! Configuration for the Identity application layer. Built once at startup
//! and shared behind an `Arc`; nothing here is a global.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::{HashCost, PasswordHasher, PasswordPolicy};
use platform::token::TokenSigner;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

use crate::error::{IdentityError, IdentityResult};

/// Identity application configuration
#[derive(Debug, Clone)]
pub struct IdentityConfig {
    /// HS256 signing key for access tokens (32 bytes)
    pub token_secret: [u8; 32],
    /// Access token lifetime (24 hours)
    pub token_ttl: Duration,
    /// Cookie carrying the access token for browser clients
    pub token_cookie_name: String,
    /// Whether to require Secure cookie
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Rules for newly chosen passwords
    pub password_policy: PasswordPolicy,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
    /// Argon2id cost
    pub hash_cost: HashCost,
    /// Upper bound for every credential store call
    pub storage_timeout: Duration,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            token_secret: [0u8; 32],
            token_ttl: Duration::from_secs(24 * 3600), // 24 hours
            token_cookie_name: "access_token".to_string(),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_policy: PasswordPolicy::nist(),
            password_pepper: None,
            hash_cost: HashCost::OWASP,
            storage_timeout: Duration::from_secs(5),
        }
    }
}

impl IdentityConfig {
    /// Create config with a random token secret
    pub fn with_random_secret() -> Self {
        Self {
            token_secret: platform::crypto::random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    /// Token issuer/verifier for the configured secret
    pub fn token_signer(&self) -> TokenSigner {
        TokenSigner::new(self.token_secret.to_vec())
    }

    /// Password hasher for the configured cost and pepper
    pub fn password_hasher(&self) -> IdentityResult<PasswordHasher> {
        PasswordHasher::new(self.hash_cost, self.password_pepper.clone())
            .map_err(|e| IdentityError::Internal(e.to_string()))
    }

    /// Cookie settings for the access token
    pub fn token_cookie(&self) -> CookieConfig {
        CookieConfig {
            name: self.token_cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
            max_age_secs: Some(self.token_ttl.as_secs() as i64),
        }
    }
}
