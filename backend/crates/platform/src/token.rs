//! Signed Access Tokens
//!
//! Compact, stateless bearer tokens: HS256 JWTs carrying `sub`, `iat` and
//! `exp`. A token is valid while `now < exp`, with no leeway.
//!
//! Every failure mode (malformed, foreign signature, expired) surfaces as
//! the same [`TokenError::Invalid`] so callers cannot tell them apart; the
//! reason is only logged.

use std::fmt;
use std::time::Duration;

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Claims carried by an access token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Subject (user id)
    pub sub: String,
    /// Issued at (unix seconds)
    pub iat: i64,
    /// Expiry (unix seconds)
    pub exp: i64,
}

impl TokenClaims {
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.exp <= now.timestamp()
    }
}

/// A freshly issued token and its expiry instant
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("invalid or expired token")]
    Invalid,

    #[error("token claims could not be encoded: {0}")]
    Encoding(String),
}

/// HS256 token issuer and verifier bound to one secret
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct TokenSigner {
    secret: Vec<u8>,
}

impl TokenSigner {
    pub fn new(secret: impl Into<Vec<u8>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Issue a token for `subject`, valid for `ttl` from now
    pub fn issue(&self, subject: &str, ttl: Duration) -> Result<IssuedToken, TokenError> {
        self.issue_at(subject, ttl, Utc::now())
    }

    /// Issue a token as of an explicit instant
    pub fn issue_at(
        &self,
        subject: &str,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let ttl = chrono::Duration::from_std(ttl)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;
        let expires_at = now + ttl;

        let claims = TokenClaims {
            sub: subject.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(&self.secret),
        )
        .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> Result<TokenClaims, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Verify signature and expiry as of an explicit instant
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenClaims, TokenError> {
        let claims = decode::<TokenClaims>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation(),
        )
        .map_err(|err| {
            tracing::debug!(reason = ?err.kind(), "token rejected");
            TokenError::Invalid
        })?
        .claims;

        // `now` may differ from the wall clock the decoder checked against
        if claims.is_expired_at(now) {
            tracing::debug!(sub = %claims.sub, exp = claims.exp, "token rejected: expired");
            return Err(TokenError::Invalid);
        }

        Ok(claims)
    }
}

fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp", "iat", "sub"]);
    validation
}

impl fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenSigner")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: Duration = Duration::from_secs(24 * 60 * 60);

    fn signer() -> TokenSigner {
        TokenSigner::new([7u8; 32].to_vec())
    }

    #[test]
    fn test_issue_and_verify() {
        let now = Utc::now();
        let issued = signer().issue_at("user-1", DAY, now).unwrap();

        assert_eq!(issued.expires_at, now + chrono::Duration::hours(24));
        assert_eq!(issued.token.split('.').count(), 3);

        let claims = signer().verify_at(&issued.token, now).unwrap();
        assert_eq!(claims.sub, "user-1");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn test_expiry_boundary() {
        let now = Utc::now();
        let ttl = Duration::from_secs(600);
        let issued = signer().issue_at("user-1", ttl, now).unwrap();

        let just_before = now + chrono::Duration::seconds(599);
        assert!(signer().verify_at(&issued.token, just_before).is_ok());

        let at_expiry = now + chrono::Duration::seconds(600);
        assert_eq!(
            signer().verify_at(&issued.token, at_expiry),
            Err(TokenError::Invalid)
        );

        let after = now + chrono::Duration::seconds(601);
        assert_eq!(
            signer().verify_at(&issued.token, after),
            Err(TokenError::Invalid)
        );
    }

    #[test]
    fn test_token_expired_on_the_wall_clock_is_rejected() {
        let an_hour_ago = Utc::now() - chrono::Duration::hours(1);
        let issued = signer()
            .issue_at("user-1", Duration::from_secs(60), an_hour_ago)
            .unwrap();
        assert_eq!(signer().verify(&issued.token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_foreign_secret_rejected() {
        let issued = signer().issue("user-1", DAY).unwrap();
        let other = TokenSigner::new([8u8; 32].to_vec());
        assert_eq!(other.verify(&issued.token), Err(TokenError::Invalid));
    }

    #[test]
    fn test_swapped_claims_rejected() {
        let genuine = signer().issue("user-1", DAY).unwrap();
        let forged = TokenSigner::new([9u8; 32].to_vec())
            .issue("user-2", DAY)
            .unwrap();

        // Claims of one token under the signature of another
        let (head, _) = forged.token.rsplit_once('.').unwrap();
        let (_, signature) = genuine.token.rsplit_once('.').unwrap();
        let spliced = format!("{head}.{signature}");

        assert_eq!(signer().verify(&spliced), Err(TokenError::Invalid));
    }

    #[test]
    fn test_other_algorithm_rejected() {
        let claims = TokenClaims {
            sub: "user-1".to_string(),
            iat: Utc::now().timestamp(),
            exp: Utc::now().timestamp() + 600,
        };
        let hs512 = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(&[7u8; 32]),
        )
        .unwrap();

        assert_eq!(signer().verify(&hs512), Err(TokenError::Invalid));
    }

    #[test]
    fn test_malformed_tokens_rejected() {
        for token in ["", "no-dot", "a.b", ".", "a.b.c", "!!!.???.###"] {
            assert_eq!(signer().verify(token), Err(TokenError::Invalid), "{token}");
        }
    }

    #[test]
    fn test_debug_redacts_secret() {
        assert!(format!("{:?}", signer()).contains("REDACTED"));
    }
}
