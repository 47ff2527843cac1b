//! Identity Error Types
//!
//! Identity-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::response::{IntoResponse, Response};
use kernel::deadline::DeadlineExceeded;
use kernel::error::{app_error::AppError, conversions::pg_codes, kind::ErrorKind};
use thiserror::Error;

/// Identity-specific result type alias
pub type IdentityResult<T> = Result<T, IdentityError>;

/// Identity-specific error variants
#[derive(Debug, Error)]
pub enum IdentityError {
    /// User not found
    #[error("User not found")]
    NotFound,

    /// Email already registered (case-insensitive)
    #[error("An account with this email already exists")]
    AlreadyExists,

    /// Unknown email or wrong password; deliberately not distinguished
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Missing, malformed, forged or expired token, or a subject that no longer exists
    #[error("Authentication required")]
    Unauthorized,

    /// Acting on another user's account
    #[error("You may only modify your own account")]
    Forbidden,

    /// Rejected input (empty name, malformed email, password policy)
    #[error("{0}")]
    InvalidInput(String),

    /// Storage did not answer in time
    #[error("Storage timeout: {0}")]
    Timeout(#[from] DeadlineExceeded),

    /// Storage unreachable
    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    /// Database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IdentityError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            IdentityError::NotFound => ErrorKind::NotFound,
            IdentityError::AlreadyExists => ErrorKind::Conflict,
            IdentityError::InvalidCredentials | IdentityError::Unauthorized => {
                ErrorKind::Unauthorized
            }
            IdentityError::Forbidden => ErrorKind::Forbidden,
            IdentityError::InvalidInput(_) => ErrorKind::BadRequest,
            IdentityError::Timeout(_) => ErrorKind::GatewayTimeout,
            IdentityError::StorageUnavailable(_) => ErrorKind::ServiceUnavailable,
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the caller may retry with backoff
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Convert to AppError
    ///
    /// Server-side details never reach the response body.
    pub fn to_app_error(&self) -> AppError {
        match self {
            IdentityError::Database(_) | IdentityError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            IdentityError::StorageUnavailable(_) => {
                AppError::service_unavailable("Storage unavailable")
                    .with_action("Please retry shortly")
            }
            IdentityError::Timeout(_) => AppError::gateway_timeout("Storage did not respond in time")
                .with_action("Please retry shortly"),
            IdentityError::Unauthorized => {
                AppError::unauthorized(self.to_string()).with_action("Please log in again")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            IdentityError::Database(e) => {
                tracing::error!(error = %e, "Identity database error");
            }
            IdentityError::Internal(msg) => {
                tracing::error!(message = %msg, "Identity internal error");
            }
            IdentityError::StorageUnavailable(msg) => {
                tracing::error!(message = %msg, "Identity storage unavailable");
            }
            IdentityError::Timeout(e) => {
                tracing::error!(error = %e, "Identity storage timeout");
            }
            IdentityError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            IdentityError::Forbidden => {
                tracing::warn!("Cross-account modification rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Identity error");
            }
        }
    }
}

impl IntoResponse for IdentityError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for IdentityError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => IdentityError::Timeout(DeadlineExceeded {
                operation: "users.pool_acquire",
                limit: std::time::Duration::ZERO,
            }),
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                IdentityError::StorageUnavailable(err.to_string())
            }
            _ if pg_codes::sqlstate(&err).as_deref() == Some(pg_codes::UNIQUE_VIOLATION) => {
                IdentityError::AlreadyExists
            }
            _ => IdentityError::Database(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_status_mapping() {
        assert_eq!(IdentityError::NotFound.kind().status_code(), 404);
        assert_eq!(IdentityError::AlreadyExists.kind().status_code(), 409);
        assert_eq!(IdentityError::InvalidCredentials.kind().status_code(), 401);
        assert_eq!(IdentityError::Unauthorized.kind().status_code(), 401);
        assert_eq!(IdentityError::Forbidden.kind().status_code(), 403);
        assert_eq!(
            IdentityError::InvalidInput("x".into()).kind().status_code(),
            400
        );
        assert_eq!(
            IdentityError::StorageUnavailable("down".into())
                .kind()
                .status_code(),
            503
        );
    }

    #[test]
    fn test_timeout_is_retryable() {
        let err = IdentityError::from(DeadlineExceeded {
            operation: "users.find_by_email",
            limit: Duration::from_secs(2),
        });
        assert_eq!(err.kind(), ErrorKind::GatewayTimeout);
        assert!(err.is_retryable());
        assert!(!IdentityError::InvalidCredentials.is_retryable());
    }

    #[test]
    fn test_credentials_message_is_generic() {
        let app_err = IdentityError::InvalidCredentials.to_app_error();
        assert_eq!(app_err.message(), "Invalid email or password");
    }

    #[test]
    fn test_internal_details_hidden() {
        let app_err = IdentityError::Internal("argon2 params".into()).to_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("argon2"));
    }

    #[test]
    fn test_pool_errors_map_to_storage_kinds() {
        assert!(matches!(
            IdentityError::from(sqlx::Error::PoolTimedOut),
            IdentityError::Timeout(_)
        ));
        assert!(matches!(
            IdentityError::from(sqlx::Error::PoolClosed),
            IdentityError::StorageUnavailable(_)
        ));
    }
}
