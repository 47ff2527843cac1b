//! Booking Error Types
//!
//! Booking-specific error variants that integrate with the unified
//! `kernel::error::AppError` system. `Conflict` is its own kind so that
//! clients can react by re-querying availability.

use axum::response::{IntoResponse, Response};
use kernel::deadline::DeadlineExceeded;
use kernel::error::{app_error::AppError, conversions::pg_codes, kind::ErrorKind};
use thiserror::Error;

/// Booking-specific result type alias
pub type BookingResult<T> = Result<T, BookingError>;

/// Booking-specific error variants
#[derive(Debug, Error)]
pub enum BookingError {
    /// Catway not found
    #[error("Catway not found")]
    CatwayNotFound,

    /// Reservation not found (or not on the given catway)
    #[error("Reservation not found")]
    ReservationNotFound,

    /// Catway number already in use
    #[error("A catway with this number already exists")]
    AlreadyExists,

    /// Check-in is not strictly before check-out
    #[error("Check-in must be before check-out")]
    InvalidRange,

    /// Rejected input (blank names, non-positive catway number, bad dates)
    #[error("{0}")]
    InvalidInput(String),

    /// Overlapping reservation, or a deletion blocked by reservations
    #[error("{0}")]
    Conflict(String),

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

impl BookingError {
    pub(crate) fn overlap() -> Self {
        BookingError::Conflict("Catway is already booked for an overlapping period".into())
    }

    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            BookingError::CatwayNotFound | BookingError::ReservationNotFound => {
                ErrorKind::NotFound
            }
            BookingError::AlreadyExists | BookingError::Conflict(_) => ErrorKind::Conflict,
            BookingError::InvalidRange | BookingError::InvalidInput(_) => ErrorKind::BadRequest,
            BookingError::Timeout(_) => ErrorKind::GatewayTimeout,
            BookingError::StorageUnavailable(_) => ErrorKind::ServiceUnavailable,
            BookingError::Database(_) | BookingError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Whether the caller may retry with backoff
    pub fn is_retryable(&self) -> bool {
        self.kind().is_retryable()
    }

    /// Convert to AppError
    pub fn to_app_error(&self) -> AppError {
        match self {
            BookingError::Database(_) | BookingError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            BookingError::StorageUnavailable(_) => {
                AppError::service_unavailable("Storage unavailable")
                    .with_action("Please retry shortly")
            }
            BookingError::Timeout(_) => AppError::gateway_timeout("Storage did not respond in time")
                .with_action("Please retry shortly"),
            BookingError::Conflict(_) => AppError::conflict(self.to_string())
                .with_action("Query availability and pick another period"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Log the error with appropriate level
    fn log(&self) {
        match self {
            BookingError::Database(e) => {
                tracing::error!(error = %e, "Booking database error");
            }
            BookingError::Internal(msg) => {
                tracing::error!(message = %msg, "Booking internal error");
            }
            BookingError::StorageUnavailable(msg) => {
                tracing::error!(message = %msg, "Booking storage unavailable");
            }
            BookingError::Timeout(e) => {
                tracing::error!(error = %e, "Booking storage timeout");
            }
            BookingError::Conflict(msg) => {
                tracing::warn!(message = %msg, "Booking conflict");
            }
            _ => {
                tracing::debug!(error = %self, "Booking error");
            }
        }
    }
}

impl IntoResponse for BookingError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<sqlx::Error> for BookingError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::PoolTimedOut => BookingError::Timeout(DeadlineExceeded {
                operation: "booking.pool_acquire",
                limit: std::time::Duration::ZERO,
            }),
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                BookingError::StorageUnavailable(err.to_string())
            }
            _ => match pg_codes::sqlstate(&err).as_deref() {
                Some(pg_codes::UNIQUE_VIOLATION) => BookingError::AlreadyExists,
                Some(pg_codes::EXCLUSION_VIOLATION) => BookingError::overlap(),
                _ => BookingError::Database(err),
            },
        }
    }
}
