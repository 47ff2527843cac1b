//! Booking Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Catways, reservations, value objects, repository traits
//! - `application/` - Use cases (catway admin, availability, reserve, cancel, queries)
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Consistency Model
//! - No two reservations on one catway overlap (half-open `[check_in, check_out)`)
//! - Every check-then-write on a catway runs under a per-catway async lock
//! - PostgreSQL additionally enforces the overlap rule with an exclusion constraint
//! - Every repository call is bounded by a timeout

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::{AvailabilityPolicy, BookingConfig, CatwayDeletionPolicy};
pub use error::{BookingError, BookingResult};
pub use infra::memory::InMemoryBookingStore;
pub use infra::postgres::PgBookingRepository;
pub use presentation::router::{booking_router, booking_router_generic};
pub use presentation::state::BookingState;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[cfg(test)]
mod tests;
