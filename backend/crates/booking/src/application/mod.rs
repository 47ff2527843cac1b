//! Application Layer
//!
//! Use cases and application services.

pub mod availability;
pub mod cancel_reservation;
pub mod catway_admin;
pub mod config;
pub mod lock;
pub mod reservation_query;
pub mod reserve;

// Re-exports
pub use availability::AvailabilityUseCase;
pub use cancel_reservation::CancelReservationUseCase;
pub use catway_admin::{CatwayAdminUseCase, CatwayUpdateInput, CreateCatwayInput};
pub use config::{AvailabilityPolicy, BookingConfig, CatwayDeletionPolicy};
pub use lock::{CatwayGuard, CatwayLocks};
pub use reservation_query::ReservationQueryUseCase;
pub use reserve::{ReserveInput, ReserveUseCase};
