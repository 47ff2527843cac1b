//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entities;
pub mod repository;
pub mod value_objects;

// Re-exports
pub use entities::{Catway, CatwayChanges, NewCatway, NewReservation, Reservation};
pub use repository::{CatwayRepository, ReservationFilter, ReservationRepository};
pub use value_objects::{CatwayId, CatwayNumber, CatwayType, ReservationId, StayPeriod};
