//! Presentation Layer
//!
//! HTTP handlers, DTOs, and router.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod state;

pub use router::{booking_router, booking_router_generic};
pub use state::BookingState;
