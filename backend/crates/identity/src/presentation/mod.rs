//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and the authorization gate.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use middleware::require_caller;
pub use router::{identity_router, identity_router_generic};
pub use state::IdentityState;
