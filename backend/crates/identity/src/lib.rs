//! Identity Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Users, value objects, credential store trait
//! - `application/` - Use cases (register, authenticate, profile, caller resolution)
//! - `infra/` - In-memory and PostgreSQL credential stores
//! - `presentation/` - HTTP handlers, DTOs, router, authorization gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, never stored or logged in clear
//! - Stateless HS256-signed bearer tokens; logout only discards the token client-side
//! - Unknown email and wrong password are one indistinguishable outcome
//! - Profile mutation and deletion are restricted to the account owner

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::IdentityConfig;
pub use error::{IdentityError, IdentityResult};
pub use infra::memory::InMemoryCredentialStore;
pub use infra::postgres::PgCredentialStore;
pub use presentation::middleware::require_caller;
pub use presentation::router::{identity_router, identity_router_generic};
pub use presentation::state::IdentityState;

// Re-export kernel types shared with the booking crate
pub use kernel::caller::Caller;
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
