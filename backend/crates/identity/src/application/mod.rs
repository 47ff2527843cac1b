//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod profile;
pub mod register;
pub mod resolve_caller;

// Re-exports
pub use authenticate::{AuthenticateInput, AuthenticateOutput, AuthenticateUseCase};
pub use config::IdentityConfig;
pub use profile::{ProfileUpdateInput, ProfileUseCase};
pub use register::{RegisterInput, RegisterUseCase};
pub use resolve_caller::ResolveCallerUseCase;
