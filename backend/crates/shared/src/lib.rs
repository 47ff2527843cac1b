//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of domain vocabulary shared by
//! the identity and booking crates:
//! - Common error types and result aliases
//! - Typed ID wrappers
//! - The resolved caller handed from the authorization gate to use cases
//! - Bounded-time execution of storage calls
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod caller;
pub mod deadline;
pub mod id;
