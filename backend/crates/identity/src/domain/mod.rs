//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::user::{ProfileChanges, User, UserProfile};
pub use repository::{CredentialStore, LocalCredentialStore};
pub use value_object::email::Email;
