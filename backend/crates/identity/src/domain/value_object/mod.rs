//! Value Object Module

pub mod email;
pub mod person_name;
pub mod user_password;

/// User identifiers are shared with the booking crate through the kernel
pub use kernel::id::UserId;
