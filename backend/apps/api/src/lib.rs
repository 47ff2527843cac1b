//! Marina API
//!
//! Wires the identity and booking crates into one HTTP application. The
//! binary in `main.rs` only reads configuration and picks the storage.

pub mod app;
pub mod config;

pub use app::{marina_app, marina_app_generic};
pub use config::ServerConfig;

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
