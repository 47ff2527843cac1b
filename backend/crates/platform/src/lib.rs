//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations with no domain knowledge:
//! - Cryptographic utilities (secure randomness, base64 secrets)
//! - Password hashing (Argon2id, configurable policy and cost)
//! - Signed, time-limited bearer tokens (HS256 JWT)
//! - Token transport helpers (cookie and `Authorization` header)

pub mod cookie;
pub mod crypto;
pub mod password;
pub mod token;
