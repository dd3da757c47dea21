//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations for the auth layer:
//! - OS randomness
//! - Password hashing (Argon2id)
//! - Cookie building and parsing
//! - `Authorization: Bearer` parsing

pub mod bearer;
pub mod cookie;
pub mod crypto;
pub mod password;
