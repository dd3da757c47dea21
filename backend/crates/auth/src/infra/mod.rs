//! Infrastructure Layer
//!
//! Repository implementations: in-memory for development and tests,
//! PostgreSQL for deployments.

pub mod memory;
pub mod postgres;

pub use memory::MemoryAuthRepository;
pub use postgres::PgAuthRepository;
