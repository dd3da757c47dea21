//! Task Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Task entity, title value object, repository trait
//! - `application/` - Task use cases, always scoped to one owner
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - HTTP handlers behind the auth gate
//!
//! Every operation takes the owner from the authenticated session. A task
//! that exists but belongs to someone else is reported as not found.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{TaskError, TaskResult};
pub use infra::memory::MemoryTaskRepository;
pub use infra::owned::OwnedTasks;
pub use infra::postgres::PgTaskRepository;
pub use presentation::router::task_router;
