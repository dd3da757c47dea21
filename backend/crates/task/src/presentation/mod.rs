//! Presentation Layer

pub mod dto;
pub mod handlers;
pub mod router;

pub use handlers::TaskAppState;
pub use router::task_router;
