//! Infrastructure Layer

pub mod memory;
pub mod owned;
pub mod postgres;

pub use memory::MemoryTaskRepository;
pub use owned::OwnedTasks;
pub use postgres::PgTaskRepository;
