//! Domain Layer

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::Task;
pub use repository::TaskRepository;
pub use value_object::TaskTitle;
