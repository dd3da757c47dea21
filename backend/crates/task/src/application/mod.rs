//! Application Layer

pub mod tasks;

pub use tasks::{TaskUseCase, UpdateTaskInput};
