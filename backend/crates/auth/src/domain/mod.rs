//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{credential::Credential, user::User};
pub use repository::{CredentialRepository, OwnedDataRepository, UserRepository};
pub use value_object::{claims::Claims, user_name::UserName};
