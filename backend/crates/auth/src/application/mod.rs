//! Application Layer
//!
//! Token issuing and account use cases.

pub mod account;
pub mod config;
pub mod sign_in;
pub mod sign_up;
pub mod token;

// Re-exports
pub use account::{AccountUseCase, ProfileOutput};
pub use config::AuthConfig;
pub use sign_in::{SignInInput, SignInUseCase};
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
pub use token::{IssuedToken, TokenIssuer};
