//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Token issuing and account use cases
//! - `infra/` - In-memory and PostgreSQL repositories
//! - `presentation/` - Session transports, the auth gate, HTTP handlers
//!
//! ## Features
//! - Sign up / sign in with user name + password
//! - Stateless HS256 tokens carried as a bearer header or a `jwt` cookie
//! - Account endpoints for the authenticated user
//!
//! ## Security Model
//! - Passwords hashed with Argon2id on the blocking pool
//! - Tokens signed with a random per-process secret; restarting the process
//!   invalidates every outstanding token
//! - No server-side revocation: signing out only clears client state, a copied
//!   token stays valid until its `exp`

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::token::{IssuedToken, TokenIssuer};
pub use domain::value_object::signing_secret::SigningSecret;
pub use error::{AuthError, AuthResult};
pub use infra::memory::MemoryAuthRepository;
pub use infra::postgres::PgAuthRepository;
pub use presentation::middleware::{AuthGate, AuthenticatedUser, require_auth};
pub use presentation::router::auth_router;
pub use presentation::transport::{BearerHeader, HttpCookie, SessionTransport};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::AppError,
    kind::ErrorKind,
};
