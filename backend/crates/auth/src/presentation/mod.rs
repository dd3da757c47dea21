//! Presentation Layer
//!
//! Session transports, the auth gate, HTTP handlers and the router.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod transport;

pub use handlers::AuthAppState;
pub use middleware::{AuthGate, AuthenticatedUser, require_auth};
pub use router::auth_router;
pub use transport::{BearerHeader, HttpCookie, SessionTransport};
