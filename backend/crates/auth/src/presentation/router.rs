//! Auth Router

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{delete, get, patch, post},
};

use crate::application::config::AuthConfig;
use crate::application::token::TokenIssuer;
use crate::domain::repository::{CredentialRepository, OwnedDataRepository, UserRepository};
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthGate, require_auth};
use crate::presentation::transport::SessionTransport;

/// Create the auth router for any repository and transport.
///
/// `/auth/*` is public; `/users/*` sits behind the auth gate. `owned` is
/// cleared for a user when their account is deleted.
pub fn auth_router<R, O, T>(
    repo: Arc<R>,
    owned: Arc<O>,
    issuer: Arc<TokenIssuer>,
    transport: T,
    config: &AuthConfig,
) -> Router
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let gate = AuthGate::new(issuer.clone(), transport.clone());
    let state = AuthAppState {
        repo,
        owned,
        issuer,
        transport,
        credentials: config.credential_store(),
    };

    let users = Router::new()
        .route("/users/me", get(handlers::me::<R, O, T>))
        .route("/users/name", patch(handlers::rename::<R, O, T>))
        .route("/users/password", patch(handlers::change_password::<R, O, T>))
        .route("/users/quit", delete(handlers::quit::<R, O, T>))
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<T>));

    Router::new()
        .route("/auth/signup", post(handlers::sign_up::<R, O, T>))
        .route("/auth/signin", post(handlers::sign_in::<R, O, T>))
        .route("/auth/signout", post(handlers::sign_out::<R, O, T>))
        .merge(users)
        .with_state(state)
}
