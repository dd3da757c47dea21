//! Router Assembly

use std::sync::Arc;

use auth::domain::repository::{CredentialRepository, UserRepository};
use auth::{AuthConfig, AuthGate, SessionTransport, TokenIssuer, auth_router};
use axum::http::{HeaderValue, Method, header};
use axum::{Router, routing::get};
use task::domain::repository::TaskRepository;
use task::{OwnedTasks, task_router};
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};

/// Versioned API routes plus `/ping`, without the outer HTTP layers
pub fn router<A, K, T>(
    auth_repo: Arc<A>,
    task_repo: Arc<K>,
    issuer: Arc<TokenIssuer>,
    transport: T,
    config: &AuthConfig,
) -> Router
where
    A: CredentialRepository + UserRepository + Send + Sync + 'static,
    K: TaskRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    tracing::info!(transport = transport.name(), "Session transport selected");

    let gate = AuthGate::new(issuer.clone(), transport.clone());
    let owned_tasks = Arc::new(OwnedTasks::new(task_repo.clone()));
    let api = auth_router(auth_repo, owned_tasks, issuer, transport, config)
        .merge(task_router(task_repo, gate));

    Router::new()
        .route("/ping", get(ping))
        .nest("/api/v1", api)
}

async fn ping() -> &'static str {
    "pong"
}

/// CORS for the browser frontend; credentials are allowed for the cookie transport
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}
