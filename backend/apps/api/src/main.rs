//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod app;
mod config;


use std::sync::Arc;

use anyhow::Context;
use auth::{
    BearerHeader, HttpCookie, MemoryAuthRepository, PgAuthRepository, SigningSecret, TokenIssuer,
};
use sqlx::postgres::PgPoolOptions;
use task::{MemoryTaskRepository, PgTaskRepository};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{ApiConfig, TransportKind};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "api=info,auth=info,task=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ApiConfig::from_env()?;

    // One secret per process: every token dies with the process
    let secret = SigningSecret::generate().context("failed to generate signing secret")?;
    let issuer = Arc::new(TokenIssuer::new(Arc::new(secret), config.auth.token_ttl));

    let pool = match &config.database_url {
        Some(database_url) => {
            let pool = PgPoolOptions::new()
                .max_connections(5)
                .connect(database_url)
                .await?;

            tracing::info!("Connected to database");

            sqlx::migrate!("../../database/migrations").run(&pool).await?;

            tracing::info!("Migrations completed");
            Some(pool)
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            None
        }
    };

    let cookie = HttpCookie::new(config.auth.cookie_config());
    let api = match (pool, config.transport) {
        (Some(pool), TransportKind::Cookie) => app::router(
            Arc::new(PgAuthRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
            issuer,
            cookie,
            &config.auth,
        ),
        (Some(pool), TransportKind::Bearer) => app::router(
            Arc::new(PgAuthRepository::new(pool.clone())),
            Arc::new(PgTaskRepository::new(pool)),
            issuer,
            BearerHeader,
            &config.auth,
        ),
        (None, TransportKind::Cookie) => app::router(
            Arc::new(MemoryAuthRepository::new()),
            Arc::new(MemoryTaskRepository::new()),
            issuer,
            cookie,
            &config.auth,
        ),
        (None, TransportKind::Bearer) => app::router(
            Arc::new(MemoryAuthRepository::new()),
            Arc::new(MemoryTaskRepository::new()),
            issuer,
            BearerHeader,
            &config.auth,
        ),
    };

    let app = api
        .layer(TraceLayer::new_for_http())
        .layer(app::cors_layer(&config.frontend_origins));

    // Start server
    let listener = TcpListener::bind(config.bind_addr).await?;
    tracing::info!("Listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
