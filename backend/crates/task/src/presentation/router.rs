//! Task Router

use std::sync::Arc;

use auth::{AuthGate, SessionTransport, require_auth};
use axum::{
    Router, middleware,
    routing::{get, put},
};

use crate::domain::repository::TaskRepository;
use crate::presentation::handlers::{self, TaskAppState};

/// Create the task router. Every route requires a session.
pub fn task_router<R, T>(repo: Arc<R>, gate: AuthGate<T>) -> Router
where
    R: TaskRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let state = TaskAppState { repo };

    Router::new()
        .route(
            "/tasks",
            get(handlers::list_tasks::<R>).post(handlers::create_task::<R>),
        )
        .route("/tasks/search", get(handlers::search_tasks::<R>))
        .route(
            "/tasks/{task_id}",
            put(handlers::update_task::<R>).delete(handlers::delete_task::<R>),
        )
        .route_layer(middleware::from_fn_with_state(gate, require_auth::<T>))
        .with_state(state)
}
