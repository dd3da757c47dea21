//! Task Error Types
//!
//! Task-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

use crate::domain::value_object::TaskTitleError;

/// Task-specific result type alias
pub type TaskResult<T> = Result<T, TaskError>;

#[derive(Debug, Error)]
pub enum TaskError {
    /// Missing, or owned by another user
    #[error("task not found")]
    TaskNotFound,

    /// The owner no longer exists (account deleted while a token was live)
    #[error("user not found")]
    OwnerNotFound,

    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl TaskError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            TaskError::TaskNotFound | TaskError::OwnerNotFound => ErrorKind::NotFound,
            TaskError::BadRequest(_) => ErrorKind::BadRequest,
            TaskError::Database(_) | TaskError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        AppError::new(self.kind(), self.to_string())
    }

    fn log(&self) {
        match self {
            TaskError::Database(e) => tracing::error!(error = %e, "Task database error"),
            TaskError::Internal(msg) => tracing::error!(message = %msg, "Task internal error"),
            _ => tracing::debug!(error = %self, "Task error"),
        }
    }
}

impl From<TaskError> for AppError {
    fn from(err: TaskError) -> Self {
        match err {
            TaskError::Database(e) => AppError::from(e),
            other => other.to_app_error(),
        }
    }
}

impl IntoResponse for TaskError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<TaskTitleError> for TaskError {
    fn from(err: TaskTitleError) -> Self {
        TaskError::BadRequest(format!("invalid request body: {err}"))
    }
}

impl From<JsonRejection> for TaskError {
    fn from(rejection: JsonRejection) -> Self {
        TaskError::BadRequest(AppError::from(rejection).message().to_string())
    }
}

impl From<PathRejection> for TaskError {
    fn from(rejection: PathRejection) -> Self {
        TaskError::BadRequest(format!("invalid task id: {}", rejection.body_text()))
    }
}

impl From<QueryRejection> for TaskError {
    fn from(rejection: QueryRejection) -> Self {
        TaskError::BadRequest(format!("invalid query: {}", rejection.body_text()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(TaskError::TaskNotFound.kind().status_code(), 404);
        assert_eq!(TaskError::BadRequest("x".into()).kind().status_code(), 400);
        assert_eq!(TaskError::Internal("x".into()).kind().status_code(), 500);
    }

    #[test]
    fn test_pool_timeout_is_service_unavailable() {
        let response = TaskError::Database(sqlx::Error::PoolTimedOut).into_response();
        assert_eq!(response.status().as_u16(), 503);
    }

    #[test]
    fn test_internal_detail_is_hidden() {
        let app = TaskError::Internal("pool exhausted".into()).to_app_error();
        assert_eq!(app.public_message(), "Internal server error");
    }
}
