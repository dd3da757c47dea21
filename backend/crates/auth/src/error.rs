//! Auth Error Types
//!
//! Auth-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::extract::rejection::JsonRejection;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use thiserror::Error;

use crate::domain::value_object::user_name::UserNameError;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

/// Auth-specific error variants
#[derive(Debug, Error)]
pub enum AuthError {
    /// No token offered by the request
    #[error("authentication required")]
    MissingSession,

    /// Token present but not a parseable signed token
    #[error("malformed token")]
    MalformedToken,

    /// Token signature does not match the process secret
    #[error("invalid token signature")]
    InvalidSignature,

    /// Signature valid but `exp` has passed
    #[error("token expired")]
    TokenExpired,

    /// Stored password hash cannot be read
    #[error("stored credential is corrupt")]
    CorruptCredential,

    /// Password hashing failed (entropy or resource exhaustion)
    #[error("password hashing failed: {0}")]
    HashingFailure(String),

    /// Signing secret could not be generated
    #[error("signing secret unavailable: {0}")]
    SecretUnavailable(String),

    /// Unknown user or wrong password
    #[error("invalid user name or password")]
    InvalidCredentials,

    #[error("user not found")]
    UserNotFound,

    #[error("user name already exists")]
    UserNameTaken,

    /// Request body or field rejected
    #[error("{0}")]
    BadRequest(String),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error.
    ///
    /// `MissingSession` defaults to 401; the auth gate substitutes the status of
    /// the transport in use.
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::MissingSession | AuthError::TokenExpired => ErrorKind::Unauthorized,
            AuthError::MalformedToken | AuthError::InvalidSignature => ErrorKind::BadRequest,
            AuthError::InvalidCredentials => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken => ErrorKind::Conflict,
            AuthError::BadRequest(_) => ErrorKind::BadRequest,
            AuthError::CorruptCredential
            | AuthError::HashingFailure(_)
            | AuthError::SecretUnavailable(_)
            | AuthError::Database(_)
            | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError with the given kind.
    ///
    /// 5xx details are dropped from the public message by `AppError`.
    pub fn to_app_error_as(&self, kind: ErrorKind) -> AppError {
        AppError::new(kind, self.to_string())
    }

    pub fn to_app_error(&self) -> AppError {
        self.to_app_error_as(self.kind())
    }

    /// Log the error with appropriate level
    pub(crate) fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::CorruptCredential => {
                tracing::error!("Stored password hash could not be parsed");
            }
            AuthError::HashingFailure(msg)
            | AuthError::SecretUnavailable(msg)
            | AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid sign-in attempt");
            }
            AuthError::InvalidSignature => {
                tracing::warn!("Token with invalid signature rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

/// Database failures take the kernel's classification, so an exhausted pool
/// answers 503 rather than 500.
impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Database(e) => AppError::from(e),
            other => other.to_app_error(),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        match err {
            PasswordHashError::HashingFailed(msg) => AuthError::HashingFailure(msg),
            PasswordHashError::InvalidHashFormat => AuthError::CorruptCredential,
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::BadRequest(format!("invalid request body: {err}"))
    }
}

impl From<UserNameError> for AuthError {
    fn from(err: UserNameError) -> Self {
        AuthError::BadRequest(format!("invalid request body: {err}"))
    }
}

impl From<JsonRejection> for AuthError {
    fn from(rejection: JsonRejection) -> Self {
        AuthError::BadRequest(AppError::from(rejection).message().to_string())
    }
}

impl From<tokio::task::JoinError> for AuthError {
    fn from(err: tokio::task::JoinError) -> Self {
        AuthError::Internal(format!("blocking task failed: {err}"))
    }
}
