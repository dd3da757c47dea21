//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::response::Response;
use chrono::Utc;
use platform::password::CredentialStore;

use crate::application::token::TokenIssuer;
use crate::application::{
    AccountUseCase, SignInInput, SignInUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::{CredentialRepository, OwnedDataRepository, UserRepository};
use crate::error::AuthResult;
use crate::presentation::dto::{
    ChangePasswordRequest, CredentialsRequest, EmptyResponse, ProfileResponse, RenameRequest,
    SignUpResponse,
};
use crate::presentation::middleware::AuthenticatedUser;
use crate::presentation::transport::SessionTransport;

/// Shared state for auth handlers
pub struct AuthAppState<R, O, T>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    pub repo: Arc<R>,
    /// Removed with the account on quit
    pub owned: Arc<O>,
    pub issuer: Arc<TokenIssuer>,
    pub transport: T,
    pub credentials: CredentialStore,
}

impl<R, O, T> Clone for AuthAppState<R, O, T>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            owned: self.owned.clone(),
            issuer: self.issuer.clone(),
            transport: self.transport.clone(),
            credentials: self.credentials.clone(),
        }
    }
}

// ============================================================================
// Sign Up
// ============================================================================

/// POST /api/v1/auth/signup
pub async fn sign_up<R, O, T>(
    State(state): State<AuthAppState<R, O, T>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Json<SignUpResponse>>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let Json(req) = payload?;
    let use_case = SignUpUseCase::new(state.repo.clone(), state.credentials.clone());

    let output = use_case
        .execute(SignUpInput {
            user_name: req.name,
            password: req.password,
        })
        .await?;

    Ok(Json(SignUpResponse { id: output.user_id }))
}

// ============================================================================
// Sign In / Sign Out
// ============================================================================

/// POST /api/v1/auth/signin
pub async fn sign_in<R, O, T>(
    State(state): State<AuthAppState<R, O, T>>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> AuthResult<Response>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let Json(req) = payload?;
    let use_case = SignInUseCase::new(
        state.repo.clone(),
        state.credentials.clone(),
        state.issuer.clone(),
    );

    let output = use_case
        .execute(SignInInput {
            user_name: req.name,
            password: req.password,
        })
        .await?;

    state.transport.attach(&output.issued)
}

/// POST /api/v1/auth/signout
///
/// Only clears client state; the token itself stays valid until it expires.
pub async fn sign_out<R, O, T>(State(state): State<AuthAppState<R, O, T>>) -> AuthResult<Response>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    state.transport.detach(Utc::now())
}

// ============================================================================
// Users
// ============================================================================

/// GET /api/v1/users/me
pub async fn me<R, O, T>(
    State(state): State<AuthAppState<R, O, T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> AuthResult<Json<ProfileResponse>>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.credentials.clone());
    let profile = use_case.profile(&user_id).await?;

    Ok(Json(profile.into()))
}

/// PATCH /api/v1/users/name
pub async fn rename<R, O, T>(
    State(state): State<AuthAppState<R, O, T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    payload: Result<Json<RenameRequest>, JsonRejection>,
) -> AuthResult<Json<EmptyResponse>>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let Json(req) = payload?;
    let use_case = AccountUseCase::new(state.repo.clone(), state.credentials.clone());
    use_case.rename(&user_id, req.name).await?;

    Ok(Json(EmptyResponse::default()))
}

/// PATCH /api/v1/users/password
pub async fn change_password<R, O, T>(
    State(state): State<AuthAppState<R, O, T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    payload: Result<Json<ChangePasswordRequest>, JsonRejection>,
) -> AuthResult<Json<EmptyResponse>>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let Json(req) = payload?;
    let use_case = AccountUseCase::new(state.repo.clone(), state.credentials.clone());
    use_case.change_password(&user_id, req.password).await?;

    Ok(Json(EmptyResponse::default()))
}

/// DELETE /api/v1/users/quit
///
/// Deletes the user and everything they own.
pub async fn quit<R, O, T>(
    State(state): State<AuthAppState<R, O, T>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> AuthResult<Json<EmptyResponse>>
where
    R: CredentialRepository + UserRepository + Send + Sync + 'static,
    O: OwnedDataRepository + Send + Sync + 'static,
    T: SessionTransport,
{
    let use_case = AccountUseCase::new(state.repo.clone(), state.credentials.clone());
    use_case.quit(&user_id, &*state.owned).await?;

    Ok(Json(EmptyResponse::default()))
}
