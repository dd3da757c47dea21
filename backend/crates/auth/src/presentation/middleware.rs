//! Auth Gate
//!
//! Middleware that admits a request only with a valid session token and
//! hands the resolved user to downstream handlers.

use std::sync::Arc;

use axum::extract::{FromRequestParts, Request, State};
use axum::http::HeaderMap;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::application::token::TokenIssuer;
use crate::error::{AuthError, AuthResult};
use crate::presentation::transport::SessionTransport;

/// The signed-in user, inserted into request extensions by [`require_auth`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser(pub UserId);

impl<S> FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .copied()
            .ok_or_else(|| AuthError::Internal("route is not behind the auth gate".to_string()))
    }
}

/// Transport plus issuer: everything needed to authenticate a request
pub struct AuthGate<T: SessionTransport> {
    issuer: Arc<TokenIssuer>,
    transport: T,
}

impl<T: SessionTransport> Clone for AuthGate<T> {
    fn clone(&self) -> Self {
        Self {
            issuer: self.issuer.clone(),
            transport: self.transport.clone(),
        }
    }
}

impl<T: SessionTransport> AuthGate<T> {
    pub fn new(issuer: Arc<TokenIssuer>, transport: T) -> Self {
        Self { issuer, transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn authenticate(&self, headers: &HeaderMap) -> AuthResult<UserId> {
        self.authenticate_at(headers, Utc::now())
    }

    /// Extract, verify, then parse the subject
    pub fn authenticate_at(&self, headers: &HeaderMap, now: DateTime<Utc>) -> AuthResult<UserId> {
        let token = self.transport.extract(headers)?;
        let claims = self.issuer.verify_at(&token, now)?;

        // A well-signed token with a bad subject means this server minted garbage
        claims
            .user_id
            .parse::<UserId>()
            .map_err(|e| AuthError::Internal(format!("token subject is not a user id: {e}")))
    }

    /// Error response for a rejected request
    pub fn reject(&self, err: AuthError) -> Response {
        err.log();

        let kind = if matches!(err, AuthError::MissingSession) {
            self.transport.missing_session_kind()
        } else {
            err.kind()
        };
        err.to_app_error_as(kind).into_response()
    }
}

/// Middleware for `axum::middleware::from_fn_with_state`.
///
/// On success the request gains an [`AuthenticatedUser`] extension; on
/// failure the next handler never runs.
pub async fn require_auth<T: SessionTransport>(
    State(gate): State<AuthGate<T>>,
    mut req: Request,
    next: Next,
) -> Response {
    match gate.authenticate(req.headers()) {
        Ok(user_id) => {
            tracing::debug!(
                user_id = %user_id,
                transport = gate.transport.name(),
                "Request authenticated"
            );
            req.extensions_mut().insert(AuthenticatedUser(user_id));
            next.run(req).await
        }
        Err(err) => gate.reject(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::signing_secret::SigningSecret;
    use crate::presentation::transport::BearerHeader;
    use crate::presentation::transport::HttpCookie;
    use axum::http::{HeaderValue, StatusCode, header};
    use platform::cookie::CookieConfig;
    use std::time::Duration;

    const TTL: Duration = Duration::from_secs(3 * 3600);

    fn issuer() -> Arc<TokenIssuer> {
        Arc::new(TokenIssuer::new(
            Arc::new(SigningSecret::from_bytes([3; 32])),
            TTL,
        ))
    }

    fn bearer(token: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {token}")).unwrap(),
        );
        headers
    }

    #[test]
    fn test_authenticate_resolves_user() {
        let issuer = issuer();
        let gate = AuthGate::new(issuer.clone(), BearerHeader);
        let user_id = UserId::new();
        let token = issuer.issue(&user_id).unwrap().token;

        assert_eq!(gate.authenticate(&bearer(&token)).unwrap(), user_id);
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        let issuer = issuer();
        let gate = AuthGate::new(issuer.clone(), BearerHeader);
        let issued = issuer.issue(&UserId::new()).unwrap();

        let err = gate
            .authenticate_at(&bearer(&issued.token), issued.expires_at)
            .unwrap_err();
        assert_eq!(gate.reject(err).status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_missing_session_status_depends_on_transport() {
        let bearer_gate = AuthGate::new(issuer(), BearerHeader);
        let cookie_gate = AuthGate::new(issuer(), HttpCookie::new(CookieConfig::default()));

        let err = bearer_gate.authenticate(&HeaderMap::new()).unwrap_err();
        assert_eq!(bearer_gate.reject(err).status(), StatusCode::BAD_REQUEST);

        let err = cookie_gate.authenticate(&HeaderMap::new()).unwrap_err();
        assert_eq!(cookie_gate.reject(err).status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_bad_subject_is_server_error() {
        let issuer = issuer();
        let gate = AuthGate::new(issuer.clone(), BearerHeader);

        // Sign claims whose subject is not a UUID
        let token = jsonwebtoken::encode(
            &jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256),
            &serde_json::json!({ "user_id": "alice", "exp": 4102444800_i64 }),
            &jsonwebtoken::EncodingKey::from_secret(&[3; 32]),
        )
        .unwrap();

        let err = gate.authenticate(&bearer(&token)).unwrap_err();
        assert!(matches!(err, AuthError::Internal(_)));
        assert_eq!(gate.reject(err).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
