//! Session Transports
//!
//! How a session token travels between client and server. The auth gate and
//! the sign-in/sign-out handlers are generic over [`SessionTransport`].

use axum::Json;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use chrono::{DateTime, Utc};
use kernel::error::kind::ErrorKind;
use platform::bearer::{BearerCredential, extract_bearer};
use platform::cookie::{CookieConfig, extract_cookie, set_cookie_header};
use serde_json::json;

use crate::application::token::IssuedToken;
use crate::error::{AuthError, AuthResult};

/// Cookie value written on sign-out
pub const EXPIRED_COOKIE_VALUE: &str = "expired";

/// Moves a session token into responses and out of requests
pub trait SessionTransport: Clone + Send + Sync + 'static {
    fn name(&self) -> &'static str;

    /// The candidate token string, or `MissingSession` when none is offered
    fn extract(&self, headers: &HeaderMap) -> AuthResult<String>;

    /// Status used when no token is offered
    fn missing_session_kind(&self) -> ErrorKind;

    /// Sign-in success response carrying the token
    fn attach(&self, issued: &IssuedToken) -> AuthResult<Response>;

    /// Sign-out response
    fn detach(&self, now: DateTime<Utc>) -> AuthResult<Response>;
}

// ============================================================================
// Bearer Header
// ============================================================================

/// `Authorization: Bearer <token>`; the token is returned in the sign-in body
#[derive(Debug, Clone, Copy, Default)]
pub struct BearerHeader;

impl SessionTransport for BearerHeader {
    fn name(&self) -> &'static str {
        "bearer"
    }

    fn extract(&self, headers: &HeaderMap) -> AuthResult<String> {
        match extract_bearer(headers) {
            BearerCredential::Token(token) => Ok(token.to_string()),
            BearerCredential::Absent => Err(AuthError::MissingSession),
            BearerCredential::Unsupported => Err(AuthError::MalformedToken),
        }
    }

    fn missing_session_kind(&self) -> ErrorKind {
        ErrorKind::BadRequest
    }

    fn attach(&self, issued: &IssuedToken) -> AuthResult<Response> {
        Ok((StatusCode::OK, Json(json!({ "token": issued.token }))).into_response())
    }

    /// Nothing to clear server-side; the client drops its copy
    fn detach(&self, _now: DateTime<Utc>) -> AuthResult<Response> {
        Ok((StatusCode::OK, Json(json!({}))).into_response())
    }
}

// ============================================================================
// HTTP Cookie
// ============================================================================

/// HttpOnly cookie (`jwt` by default) that expires with the token
#[derive(Debug, Clone)]
pub struct HttpCookie {
    cookie: CookieConfig,
}

impl HttpCookie {
    pub fn new(cookie: CookieConfig) -> Self {
        Self { cookie }
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie.name
    }

    fn with_cookie(&self, cookie: String) -> AuthResult<Response> {
        let value = set_cookie_header(&cookie)
            .ok_or_else(|| AuthError::Internal("unencodable Set-Cookie header".to_string()))?;

        Ok((StatusCode::OK, [(header::SET_COOKIE, value)], Json(json!({}))).into_response())
    }
}

impl SessionTransport for HttpCookie {
    fn name(&self) -> &'static str {
        "cookie"
    }

    fn extract(&self, headers: &HeaderMap) -> AuthResult<String> {
        extract_cookie(headers, &self.cookie.name)
            .filter(|value| !value.is_empty())
            .ok_or(AuthError::MissingSession)
    }

    fn missing_session_kind(&self) -> ErrorKind {
        ErrorKind::Unauthorized
    }

    fn attach(&self, issued: &IssuedToken) -> AuthResult<Response> {
        self.with_cookie(
            self.cookie
                .build_set_cookie(&issued.token, issued.expires_at),
        )
    }

    fn detach(&self, now: DateTime<Utc>) -> AuthResult<Response> {
        self.with_cookie(self.cookie.build_expired_cookie(EXPIRED_COOKIE_VALUE, now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use chrono::TimeZone;

    fn cookie_transport() -> HttpCookie {
        HttpCookie::new(CookieConfig {
            name: "jwt".to_string(),
            ..CookieConfig::default()
        })
    }

    fn headers(name: header::HeaderName, value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(name, HeaderValue::from_str(value).unwrap());
        headers
    }

    fn set_cookie(response: &Response) -> String {
        response
            .headers()
            .get(header::SET_COOKIE)
            .unwrap()
            .to_str()
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_bearer_extract() {
        let transport = BearerHeader;

        assert_eq!(
            transport
                .extract(&headers(header::AUTHORIZATION, "bearer abc.def.ghi"))
                .unwrap(),
            "abc.def.ghi"
        );
        assert!(matches!(
            transport.extract(&HeaderMap::new()),
            Err(AuthError::MissingSession)
        ));
        assert!(matches!(
            transport.extract(&headers(header::AUTHORIZATION, "Bearer ")),
            Err(AuthError::MissingSession)
        ));
        assert!(matches!(
            transport.extract(&headers(header::AUTHORIZATION, "Basic dXNlcjpwdw==")),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn test_cookie_extract() {
        let transport = cookie_transport();

        assert_eq!(
            transport
                .extract(&headers(header::COOKIE, "theme=dark; jwt=abc.def.ghi"))
                .unwrap(),
            "abc.def.ghi"
        );
        assert!(matches!(
            transport.extract(&HeaderMap::new()),
            Err(AuthError::MissingSession)
        ));
        assert!(matches!(
            transport.extract(&headers(header::COOKIE, "jwt=")),
            Err(AuthError::MissingSession)
        ));
        // An Authorization header is ignored by the cookie transport
        assert!(matches!(
            transport.extract(&headers(header::AUTHORIZATION, "Bearer abc")),
            Err(AuthError::MissingSession)
        ));
    }

    #[test]
    fn test_missing_session_statuses() {
        assert_eq!(BearerHeader.missing_session_kind().status_code(), 400);
        assert_eq!(cookie_transport().missing_session_kind().status_code(), 401);
    }

    #[test]
    fn test_cookie_attach_and_detach() {
        let transport = cookie_transport();
        let expires_at = Utc.with_ymd_and_hms(2030, 1, 2, 15, 0, 0).unwrap();
        let issued = IssuedToken {
            token: "abc.def.ghi".to_string(),
            expires_at,
        };

        let response = transport.attach(&issued).unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            set_cookie(&response),
            "jwt=abc.def.ghi; Path=/; HttpOnly; SameSite=Lax; Expires=Wed, 02 Jan 2030 15:00:00 GMT"
        );

        let response = transport.detach(expires_at).unwrap();
        assert_eq!(
            set_cookie(&response),
            "jwt=expired; Path=/; HttpOnly; SameSite=Lax; Expires=Wed, 02 Jan 2030 14:00:00 GMT"
        );
    }

    #[test]
    fn test_bearer_attach_sets_no_cookie() {
        let issued = IssuedToken {
            token: "abc.def.ghi".to_string(),
            expires_at: Utc::now(),
        };
        let response = BearerHeader.attach(&issued).unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::SET_COOKIE).is_none());
    }
}
