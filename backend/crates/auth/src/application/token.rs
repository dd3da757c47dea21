//! Token Issuer
//!
//! Mints and verifies HS256 session tokens in compact JWS form:
//! `base64url(header) "." base64url(claims) "." base64url(hmac)`.
//!
//! Validity is a pure function of (token, secret, time). Nothing is stored
//! server-side, so a token stays valid until its `exp` even after sign-out.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use kernel::id::UserId;

use crate::domain::value_object::{claims::Claims, signing_secret::SigningSecret};
use crate::error::{AuthError, AuthResult};

/// A freshly minted token and the instant it stops being accepted
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and checks session tokens with the process signing secret
#[derive(Debug, Clone)]
pub struct TokenIssuer {
    secret: Arc<SigningSecret>,
    default_ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: Arc<SigningSecret>, default_ttl: Duration) -> Self {
        Self {
            secret,
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Issue a token for `user_id` valid for the default TTL from now
    pub fn issue(&self, user_id: &UserId) -> AuthResult<IssuedToken> {
        self.issue_at(user_id, self.default_ttl, Utc::now())
    }

    pub fn issue_at(
        &self,
        user_id: &UserId,
        ttl: Duration,
        now: DateTime<Utc>,
    ) -> AuthResult<IssuedToken> {
        let ttl = TimeDelta::from_std(ttl)
            .map_err(|_| AuthError::Internal("token ttl out of range".to_string()))?;
        let expires_at = now
            .checked_add_signed(ttl)
            .and_then(ceil_to_second)
            .ok_or_else(|| AuthError::Internal("token expiry out of range".to_string()))?;

        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &Claims::new(user_id, expires_at),
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::Internal(format!("token signing failed: {e}")))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify a token against the current time
    pub fn verify(&self, token: &str) -> AuthResult<Claims> {
        self.verify_at(token, Utc::now())
    }

    /// Check structure, then signature, then expiry.
    ///
    /// The payload is not parsed until the MAC has been checked. Expiry is
    /// judged here against `now` rather than by the JWT library's clock.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> AuthResult<Claims> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &validation(),
        )
        .map_err(map_jwt_error)?;

        if data.claims.is_expired_at(now) {
            return Err(AuthError::TokenExpired);
        }

        Ok(data.claims)
    }
}

/// HS256 only; `exp` is checked by the caller
fn validation() -> Validation {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.validate_nbf = false;
    validation.validate_aud = false;
    validation.required_spec_claims = HashSet::new();
    validation
}

fn map_jwt_error(err: jsonwebtoken::errors::Error) -> AuthError {
    match err.kind() {
        JwtErrorKind::InvalidSignature => AuthError::InvalidSignature,
        JwtErrorKind::InvalidToken
        | JwtErrorKind::InvalidAlgorithm
        | JwtErrorKind::InvalidAlgorithmName
        | JwtErrorKind::MissingAlgorithm
        | JwtErrorKind::MissingRequiredClaim(_)
        | JwtErrorKind::Base64(_)
        | JwtErrorKind::Json(_)
        | JwtErrorKind::Utf8(_) => AuthError::MalformedToken,
        _ => AuthError::Internal(format!("token verification failed: {err}")),
    }
}

/// `exp` is carried in whole seconds. Rounding up keeps the token valid for
/// the full TTL when issued mid-second.
fn ceil_to_second(at: DateTime<Utc>) -> Option<DateTime<Utc>> {
    let secs = at.timestamp() + i64::from(at.timestamp_subsec_nanos() > 0);
    DateTime::from_timestamp(secs, 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
    use chrono::TimeZone;

    const TTL: Duration = Duration::from_secs(3 * 3600);

    fn issuer(seed: u8) -> TokenIssuer {
        TokenIssuer::new(Arc::new(SigningSecret::from_bytes([seed; 32])), TTL)
    }

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap()
    }

    fn b64(bytes: &[u8]) -> String {
        URL_SAFE_NO_PAD.encode(bytes)
    }

    /// Sign arbitrary header and claims text with the issuer's secret
    fn sign_raw(issuer: &TokenIssuer, header: &str, claims: &str) -> String {
        let input = format!("{}.{}", b64(header.as_bytes()), b64(claims.as_bytes()));
        let signature = jsonwebtoken::crypto::sign(
            input.as_bytes(),
            &EncodingKey::from_secret(issuer.secret.as_bytes()),
            Algorithm::HS256,
        )
        .unwrap();
        format!("{input}.{signature}")
    }

    #[test]
    fn test_roundtrip_returns_same_subject() {
        let issuer = issuer(1);
        let user_id = UserId::new();
        let issued = issuer.issue_at(&user_id, TTL, noon()).unwrap();

        assert_eq!(issued.token.split('.').count(), 3);
        assert_eq!(issued.expires_at, noon() + TimeDelta::hours(3));

        let claims = issuer
            .verify_at(&issued.token, noon() + TimeDelta::minutes(179))
            .unwrap();
        assert_eq!(claims.user_id, user_id.to_string());
        assert_eq!(claims.exp, issued.expires_at.timestamp());
    }

    #[test]
    fn test_header_is_hs256_jwt() {
        let issued = issuer(1).issue_at(&UserId::new(), TTL, noon()).unwrap();
        let header_b64 = issued.token.split('.').next().unwrap();
        let header: serde_json::Value =
            serde_json::from_slice(&URL_SAFE_NO_PAD.decode(header_b64).unwrap()).unwrap();

        assert_eq!(header, serde_json::json!({ "alg": "HS256", "typ": "JWT" }));
    }

    #[test]
    fn test_expired_at_and_after_exp() {
        let issuer = issuer(1);
        let issued = issuer.issue_at(&UserId::new(), TTL, noon()).unwrap();

        assert!(issuer
            .verify_at(&issued.token, issued.expires_at - TimeDelta::seconds(1))
            .is_ok());
        assert!(matches!(
            issuer.verify_at(&issued.token, issued.expires_at),
            Err(AuthError::TokenExpired)
        ));
        assert!(matches!(
            issuer.verify_at(&issued.token, issued.expires_at + TimeDelta::days(1)),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_mid_second_issue_is_valid_for_full_ttl() {
        let issuer = issuer(1);
        let issued_at = noon() + TimeDelta::milliseconds(600);
        let issued = issuer.issue_at(&UserId::new(), TTL, issued_at).unwrap();

        assert_eq!(issued.expires_at, noon() + TimeDelta::hours(3) + TimeDelta::seconds(1));

        let just_before = issued_at + TimeDelta::hours(3) - TimeDelta::milliseconds(1);
        assert!(issuer.verify_at(&issued.token, just_before).is_ok());
        assert!(matches!(
            issuer.verify_at(&issued.token, issued.expires_at),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_every_signature_alteration_is_rejected() {
        let issuer = issuer(1);
        let token = issuer.issue_at(&UserId::new(), TTL, noon()).unwrap().token;
        let signature_start = token.rfind('.').unwrap() + 1;

        for i in signature_start..token.len() {
            let mut altered = token.clone().into_bytes();
            altered[i] = if altered[i] == b'A' { b'B' } else { b'A' };
            let altered = String::from_utf8(altered).unwrap();

            assert!(
                matches!(
                    issuer.verify_at(&altered, noon()),
                    Err(AuthError::InvalidSignature)
                ),
                "alteration at {i} was accepted"
            );
        }
    }

    #[test]
    fn test_other_secret_is_invalid_signature() {
        let token = issuer(1).issue_at(&UserId::new(), TTL, noon()).unwrap().token;

        assert!(matches!(
            issuer(2).verify_at(&token, noon()),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_tampered_payload_is_invalid_signature() {
        let issuer = issuer(1);
        let token = issuer.issue_at(&UserId::new(), TTL, noon()).unwrap().token;
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = b64(
            format!(r#"{{"user_id":"{}","exp":4102444800}}"#, UserId::new()).as_bytes(),
        );
        parts[1] = &forged;

        assert!(matches!(
            issuer.verify_at(&parts.join("."), noon()),
            Err(AuthError::InvalidSignature)
        ));
    }

    #[test]
    fn test_malformed_structure() {
        let issuer = issuer(1);
        let token = issuer.issue_at(&UserId::new(), TTL, noon()).unwrap().token;
        let four_segments = format!("{token}.extra");

        for bad in ["", "abc", "a.b", "a.b.c.d", four_segments.as_str(), "!!.x.y"] {
            assert!(
                matches!(issuer.verify_at(bad, noon()), Err(AuthError::MalformedToken)),
                "{bad:?} was not malformed"
            );
        }
    }

    #[test]
    fn test_non_hs256_header_is_malformed() {
        let issuer = issuer(1);
        let claims = format!(r#"{{"user_id":"{}","exp":4102444800}}"#, UserId::new());

        let none_alg = sign_raw(&issuer, r#"{"alg":"none"}"#, &claims);
        assert!(matches!(
            issuer.verify_at(&none_alg, noon()),
            Err(AuthError::MalformedToken)
        ));

        let ok = sign_raw(&issuer, r#"{"alg":"HS256"}"#, &claims);
        assert!(issuer.verify_at(&ok, noon()).is_ok());
    }

    #[test]
    fn test_signed_garbage_payload_is_malformed() {
        let issuer = issuer(1);
        let token = sign_raw(&issuer, r#"{"alg":"HS256","typ":"JWT"}"#, "not json");

        assert!(matches!(
            issuer.verify_at(&token, noon()),
            Err(AuthError::MalformedToken)
        ));
    }

    #[test]
    fn test_issue_uses_default_ttl() {
        let issuer = issuer(1);
        let before = Utc::now();
        let issued = issuer.issue(&UserId::new()).unwrap();

        assert!(issued.expires_at >= before + TimeDelta::hours(3) - TimeDelta::seconds(1));
        assert!(issuer.verify(&issued.token).is_ok());
    }
}
