//! `Authorization: Bearer` header parsing

use axum::http::{HeaderMap, header};

/// Outcome of reading the `Authorization` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BearerCredential<'a> {
    /// No header, or a Bearer scheme with nothing after it
    Absent,
    /// Header present but not a usable Bearer credential
    Unsupported,
    Token(&'a str),
}

/// Read a bearer token from `Authorization`.
///
/// The scheme is matched case-insensitively (RFC 7235).
pub fn extract_bearer(headers: &HeaderMap) -> BearerCredential<'_> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return BearerCredential::Absent;
    };

    let Ok(value) = value.to_str() else {
        return BearerCredential::Unsupported;
    };

    let value = value.trim();
    if value.is_empty() {
        return BearerCredential::Absent;
    }

    let (scheme, rest) = value.split_once(' ').unwrap_or((value, ""));
    if !scheme.eq_ignore_ascii_case("bearer") {
        return BearerCredential::Unsupported;
    }

    match rest.trim() {
        "" => BearerCredential::Absent,
        token => BearerCredential::Token(token),
    }
}
