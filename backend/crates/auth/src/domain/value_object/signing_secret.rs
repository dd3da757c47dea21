//! Signing Secret Value Object
//!
//! The process-wide HMAC key for session tokens. Generated once before the
//! server starts, then shared read-only behind an `Arc`.

use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::error::{AuthError, AuthResult};

/// Length of the signing key in bytes (HMAC-SHA256 output size)
pub const SIGNING_SECRET_LEN: usize = 32;

/// Random HMAC key. Never persisted; `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SigningSecret([u8; SIGNING_SECRET_LEN]);

impl SigningSecret {
    /// Draw a fresh key from the OS CSPRNG.
    ///
    /// Failure means the host has no usable entropy; callers abort startup.
    pub fn generate() -> AuthResult<Self> {
        let bytes = platform::crypto::try_random_bytes(SIGNING_SECRET_LEN)
            .map_err(|e| AuthError::SecretUnavailable(e.to_string()))?;

        let mut key = [0u8; SIGNING_SECRET_LEN];
        key.copy_from_slice(&bytes);
        Ok(Self(key))
    }

    /// Use a fixed key (tests, or a key shared across replicas)
    pub fn from_bytes(bytes: [u8; SIGNING_SECRET_LEN]) -> Self {
        Self(bytes)
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for SigningSecret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningSecret").field(&"[REDACTED]").finish()
    }
}
