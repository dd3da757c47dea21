//! Password Hashing and Verification
//!
//! Argon2id credential handling:
//! - [`ClearTextPassword`] validates and normalizes user input, zeroized on drop
//! - [`CredentialStore`] turns plaintext into a PHC hash and checks it back
//! - [`HashedPassword`] is the only form that ever reaches storage
//!
//! Hashing is deliberately slow (tens of milliseconds). Async callers should
//! run it on the blocking pool.

use std::fmt;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{self, SaltString},
};
use rand::rngs::OsRng;
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Upper bound on password length, in Unicode code points
pub const MAX_PASSWORD_LENGTH: usize = 128;

// ============================================================================
// Error Types
// ============================================================================

/// Password input rejected before hashing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("password is required")]
    Empty,

    #[error("password must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Password hashing/verification errors
#[derive(Debug, Error)]
pub enum PasswordHashError {
    /// Salt generation or the hasher itself failed (entropy/resource exhaustion)
    #[error("password hashing failed: {0}")]
    HashingFailed(String),

    /// Stored hash is not a readable PHC string
    #[error("stored password hash is corrupt")]
    InvalidHashFormat,
}

// ============================================================================
// Clear Text Password (Zeroized on drop)
// ============================================================================

/// Clear text password with automatic memory zeroization
///
/// Not `Clone`, and `Debug` is redacted.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    /// Validate and NFKC-normalize a raw password.
    ///
    /// The only policy is presence and a length cap. Any other character is
    /// accepted as typed; strength rules are left to clients.
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        let mut raw = raw;
        let normalized: String = raw.nfkc().collect();
        raw.zeroize();

        if normalized.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        let char_count = normalized.chars().count();
        if char_count > MAX_PASSWORD_LENGTH {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_LENGTH,
                actual: char_count,
            });
        }

        Ok(Self(normalized))
    }

    fn peppered(&self, pepper: Option<&[u8]>) -> Vec<u8> {
        let mut bytes = self.0.as_bytes().to_vec();
        if let Some(p) = pepper {
            bytes.extend_from_slice(p);
        }
        bytes
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password (Safe to store)
// ============================================================================

/// Argon2id hash in PHC string format (algorithm, params, salt and digest)
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored PHC string, rejecting anything unparseable
    pub fn from_phc_string(s: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = s.into();
        PasswordHash::new(&hash).map_err(|_| PasswordHashError::InvalidHashFormat)?;
        Ok(Self { hash })
    }

    pub fn as_phc_string(&self) -> &str {
        &self.hash
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Credential Store
// ============================================================================

/// One-way password hashing with an optional application-wide pepper.
///
/// Stateless apart from the pepper; never stores anything.
#[derive(Clone, Default)]
pub struct CredentialStore {
    pepper: Option<Vec<u8>>,
}

impl CredentialStore {
    pub fn new(pepper: Option<Vec<u8>>) -> Self {
        Self { pepper }
    }

    /// Hash with a fresh 128-bit salt and OWASP Argon2id defaults (m=19 MiB, t=2, p=1)
    pub fn hash(&self, password: &ClearTextPassword) -> Result<HashedPassword, PasswordHashError> {
        let mut bytes = password.peppered(self.pepper.as_deref());
        let salt = SaltString::generate(OsRng);

        let result = Argon2::default()
            .hash_password(&bytes, &salt)
            .map(|hash| HashedPassword {
                hash: hash.to_string(),
            })
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()));

        bytes.zeroize();
        result
    }

    /// Check a password against a stored hash.
    ///
    /// A wrong password is `Ok(false)`; only an unreadable hash is an error.
    pub fn verify(
        &self,
        password: &ClearTextPassword,
        hashed: &HashedPassword,
    ) -> Result<bool, PasswordHashError> {
        let parsed = PasswordHash::new(&hashed.hash)
            .map_err(|_| PasswordHashError::InvalidHashFormat)?;

        let mut bytes = password.peppered(self.pepper.as_deref());
        // Argon2 compares digests in constant time
        let outcome = Argon2::default().verify_password(&bytes, &parsed);
        bytes.zeroize();

        match outcome {
            Ok(()) => Ok(true),
            Err(password_hash::Error::Password) => Ok(false),
            Err(_) => Err(PasswordHashError::InvalidHashFormat),
        }
    }
}

impl fmt::Debug for CredentialStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialStore")
            .field("pepper", &self.pepper.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pw(s: &str) -> ClearTextPassword {
        ClearTextPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_short_password_is_allowed() {
        assert!(ClearTextPassword::new("pw".to_string()).is_ok());
    }

    #[test]
    fn test_password_empty() {
        let result = ClearTextPassword::new(String::new());
        assert!(matches!(result, Err(PasswordPolicyError::Empty)));
    }

    #[test]
    fn test_password_too_long() {
        let result = ClearTextPassword::new("a".repeat(MAX_PASSWORD_LENGTH + 1));
        assert!(matches!(result, Err(PasswordPolicyError::TooLong { .. })));
    }

    #[test]
    fn test_control_characters_are_accepted() {
        let store = CredentialStore::default();
        let hashed = store.hash(&pw("abc\u{0000}def\u{7f}")).unwrap();

        assert!(store.verify(&pw("abc\u{0000}def\u{7f}"), &hashed).unwrap());
        assert!(!store.verify(&pw("abcdef"), &hashed).unwrap());
    }

    #[test]
    fn test_hash_and_verify() {
        let store = CredentialStore::default();
        let hashed = store.hash(&pw("pw")).unwrap();

        assert!(store.verify(&pw("pw"), &hashed).unwrap());
        assert!(!store.verify(&pw("wrong"), &hashed).unwrap());
    }

    #[test]
    fn test_hash_is_salted() {
        let store = CredentialStore::default();
        let first = store.hash(&pw("pw")).unwrap();
        let second = store.hash(&pw("pw")).unwrap();

        assert_ne!(first, second);
        assert!(store.verify(&pw("pw"), &first).unwrap());
        assert!(store.verify(&pw("pw"), &second).unwrap());
    }

    #[test]
    fn test_nfkc_normalized_forms_verify() {
        let store = CredentialStore::default();
        // U+FF41 FULLWIDTH LATIN SMALL LETTER A normalizes to "a"
        let hashed = store.hash(&pw("\u{FF41}bc")).unwrap();
        assert!(store.verify(&pw("abc"), &hashed).unwrap());
    }

    #[test]
    fn test_pepper_must_match() {
        let peppered = CredentialStore::new(Some(b"pepper".to_vec()));
        let hashed = peppered.hash(&pw("pw")).unwrap();

        assert!(peppered.verify(&pw("pw"), &hashed).unwrap());
        assert!(!CredentialStore::default().verify(&pw("pw"), &hashed).unwrap());
        assert!(
            !CredentialStore::new(Some(b"other".to_vec()))
                .verify(&pw("pw"), &hashed)
                .unwrap()
        );
    }

    #[test]
    fn test_phc_string_roundtrip() {
        let store = CredentialStore::default();
        let hashed = store.hash(&pw("pw")).unwrap();

        let restored = HashedPassword::from_phc_string(hashed.as_phc_string()).unwrap();
        assert!(store.verify(&pw("pw"), &restored).unwrap());
    }

    #[test]
    fn test_corrupt_hash_is_an_error() {
        assert!(matches!(
            HashedPassword::from_phc_string("not_a_valid_hash"),
            Err(PasswordHashError::InvalidHashFormat)
        ));

        let corrupt = HashedPassword {
            hash: "plainly-not-phc".to_string(),
        };
        assert!(matches!(
            CredentialStore::default().verify(&pw("pw"), &corrupt),
            Err(PasswordHashError::InvalidHashFormat)
        ));
    }

    #[test]
    fn test_debug_redaction() {
        let debug_output = format!("{:?}", pw("secret"));
        assert!(debug_output.contains("REDACTED"));
        assert!(!debug_output.contains("secret"));

        let store = CredentialStore::new(Some(b"pepper".to_vec()));
        assert!(format!("{:?}", store).contains("REDACTED"));
    }
}
