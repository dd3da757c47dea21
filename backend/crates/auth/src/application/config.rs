//! Application Configuration
//!
//! Configuration for the Auth application layer. The signing secret is not
//! part of it: it is generated at startup and handed to [`TokenIssuer`].
//!
//! [`TokenIssuer`]: crate::application::token::TokenIssuer

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::password::CredentialStore;

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Default token lifetime (3 hours)
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(3 * 3600);

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub cookie_name: String,
    /// Token lifetime; the session cookie expires with it
    pub token_ttl: Duration,
    /// Whether to mark the cookie Secure
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            cookie_name: "jwt".to_string(),
            token_ttl: DEFAULT_TOKEN_TTL,
            cookie_secure: false,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Cookie settings for the `HttpCookie` transport
    pub fn cookie_config(&self) -> CookieConfig {
        CookieConfig {
            name: self.cookie_name.clone(),
            secure: self.cookie_secure,
            http_only: true,
            same_site: self.cookie_same_site,
            path: "/".to_string(),
        }
    }

    pub fn credential_store(&self) -> CredentialStore {
        CredentialStore::new(self.password_pepper.clone())
    }
}
