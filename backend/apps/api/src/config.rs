//! Process Configuration
//!
//! Read once at startup from the environment (after `.env` is loaded).

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, bail};
use auth::AuthConfig;

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:31113";
const DEFAULT_FRONTEND_ORIGINS: &str = "http://localhost:40922,http://127.0.0.1:40922";

/// Where session tokens travel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransportKind {
    /// `jwt` HttpOnly cookie
    #[default]
    Cookie,
    /// `Authorization: Bearer`
    Bearer,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind_addr: SocketAddr,
    /// Absent: in-memory repositories
    pub database_url: Option<String>,
    pub transport: TransportKind,
    pub frontend_origins: Vec<String>,
    pub auth: AuthConfig,
}

impl ApiConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let bind_addr = get("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR must be a socket address")?;

        let transport = match get("SESSION_TRANSPORT").as_deref().map(str::trim) {
            None | Some("cookie") => TransportKind::Cookie,
            Some("bearer") => TransportKind::Bearer,
            Some(other) => bail!("SESSION_TRANSPORT must be `cookie` or `bearer`, got `{other}`"),
        };

        let mut auth = AuthConfig::default();
        if let Some(secs) = get("TOKEN_TTL_SECS") {
            let secs: u64 = secs
                .trim()
                .parse()
                .context("TOKEN_TTL_SECS must be a whole number of seconds")?;
            if secs == 0 {
                bail!("TOKEN_TTL_SECS must be positive");
            }
            auth.token_ttl = Duration::from_secs(secs);
        }
        if let Some(secure) = get("COOKIE_SECURE") {
            auth.cookie_secure = secure
                .trim()
                .parse()
                .context("COOKIE_SECURE must be `true` or `false`")?;
        }
        auth.password_pepper = get("PASSWORD_PEPPER").map(String::into_bytes);

        let frontend_origins = get("FRONTEND_ORIGINS")
            .unwrap_or_else(|| DEFAULT_FRONTEND_ORIGINS.to_string())
            .split(',')
            .map(|origin| origin.trim().to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Ok(Self {
            bind_addr,
            database_url: get("DATABASE_URL"),
            transport,
            frontend_origins,
            auth,
        })
    }
}
