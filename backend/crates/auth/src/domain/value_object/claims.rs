//! Token Claims
//!
//! The signed payload of a session token.

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

/// Claims embedded in a session token.
///
/// Wire form: `{"user_id":"<uuid>","exp":<unix seconds>}`. Issued-at is not
/// carried; it is `exp - ttl`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject, as the string form of the user's UUID
    pub user_id: String,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: &UserId, expires_at: DateTime<Utc>) -> Self {
        Self {
            user_id: user_id.to_string(),
            exp: expires_at.timestamp(),
        }
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.exp, 0)
    }

    /// Valid strictly before `exp`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now.timestamp() >= self.exp
    }
}
