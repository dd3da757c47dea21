//! Credential Entity

use kernel::id::UserId;
use platform::password::HashedPassword;

/// What sign-in resolves a user name to.
///
/// Owned by the repository; the auth layer only ever compares against it.
#[derive(Debug, Clone)]
pub struct Credential {
    pub user_id: UserId,
    pub password_hash: HashedPassword,
}
