//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// Credential persistence used by sign-up, sign-in and password changes
#[trait_variant::make(CredentialRepository: Send)]
pub trait LocalCredentialRepository {
    /// Look up the credential for a user name
    async fn resolve_credential(&self, user_name: &UserName) -> AuthResult<Option<Credential>>;

    /// Create a user with the given hash; `UserNameTaken` if the name exists
    async fn create_credential(
        &self,
        user_name: &UserName,
        password_hash: &HashedPassword,
    ) -> AuthResult<UserId>;

    /// Replace the stored hash; `UserNotFound` if the user is gone
    async fn update_credential_password(
        &self,
        user_id: &UserId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()>;
}

/// User profile persistence
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>>;

    /// Rename; `UserNameTaken` if another user holds the name
    async fn update_name(&self, user_id: &UserId, user_name: &UserName) -> AuthResult<()>;

    /// Delete the user and their credential
    async fn delete(&self, user_id: &UserId) -> AuthResult<()>;
}

/// Per-user data kept outside the auth store, removed when the account is
/// deleted
#[trait_variant::make(OwnedDataRepository: Send)]
pub trait LocalOwnedDataRepository {
    async fn delete_owned_by(&self, user_id: &UserId) -> AuthResult<()>;
}

/// Nothing to remove
impl OwnedDataRepository for () {
    async fn delete_owned_by(&self, _user_id: &UserId) -> AuthResult<()> {
        Ok(())
    }
}
