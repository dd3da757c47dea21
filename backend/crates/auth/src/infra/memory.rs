//! In-Memory Repository Implementation
//!
//! Process-local store used when no database is configured. Contents are lost
//! on restart, as are the signing secret and every token.

use std::collections::HashMap;

use chrono::Utc;
use kernel::id::UserId;
use platform::password::HashedPassword;
use tokio::sync::RwLock;

use crate::domain::entity::{credential::Credential, user::User};
use crate::domain::repository::{CredentialRepository, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

#[derive(Debug)]
struct StoredUser {
    user: User,
    password_hash: HashedPassword,
}

#[derive(Debug, Default)]
struct State {
    users: HashMap<UserId, StoredUser>,
    by_name: HashMap<UserName, UserId>,
}

/// In-memory auth repository
#[derive(Debug, Default)]
pub struct MemoryAuthRepository {
    state: RwLock<State>,
}

impl MemoryAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

// ============================================================================
// Credential Repository Implementation
// ============================================================================

impl CredentialRepository for MemoryAuthRepository {
    async fn resolve_credential(&self, user_name: &UserName) -> AuthResult<Option<Credential>> {
        let state = self.state.read().await;

        Ok(state
            .by_name
            .get(user_name)
            .and_then(|user_id| state.users.get(user_id))
            .map(|stored| Credential {
                user_id: stored.user.user_id,
                password_hash: stored.password_hash.clone(),
            }))
    }

    async fn create_credential(
        &self,
        user_name: &UserName,
        password_hash: &HashedPassword,
    ) -> AuthResult<UserId> {
        let mut state = self.state.write().await;

        if state.by_name.contains_key(user_name) {
            return Err(AuthError::UserNameTaken);
        }

        let user = User::new(user_name.clone());
        let user_id = user.user_id;
        state.by_name.insert(user_name.clone(), user_id);
        state.users.insert(
            user_id,
            StoredUser {
                user,
                password_hash: password_hash.clone(),
            },
        );

        Ok(user_id)
    }

    async fn update_credential_password(
        &self,
        user_id: &UserId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()> {
        let mut state = self.state.write().await;
        let stored = state.users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;

        stored.password_hash = password_hash.clone();
        stored.user.updated_at = Utc::now();
        Ok(())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for MemoryAuthRepository {
    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(user_id).map(|stored| stored.user.clone()))
    }

    async fn update_name(&self, user_id: &UserId, user_name: &UserName) -> AuthResult<()> {
        let mut state = self.state.write().await;

        match state.by_name.get(user_name) {
            Some(owner) if owner == user_id => return Ok(()),
            Some(_) => return Err(AuthError::UserNameTaken),
            None => {}
        }

        let stored = state.users.get_mut(user_id).ok_or(AuthError::UserNotFound)?;
        let old_name = stored.user.user_name.clone();
        stored.user.set_user_name(user_name.clone());

        state.by_name.remove(&old_name);
        state.by_name.insert(user_name.clone(), *user_id);
        Ok(())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<()> {
        let mut state = self.state.write().await;
        let stored = state.users.remove(user_id).ok_or(AuthError::UserNotFound)?;

        state.by_name.remove(&stored.user.user_name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::{ClearTextPassword, CredentialStore};

    fn hash(password: &str) -> HashedPassword {
        CredentialStore::default()
            .hash(&ClearTextPassword::new(password.to_string()).unwrap())
            .unwrap()
    }

    fn name(s: &str) -> UserName {
        UserName::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_resolve() {
        let repo = MemoryAuthRepository::new();
        let password_hash = hash("pw");
        let user_id = repo.create_credential(&name("alice"), &password_hash).await.unwrap();

        let credential = repo.resolve_credential(&name("alice")).await.unwrap().unwrap();
        assert_eq!(credential.user_id, user_id);
        assert_eq!(credential.password_hash, password_hash);

        assert!(repo.resolve_credential(&name("bob")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_names_are_unique() {
        let repo = MemoryAuthRepository::new();
        let password_hash = hash("pw");
        repo.create_credential(&name("alice"), &password_hash).await.unwrap();

        assert!(matches!(
            repo.create_credential(&name("alice"), &password_hash).await,
            Err(AuthError::UserNameTaken)
        ));
    }

    #[tokio::test]
    async fn test_rename_frees_old_name() {
        let repo = MemoryAuthRepository::new();
        let password_hash = hash("pw");
        let user_id = repo.create_credential(&name("alice"), &password_hash).await.unwrap();

        repo.update_name(&user_id, &name("alicia")).await.unwrap();
        // Renaming to the current name is a no-op
        repo.update_name(&user_id, &name("alicia")).await.unwrap();

        assert!(repo.resolve_credential(&name("alice")).await.unwrap().is_none());
        assert!(repo.resolve_credential(&name("alicia")).await.unwrap().is_some());
        repo.create_credential(&name("alice"), &password_hash).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_user() {
        let repo = MemoryAuthRepository::new();
        let ghost = UserId::new();

        assert!(repo.find_by_id(&ghost).await.unwrap().is_none());
        assert!(matches!(
            repo.update_credential_password(&ghost, &hash("pw")).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(matches!(repo.delete(&ghost).await, Err(AuthError::UserNotFound)));
    }
}
