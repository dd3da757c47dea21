//! Account Use Case
//!
//! Operations on the signed-in user's own account.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::{ClearTextPassword, CredentialStore};

use crate::domain::repository::{CredentialRepository, OwnedDataRepository, UserRepository};
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Public view of the user
#[derive(Debug, Clone)]
pub struct ProfileOutput {
    pub user_id: UserId,
    pub user_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub struct AccountUseCase<R>
where
    R: CredentialRepository + UserRepository,
{
    repo: Arc<R>,
    credentials: CredentialStore,
}

impl<R> AccountUseCase<R>
where
    R: CredentialRepository + UserRepository,
{
    pub fn new(repo: Arc<R>, credentials: CredentialStore) -> Self {
        Self { repo, credentials }
    }

    pub async fn profile(&self, user_id: &UserId) -> AuthResult<ProfileOutput> {
        let user = UserRepository::find_by_id(&*self.repo, user_id)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        Ok(ProfileOutput {
            user_id: user.user_id,
            user_name: user.user_name.into_inner(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        })
    }

    pub async fn rename(&self, user_id: &UserId, user_name: String) -> AuthResult<()> {
        let user_name = UserName::new(user_name)?;
        self.repo.update_name(user_id, &user_name).await?;

        tracing::info!(user_id = %user_id, "User renamed");
        Ok(())
    }

    /// Re-hash on the blocking pool and replace the stored credential
    pub async fn change_password(&self, user_id: &UserId, password: String) -> AuthResult<()> {
        let password = ClearTextPassword::new(password)?;

        let credentials = self.credentials.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || credentials.hash(&password)).await??;

        self.repo
            .update_credential_password(user_id, &password_hash)
            .await?;

        tracing::info!(user_id = %user_id, "Password changed");
        Ok(())
    }

    /// Delete the account, then everything `owned` holds for it.
    ///
    /// Outstanding tokens keep verifying until they expire, but every lookup
    /// for the user then answers `UserNotFound`.
    pub async fn quit<O>(&self, user_id: &UserId, owned: &O) -> AuthResult<()>
    where
        O: OwnedDataRepository + Sync,
    {
        self.repo.delete(user_id).await?;
        owned.delete_owned_by(user_id).await?;

        tracing::info!(user_id = %user_id, "User deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::infra::memory::MemoryAuthRepository;

    async fn setup() -> (AccountUseCase<MemoryAuthRepository>, Arc<MemoryAuthRepository>, UserId) {
        let repo = Arc::new(MemoryAuthRepository::new());
        let user_id = SignUpUseCase::new(repo.clone(), CredentialStore::default())
            .execute(SignUpInput {
                user_name: "alice".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap()
            .user_id;

        (
            AccountUseCase::new(repo.clone(), CredentialStore::default()),
            repo,
            user_id,
        )
    }

    #[tokio::test]
    async fn test_profile() {
        let (account, _, user_id) = setup().await;
        let profile = account.profile(&user_id).await.unwrap();

        assert_eq!(profile.user_id, user_id);
        assert_eq!(profile.user_name, "alice");
    }

    #[tokio::test]
    async fn test_rename_and_conflict() {
        let (account, repo, user_id) = setup().await;
        SignUpUseCase::new(repo, CredentialStore::default())
            .execute(SignUpInput {
                user_name: "bob".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap();

        account.rename(&user_id, "alicia".to_string()).await.unwrap();
        assert_eq!(account.profile(&user_id).await.unwrap().user_name, "alicia");

        assert!(matches!(
            account.rename(&user_id, "bob".to_string()).await,
            Err(AuthError::UserNameTaken)
        ));
        assert!(matches!(
            account.rename(&user_id, String::new()).await,
            Err(AuthError::BadRequest(_))
        ));
    }

    #[tokio::test]
    async fn test_change_password_replaces_hash() {
        let (account, repo, user_id) = setup().await;
        let name = UserName::new("alice").unwrap();
        let before = repo.resolve_credential(&name).await.unwrap().unwrap();

        account
            .change_password(&user_id, "new secret".to_string())
            .await
            .unwrap();

        let after = repo.resolve_credential(&name).await.unwrap().unwrap();
        let store = CredentialStore::default();
        assert_ne!(before.password_hash, after.password_hash);
        assert!(store
            .verify(
                &ClearTextPassword::new("new secret".to_string()).unwrap(),
                &after.password_hash
            )
            .unwrap());
    }

    #[derive(Default)]
    struct RecordingOwnedData {
        deleted: tokio::sync::Mutex<Vec<UserId>>,
    }

    impl OwnedDataRepository for RecordingOwnedData {
        async fn delete_owned_by(&self, user_id: &UserId) -> AuthResult<()> {
            self.deleted.lock().await.push(*user_id);
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_quit_removes_user() {
        let (account, repo, user_id) = setup().await;
        account.quit(&user_id, &()).await.unwrap();

        assert!(matches!(
            account.profile(&user_id).await,
            Err(AuthError::UserNotFound)
        ));
        assert!(repo
            .resolve_credential(&UserName::new("alice").unwrap())
            .await
            .unwrap()
            .is_none());
        assert!(matches!(
            account.quit(&user_id, &()).await,
            Err(AuthError::UserNotFound)
        ));
    }

    #[tokio::test]
    async fn test_quit_removes_owned_data_once() {
        let (account, _, user_id) = setup().await;
        let owned = RecordingOwnedData::default();

        account.quit(&user_id, &owned).await.unwrap();
        assert_eq!(*owned.deleted.lock().await, vec![user_id]);

        // A second quit fails on the user and leaves owned data alone
        assert!(account.quit(&user_id, &owned).await.is_err());
        assert_eq!(owned.deleted.lock().await.len(), 1);
    }
}
