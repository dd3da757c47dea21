//! Sign In Use Case
//!
//! Checks a user name and password, then mints a session token.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, CredentialStore};

use crate::application::token::{IssuedToken, TokenIssuer};
use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub user_name: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    pub user_id: UserId,
    pub issued: IssuedToken,
}

/// Sign in use case
pub struct SignInUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    credentials: CredentialStore,
    issuer: Arc<TokenIssuer>,
}

impl<R> SignInUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, credentials: CredentialStore, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            repo,
            credentials,
            issuer,
        }
    }

    /// Unknown user, malformed input and wrong password all answer
    /// `InvalidCredentials`.
    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user_name =
            UserName::new(&input.user_name).map_err(|_| AuthError::InvalidCredentials)?;
        let password =
            ClearTextPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let credential = self
            .repo
            .resolve_credential(&user_name)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let credentials = self.credentials.clone();
        let password_hash = credential.password_hash;
        let matches =
            tokio::task::spawn_blocking(move || credentials.verify(&password, &password_hash))
                .await??;

        if !matches {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self.issuer.issue(&credential.user_id)?;

        tracing::info!(user_id = %credential.user_id, "User signed in");

        Ok(SignInOutput {
            user_id: credential.user_id,
            issued,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::sign_up::{SignUpInput, SignUpUseCase};
    use crate::domain::value_object::signing_secret::SigningSecret;
    use crate::infra::memory::MemoryAuthRepository;
    use std::time::Duration;

    async fn setup() -> (SignInUseCase<MemoryAuthRepository>, Arc<TokenIssuer>, UserId) {
        let repo = Arc::new(MemoryAuthRepository::new());
        let issuer = Arc::new(TokenIssuer::new(
            Arc::new(SigningSecret::from_bytes([9; 32])),
            Duration::from_secs(3 * 3600),
        ));

        let user_id = SignUpUseCase::new(repo.clone(), CredentialStore::default())
            .execute(SignUpInput {
                user_name: "alice".to_string(),
                password: "pw".to_string(),
            })
            .await
            .unwrap()
            .user_id;

        (
            SignInUseCase::new(repo, CredentialStore::default(), issuer.clone()),
            issuer,
            user_id,
        )
    }

    fn input(name: &str, password: &str) -> SignInInput {
        SignInInput {
            user_name: name.to_string(),
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn test_sign_in_issues_token_for_user() {
        let (use_case, issuer, user_id) = setup().await;
        let output = use_case.execute(input("alice", "pw")).await.unwrap();

        assert_eq!(output.user_id, user_id);
        let claims = issuer.verify(&output.issued.token).unwrap();
        assert_eq!(claims.user_id, user_id.to_string());
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_user_look_alike() {
        let (use_case, _, _) = setup().await;

        let wrong = use_case.execute(input("alice", "nope")).await.unwrap_err();
        let unknown = use_case.execute(input("mallory", "pw")).await.unwrap_err();

        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    #[tokio::test]
    async fn test_concurrent_sign_ins_get_independent_tokens() {
        let (use_case, issuer, _) = setup().await;
        let (a, b) = tokio::join!(
            use_case.execute(input("alice", "pw")),
            use_case.execute(input("alice", "pw"))
        );

        assert!(issuer.verify(&a.unwrap().issued.token).is_ok());
        assert!(issuer.verify(&b.unwrap().issued.token).is_ok());
    }
}
