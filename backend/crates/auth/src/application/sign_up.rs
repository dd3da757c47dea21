//! Sign Up Use Case
//!
//! Registers a user name with an Argon2id password hash.

use std::sync::Arc;

use kernel::id::UserId;
use platform::password::{ClearTextPassword, CredentialStore};

use crate::domain::repository::CredentialRepository;
use crate::domain::value_object::user_name::UserName;
use crate::error::AuthResult;

/// Sign up input
pub struct SignUpInput {
    pub user_name: String,
    pub password: String,
}

/// Sign up output
#[derive(Debug)]
pub struct SignUpOutput {
    pub user_id: UserId,
}

/// Sign up use case
pub struct SignUpUseCase<R>
where
    R: CredentialRepository,
{
    repo: Arc<R>,
    credentials: CredentialStore,
}

impl<R> SignUpUseCase<R>
where
    R: CredentialRepository,
{
    pub fn new(repo: Arc<R>, credentials: CredentialStore) -> Self {
        Self { repo, credentials }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        let user_name = UserName::new(&input.user_name)?;
        let password = ClearTextPassword::new(input.password)?;

        let credentials = self.credentials.clone();
        let password_hash =
            tokio::task::spawn_blocking(move || credentials.hash(&password)).await??;

        let user_id = self
            .repo
            .create_credential(&user_name, &password_hash)
            .await?;

        tracing::info!(user_id = %user_id, "User signed up");

        Ok(SignUpOutput { user_id })
    }
}
