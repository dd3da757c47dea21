//! Account Deletion Hook
//!
//! Lets the auth crate remove a user's tasks when the account is deleted.

use std::sync::Arc;

use auth::domain::repository::OwnedDataRepository;
use auth::{AuthError, AuthResult};
use kernel::id::UserId;

use crate::domain::repository::TaskRepository;
use crate::error::TaskError;

/// The tasks held by `R`, seen as data owned by a user
pub struct OwnedTasks<R> {
    repo: Arc<R>,
}

impl<R> OwnedTasks<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }
}

impl<R> OwnedDataRepository for OwnedTasks<R>
where
    R: TaskRepository + Send + Sync,
{
    async fn delete_owned_by(&self, user_id: &UserId) -> AuthResult<()> {
        self.repo
            .delete_by_owner(user_id)
            .await
            .map_err(|err| match err {
                TaskError::Database(e) => AuthError::Database(e),
                other => AuthError::Internal(format!("task cleanup failed: {other}")),
            })?;

        tracing::info!(user_id = %user_id, "Tasks of deleted user removed");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Task;
    use crate::domain::value_object::TaskTitle;
    use crate::infra::memory::MemoryTaskRepository;

    #[tokio::test]
    async fn test_delete_owned_by_clears_tasks() {
        let repo = Arc::new(MemoryTaskRepository::new());
        let owner = UserId::new();
        repo.create(&Task::new(owner, TaskTitle::new("t1").unwrap()))
            .await
            .unwrap();

        OwnedTasks::new(repo.clone())
            .delete_owned_by(&owner)
            .await
            .unwrap();

        assert!(repo.list(&owner).await.unwrap().is_empty());
    }
}
