//! Repository Traits

use kernel::id::{TaskId, UserId};

use crate::domain::entity::Task;
use crate::domain::value_object::TaskTitle;
use crate::error::TaskResult;

/// Task persistence. Every lookup is scoped to an owner; a task belonging to
/// another user behaves as if it did not exist.
#[trait_variant::make(TaskRepository: Send)]
pub trait LocalTaskRepository {
    /// Tasks of `owner`, oldest first
    async fn list(&self, owner: &UserId) -> TaskResult<Vec<Task>>;

    /// Tasks of `owner` whose title contains `query`, ignoring case
    async fn search(&self, owner: &UserId, query: &str) -> TaskResult<Vec<Task>>;

    /// `OwnerNotFound` if the owner's account has been deleted
    async fn create(&self, task: &Task) -> TaskResult<()>;

    /// Replace title and done flag; `TaskNotFound` unless owned by `owner`
    async fn update(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        title: &TaskTitle,
        is_done: bool,
    ) -> TaskResult<Task>;

    /// `TaskNotFound` unless owned by `owner`
    async fn delete(&self, owner: &UserId, task_id: &TaskId) -> TaskResult<()>;

    /// Remove every task of `owner`; used when the account is deleted
    async fn delete_by_owner(&self, owner: &UserId) -> TaskResult<()>;
}
