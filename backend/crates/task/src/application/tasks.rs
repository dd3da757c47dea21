//! Task Use Cases
//!
//! Owner-scoped task operations. The owner always comes from the
//! authenticated session, never from the request body.

use std::sync::Arc;

use kernel::id::{TaskId, UserId};

use crate::domain::entity::Task;
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::TaskTitle;
use crate::error::TaskResult;

pub struct UpdateTaskInput {
    pub title: String,
    pub is_done: bool,
}

pub struct TaskUseCase<R>
where
    R: TaskRepository,
{
    repo: Arc<R>,
}

impl<R> TaskUseCase<R>
where
    R: TaskRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, owner: &UserId) -> TaskResult<Vec<Task>> {
        self.repo.list(owner).await
    }

    pub async fn search(&self, owner: &UserId, query: &str) -> TaskResult<Vec<Task>> {
        self.repo.search(owner, query.trim()).await
    }

    pub async fn create(&self, owner: &UserId, title: String) -> TaskResult<Task> {
        let task = Task::new(*owner, TaskTitle::new(title)?);
        self.repo.create(&task).await?;

        tracing::info!(user_id = %owner, task_id = %task.task_id, "Task created");
        Ok(task)
    }

    pub async fn update(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        input: UpdateTaskInput,
    ) -> TaskResult<Task> {
        let title = TaskTitle::new(input.title)?;
        let task = self
            .repo
            .update(owner, task_id, &title, input.is_done)
            .await?;

        tracing::info!(
            user_id = %owner,
            task_id = %task_id,
            is_done = input.is_done,
            "Task updated"
        );
        Ok(task)
    }

    pub async fn delete(&self, owner: &UserId, task_id: &TaskId) -> TaskResult<()> {
        self.repo.delete(owner, task_id).await?;

        tracing::info!(user_id = %owner, task_id = %task_id, "Task deleted");
        Ok(())
    }
}
