//! In-Memory Repository Implementation

use std::collections::{HashMap, HashSet};

use kernel::id::{TaskId, UserId};
use tokio::sync::RwLock;

use crate::domain::entity::Task;
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::TaskTitle;
use crate::error::{TaskError, TaskResult};

#[derive(Debug, Default)]
struct State {
    tasks: HashMap<TaskId, Task>,
    /// Owners whose account was deleted. User ids are never reused, so a
    /// create for one of these is refused the way a foreign key would.
    deleted_owners: HashSet<UserId>,
}

/// In-memory task repository
#[derive(Debug, Default)]
pub struct MemoryTaskRepository {
    state: RwLock<State>,
}

impl MemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    async fn collect<F>(&self, owner: &UserId, filter: F) -> Vec<Task>
    where
        F: Fn(&Task) -> bool,
    {
        let state = self.state.read().await;
        let mut owned: Vec<Task> = state
            .tasks
            .values()
            .filter(|task| task.is_owned_by(owner) && filter(task))
            .cloned()
            .collect();

        owned.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.task_id.as_uuid().cmp(b.task_id.as_uuid()))
        });
        owned
    }
}

impl TaskRepository for MemoryTaskRepository {
    async fn list(&self, owner: &UserId) -> TaskResult<Vec<Task>> {
        Ok(self.collect(owner, |_| true).await)
    }

    async fn search(&self, owner: &UserId, query: &str) -> TaskResult<Vec<Task>> {
        Ok(self.collect(owner, |task| task.title.matches(query)).await)
    }

    async fn create(&self, task: &Task) -> TaskResult<()> {
        let mut state = self.state.write().await;

        if state.deleted_owners.contains(&task.user_id) {
            return Err(TaskError::OwnerNotFound);
        }

        state.tasks.insert(task.task_id, task.clone());
        Ok(())
    }

    async fn update(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        title: &TaskTitle,
        is_done: bool,
    ) -> TaskResult<Task> {
        let mut state = self.state.write().await;
        let task = state
            .tasks
            .get_mut(task_id)
            .filter(|task| task.is_owned_by(owner))
            .ok_or(TaskError::TaskNotFound)?;

        task.title = title.clone();
        task.is_done = is_done;
        Ok(task.clone())
    }

    async fn delete(&self, owner: &UserId, task_id: &TaskId) -> TaskResult<()> {
        let mut state = self.state.write().await;

        let owned = state
            .tasks
            .get(task_id)
            .is_some_and(|task| task.is_owned_by(owner));
        if !owned {
            return Err(TaskError::TaskNotFound);
        }

        state.tasks.remove(task_id);
        Ok(())
    }

    async fn delete_by_owner(&self, owner: &UserId) -> TaskResult<()> {
        let mut state = self.state.write().await;

        state.tasks.retain(|_, task| !task.is_owned_by(owner));
        state.deleted_owners.insert(*owner);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn task(owner: &UserId, title: &str) -> Task {
        Task::new(*owner, TaskTitle::new(title).unwrap())
    }

    #[tokio::test]
    async fn test_delete_by_owner_leaves_other_owners() {
        let repo = MemoryTaskRepository::new();
        let alice = UserId::new();
        let bob = UserId::new();

        repo.create(&task(&alice, "a1")).await.unwrap();
        repo.create(&task(&alice, "a2")).await.unwrap();
        repo.create(&task(&bob, "b1")).await.unwrap();

        repo.delete_by_owner(&alice).await.unwrap();

        assert!(repo.list(&alice).await.unwrap().is_empty());
        assert_eq!(repo.list(&bob).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_create_for_deleted_owner_is_refused() {
        let repo = MemoryTaskRepository::new();
        let alice = UserId::new();

        repo.delete_by_owner(&alice).await.unwrap();

        assert!(matches!(
            repo.create(&task(&alice, "late")).await,
            Err(TaskError::OwnerNotFound)
        ));
        assert!(repo.list(&alice).await.unwrap().is_empty());
    }
}
