//! Task Entity

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};

use crate::domain::value_object::TaskTitle;

#[derive(Debug, Clone)]
pub struct Task {
    pub task_id: TaskId,
    /// Owner; tasks are only ever visible to this user
    pub user_id: UserId,
    pub title: TaskTitle,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    pub fn new(user_id: UserId, title: TaskTitle) -> Self {
        Self {
            task_id: TaskId::new(),
            user_id,
            title,
            is_done: false,
            created_at: Utc::now(),
        }
    }

    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        self.user_id == *user_id
    }
}
