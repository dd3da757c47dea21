//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};
use serde::{Deserialize, Serialize};

use crate::domain::entity::Task;

#[derive(Debug, Clone, Serialize)]
pub struct TaskResponse {
    pub id: TaskId,
    pub user_id: UserId,
    pub title: String,
    pub is_done: bool,
    pub created_at: DateTime<Utc>,
}

impl From<Task> for TaskResponse {
    fn from(task: Task) -> Self {
        Self {
            id: task.task_id,
            user_id: task.user_id,
            title: task.title.as_str().to_string(),
            is_done: task.is_done,
            created_at: task.created_at,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTaskRequest {
    pub title: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: String,
    #[serde(default)]
    pub is_done: bool,
}

/// `GET /tasks/search?q=`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `{}` acknowledgement
#[derive(Debug, Clone, Default, Serialize)]
pub struct EmptyResponse {}
