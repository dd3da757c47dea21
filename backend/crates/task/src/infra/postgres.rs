//! PostgreSQL Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{TaskId, UserId};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::entity::Task;
use crate::domain::repository::TaskRepository;
use crate::domain::value_object::TaskTitle;
use crate::error::{TaskError, TaskResult};

/// PostgreSQL-backed task repository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Escape `LIKE` wildcards so the query is matched literally
fn like_pattern(query: &str) -> String {
    let escaped = query
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

impl TaskRepository for PgTaskRepository {
    async fn list(&self, owner: &UserId) -> TaskResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, user_id, title, is_done, created_at
            FROM tasks
            WHERE user_id = $1
            ORDER BY created_at, task_id
            "#,
        )
        .bind(owner.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    async fn search(&self, owner: &UserId, query: &str) -> TaskResult<Vec<Task>> {
        let rows = sqlx::query_as::<_, TaskRow>(
            r#"
            SELECT task_id, user_id, title, is_done, created_at
            FROM tasks
            WHERE user_id = $1 AND title ILIKE $2
            ORDER BY created_at, task_id
            "#,
        )
        .bind(owner.as_uuid())
        .bind(like_pattern(query))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }

    async fn create(&self, task: &Task) -> TaskResult<()> {
        sqlx::query(
            r#"
            INSERT INTO tasks (task_id, user_id, title, is_done, created_at)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(task.task_id.as_uuid())
        .bind(task.user_id.as_uuid())
        .bind(task.title.as_str())
        .bind(task.is_done)
        .bind(task.created_at)
        .execute(&self.pool)
        .await
        .map_err(|err| match &err {
            sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                TaskError::OwnerNotFound
            }
            _ => TaskError::Database(err),
        })?;

        Ok(())
    }

    async fn update(
        &self,
        owner: &UserId,
        task_id: &TaskId,
        title: &TaskTitle,
        is_done: bool,
    ) -> TaskResult<Task> {
        let row = sqlx::query_as::<_, TaskRow>(
            r#"
            UPDATE tasks
            SET title = $3, is_done = $4
            WHERE task_id = $1 AND user_id = $2
            RETURNING task_id, user_id, title, is_done, created_at
            "#,
        )
        .bind(task_id.as_uuid())
        .bind(owner.as_uuid())
        .bind(title.as_str())
        .bind(is_done)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(TaskError::TaskNotFound)?.into_task()
    }

    async fn delete(&self, owner: &UserId, task_id: &TaskId) -> TaskResult<()> {
        let result = sqlx::query("DELETE FROM tasks WHERE task_id = $1 AND user_id = $2")
            .bind(task_id.as_uuid())
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(TaskError::TaskNotFound);
        }

        Ok(())
    }

    /// Usually a no-op: `ON DELETE CASCADE` has already run with the user delete
    async fn delete_by_owner(&self, owner: &UserId) -> TaskResult<()> {
        sqlx::query("DELETE FROM tasks WHERE user_id = $1")
            .bind(owner.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[derive(sqlx::FromRow)]
struct TaskRow {
    task_id: Uuid,
    user_id: Uuid,
    title: String,
    is_done: bool,
    created_at: DateTime<Utc>,
}

impl TaskRow {
    fn into_task(self) -> TaskResult<Task> {
        let title = TaskTitle::new(&self.title)
            .map_err(|e| TaskError::Internal(format!("Invalid title: {}", e)))?;

        Ok(Task {
            task_id: TaskId::from_uuid(self.task_id),
            user_id: UserId::from_uuid(self.user_id),
            title,
            is_done: self.is_done,
            created_at: self.created_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("report"), "%report%");
        assert_eq!(like_pattern("100%"), "%100\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
