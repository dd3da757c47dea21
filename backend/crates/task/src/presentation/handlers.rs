//! HTTP Handlers
//!
//! All routes sit behind the auth gate; the owner is the
//! [`AuthenticatedUser`] it resolved.

use std::sync::Arc;

use auth::AuthenticatedUser;
use axum::Json;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use kernel::id::TaskId;

use crate::application::{TaskUseCase, UpdateTaskInput};
use crate::domain::entity::Task;
use crate::domain::repository::TaskRepository;
use crate::error::TaskResult;
use crate::presentation::dto::{
    CreateTaskRequest, EmptyResponse, SearchQuery, TaskResponse, UpdateTaskRequest,
};

/// Shared state for task handlers
pub struct TaskAppState<R>
where
    R: TaskRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
}

impl<R> Clone for TaskAppState<R>
where
    R: TaskRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

impl<R> TaskAppState<R>
where
    R: TaskRepository + Send + Sync + 'static,
{
    fn use_case(&self) -> TaskUseCase<R> {
        TaskUseCase::new(self.repo.clone())
    }
}

fn to_responses(tasks: Vec<Task>) -> Json<Vec<TaskResponse>> {
    Json(tasks.into_iter().map(TaskResponse::from).collect())
}

/// GET /api/v1/tasks
pub async fn list_tasks<R>(
    State(state): State<TaskAppState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
) -> TaskResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + Send + Sync + 'static,
{
    let tasks = state.use_case().list(&user_id).await?;
    Ok(to_responses(tasks))
}

/// GET /api/v1/tasks/search?q=
pub async fn search_tasks<R>(
    State(state): State<TaskAppState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    query: Result<Query<SearchQuery>, QueryRejection>,
) -> TaskResult<Json<Vec<TaskResponse>>>
where
    R: TaskRepository + Send + Sync + 'static,
{
    let Query(query) = query?;
    let tasks = state.use_case().search(&user_id, &query.q).await?;
    Ok(to_responses(tasks))
}

/// POST /api/v1/tasks
pub async fn create_task<R>(
    State(state): State<TaskAppState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> TaskResult<Json<TaskResponse>>
where
    R: TaskRepository + Send + Sync + 'static,
{
    let Json(req) = payload?;
    let task = state.use_case().create(&user_id, req.title).await?;
    Ok(Json(task.into()))
}

/// PUT /api/v1/tasks/{task_id}
pub async fn update_task<R>(
    State(state): State<TaskAppState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    task_id: Result<Path<TaskId>, PathRejection>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> TaskResult<Json<TaskResponse>>
where
    R: TaskRepository + Send + Sync + 'static,
{
    let Path(task_id) = task_id?;
    let Json(req) = payload?;

    let task = state
        .use_case()
        .update(
            &user_id,
            &task_id,
            UpdateTaskInput {
                title: req.title,
                is_done: req.is_done,
            },
        )
        .await?;
    Ok(Json(task.into()))
}

/// DELETE /api/v1/tasks/{task_id}
pub async fn delete_task<R>(
    State(state): State<TaskAppState<R>>,
    AuthenticatedUser(user_id): AuthenticatedUser,
    task_id: Result<Path<TaskId>, PathRejection>,
) -> TaskResult<Json<EmptyResponse>>
where
    R: TaskRepository + Send + Sync + 'static,
{
    let Path(task_id) = task_id?;
    state.use_case().delete(&user_id, &task_id).await?;
    Ok(Json(EmptyResponse::default()))
}
