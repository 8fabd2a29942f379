//! Task endpoints (bearer token required)
//!
//! - `GET /api/tasks` - List the requester's tasks, newest first
//! - `POST /api/tasks` - Create a task
//! - `GET /api/tasks/:id` - Read one task
//! - `PUT /api/tasks/:id` - Partially update a task
//! - `DELETE /api/tasks/:id` - Delete a task
//!
//! The owner always comes from the bearer token. Any `owner`, `user` or
//! `userId` field in a request body is ignored.

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Extension, Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taskbook_shared::{
    auth::middleware::AuthUser,
    models::task::{Task, TaskStatus, UpdateTask},
    services::tasks::NewTask,
};
use uuid::Uuid;

/// Create task request
#[derive(Debug, Deserialize)]
pub struct CreateTaskRequest {
    /// Required; a missing title is reported like a blank one
    #[serde(default)]
    pub title: String,

    pub description: Option<String>,

    /// Calendar date, `YYYY-MM-DD`
    pub deadline: Option<NaiveDate>,
}

/// Update task request; absent fields are left unchanged
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTaskRequest {
    pub title: Option<String>,

    pub description: Option<String>,

    pub status: Option<TaskStatus>,

    pub deadline: Option<NaiveDate>,
}

impl From<UpdateTaskRequest> for UpdateTask {
    fn from(req: UpdateTaskRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            status: req.status,
            deadline: req.deadline,
        }
    }
}

/// Delete confirmation
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteTaskResponse {
    pub message: String,
}

/// A task ID that is not a UUID cannot name an existing task
fn parse_task_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| ApiError::NotFound("Task not found".to_string()))
}

pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.tasks.list(&user).await?))
}

/// Create a task owned by the requester
///
/// # Errors
///
/// - `400 Bad Request`: Missing or blank title, or malformed body
pub async fn create_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    payload: Result<Json<CreateTaskRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let Json(req) = payload?;
    let task = state
        .tasks
        .create(
            &user,
            NewTask {
                title: req.title,
                description: req.description,
                deadline: req.deadline,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// # Errors
///
/// - `403 Forbidden`: Task belongs to another user
/// - `404 Not Found`: No such task
pub async fn get_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_task_id(&id)?;

    Ok(Json(state.tasks.get(&user, task_id).await?))
}

/// Apply a partial update
///
/// # Errors
///
/// - `400 Bad Request`: Blank title or malformed body
/// - `403 Forbidden`: Task belongs to another user
/// - `404 Not Found`: No such task
///
/// A missing or foreign task is reported before any problem with the body.
pub async fn update_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateTaskRequest>, JsonRejection>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_task_id(&id)?;

    let Json(req) = match payload {
        Ok(json) => json,
        Err(rejection) => {
            state.tasks.get(&user, task_id).await?;
            return Err(rejection.into());
        }
    };

    Ok(Json(state.tasks.update(&user, task_id, req.into()).await?))
}

/// # Errors
///
/// - `403 Forbidden`: Task belongs to another user
/// - `404 Not Found`: No such task, including one already deleted
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<DeleteTaskResponse>> {
    let task_id = parse_task_id(&id)?;
    state.tasks.delete(&user, task_id).await?;

    Ok(Json(DeleteTaskResponse {
        message: "Task removed".to_string(),
    }))
}
