//! Owner-scoped task operations
//!
//! Every single-task operation loads the task first and compares its owner to
//! the requester before doing anything else. A task owned by someone else is
//! reported as [`TaskError::Forbidden`], never as missing.

use chrono::NaiveDate;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::authorization::{require_ownership, AuthzError};
use crate::auth::middleware::AuthUser;
use crate::models::task::{CreateTask, Task, UpdateTask};
use crate::store::{StoreError, TaskStore};

/// Error type for task operations
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("{0}")]
    Validation(String),

    #[error("Task not found")]
    NotFound,

    #[error("Not authorized to access this task")]
    Forbidden,

    #[error("Store error: {0}")]
    Store(String),
}

impl From<StoreError> for TaskError {
    fn from(err: StoreError) -> Self {
        TaskError::Store(err.to_string())
    }
}

impl From<AuthzError> for TaskError {
    fn from(_: AuthzError) -> Self {
        TaskError::Forbidden
    }
}

/// Fields a client may set when creating a task
#[derive(Debug, Clone, Default)]
pub struct NewTask {
    pub title: String,
    pub description: Option<String>,
    pub deadline: Option<NaiveDate>,
}

fn normalize_title(title: &str) -> Result<String, TaskError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(TaskError::Validation("Title is required".to_string()));
    }
    Ok(title.to_string())
}

#[derive(Clone)]
pub struct TaskService {
    tasks: Arc<dyn TaskStore>,
}

impl TaskService {
    pub fn new(tasks: Arc<dyn TaskStore>) -> Self {
        Self { tasks }
    }

    /// Creates a pending task owned by `requester`
    pub async fn create(&self, requester: &AuthUser, input: NewTask) -> Result<Task, TaskError> {
        let title = normalize_title(&input.title)?;

        let task = self
            .tasks
            .insert_task(CreateTask {
                owner_id: requester.id,
                title,
                description: input.description,
                deadline: input.deadline,
            })
            .await?;

        tracing::debug!(task_id = %task.id, owner_id = %requester.id, "Created task");
        Ok(task)
    }

    /// All of the requester's tasks, newest first
    pub async fn list(&self, requester: &AuthUser) -> Result<Vec<Task>, TaskError> {
        Ok(self.tasks.list_tasks_by_owner(requester.id).await?)
    }

    pub async fn get(&self, requester: &AuthUser, task_id: Uuid) -> Result<Task, TaskError> {
        self.load_owned(requester, task_id).await
    }

    /// Applies a partial update; absent fields are left as they are
    ///
    /// The patch is only validated once the requester is known to own the
    /// task.
    pub async fn update(
        &self,
        requester: &AuthUser,
        task_id: Uuid,
        mut patch: UpdateTask,
    ) -> Result<Task, TaskError> {
        self.load_owned(requester, task_id).await?;

        if let Some(title) = patch.title.take() {
            patch.title = Some(normalize_title(&title)?);
        }

        // Deleted between the load and the write
        self.tasks
            .update_task(task_id, patch)
            .await?
            .ok_or(TaskError::NotFound)
    }

    pub async fn delete(&self, requester: &AuthUser, task_id: Uuid) -> Result<(), TaskError> {
        self.load_owned(requester, task_id).await?;

        if !self.tasks.delete_task(task_id).await? {
            return Err(TaskError::NotFound);
        }

        tracing::debug!(%task_id, "Deleted task");
        Ok(())
    }

    async fn load_owned(&self, requester: &AuthUser, task_id: Uuid) -> Result<Task, TaskError> {
        let task = self
            .tasks
            .find_task(task_id)
            .await?
            .ok_or(TaskError::NotFound)?;

        if let Err(e) = require_ownership(requester, task.owner_id) {
            tracing::warn!(
                %task_id,
                requester_id = %requester.id,
                "Rejected access to task owned by another user"
            );
            return Err(e.into());
        }

        Ok(task)
    }
}
