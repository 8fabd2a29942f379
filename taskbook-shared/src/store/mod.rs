//! Storage traits
//!
//! Services talk to persistence only through [`UserStore`] and [`TaskStore`].
//! Two backends implement them:
//!
//! - [`PgStore`]: PostgreSQL via the queries in [`crate::models`]
//! - [`MemoryStore`]: process-local maps for development and tests
//!
//! Neither store knows about requesters. Owner filtering for lists happens in
//! the query; per-task ownership checks belong to
//! [`crate::services::tasks::TaskService`].

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{
    task::{CreateTask, Task, UpdateTask},
    user::{CreateUser, User},
};

/// Error type for storage operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Another user already registered this email
    #[error("Email already registered")]
    DuplicateEmail,

    /// Backend failure (connection, constraint, decoding...)
    #[error("Database error: {0}")]
    Database(String),
}

/// Storage result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Credential persistence
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Inserts a user, failing with [`StoreError::DuplicateEmail`] if the
    /// email is taken
    async fn insert_user(&self, data: CreateUser) -> StoreResult<User>;

    async fn find_user_by_id(&self, id: Uuid) -> StoreResult<Option<User>>;

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
}

/// Task persistence
#[async_trait]
pub trait TaskStore: Send + Sync {
    async fn insert_task(&self, data: CreateTask) -> StoreResult<Task>;

    /// Loads a task by ID without any owner filter
    async fn find_task(&self, id: Uuid) -> StoreResult<Option<Task>>;

    /// All tasks of one owner, newest first
    async fn list_tasks_by_owner(&self, owner_id: Uuid) -> StoreResult<Vec<Task>>;

    /// Applies a patch; `None` if the task is gone
    async fn update_task(&self, id: Uuid, patch: UpdateTask) -> StoreResult<Option<Task>>;

    /// Removes a task; false if it did not exist
    async fn delete_task(&self, id: Uuid) -> StoreResult<bool>;
}

/// A complete backend, as held by the API server
#[async_trait]
pub trait Store: UserStore + TaskStore {
    /// Short backend name reported by the health endpoint
    fn backend(&self) -> &'static str;

    /// Checks the backend is reachable
    async fn ping(&self) -> StoreResult<()>;
}
