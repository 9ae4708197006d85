use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{NewTask, Task, TaskId, TaskUpdate};

#[derive(Error, Debug, Clone)]
pub enum RepositoryError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Sole source of truth for the task collection. Absence of a task is
/// signalled with `None`, never an error; the error channel is reserved
/// for faults of the backing store itself.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Every task, insertion order preserved.
    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>>;

    async fn get_task(&self, id: &TaskId) -> RepositoryResult<Option<Task>>;

    /// Assigns a fresh unique id, `status = pending`, and both
    /// timestamps; returns the stored task.
    async fn create_task(&self, input: NewTask) -> RepositoryResult<Task>;

    /// Shallow-merges the provided fields and bumps `updated_at`.
    /// `id` and `created_at` are never touched.
    async fn update_task(&self, id: &TaskId, update: TaskUpdate)
        -> RepositoryResult<Option<Task>>;

    /// Returns whether a task was actually removed.
    async fn delete_task(&self, id: &TaskId) -> RepositoryResult<bool>;
}
