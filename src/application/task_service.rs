use std::sync::Arc;

use crate::application::validation::{self, CreateTaskInput, UpdateTaskInput};
use crate::application::AppResult;
use crate::domain::{Task, TaskId};
use crate::ports::TaskRepository;

pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_tasks(&self) -> AppResult<Vec<Task>> {
        Ok(self.repository.list_tasks().await?)
    }

    pub async fn get_task(&self, id: &TaskId) -> AppResult<Option<Task>> {
        Ok(self.repository.get_task(id).await?)
    }

    /// Validates first; the collection is left untouched when the
    /// payload is rejected.
    pub async fn create_task(&self, input: CreateTaskInput) -> AppResult<Task> {
        let new_task = validation::validate_create(input)?;
        Ok(self.repository.create_task(new_task).await?)
    }

    /// Existence is checked before validation so an unknown id surfaces
    /// as not-found even when the payload is also malformed.
    pub async fn update_task(
        &self,
        id: &TaskId,
        input: UpdateTaskInput,
    ) -> AppResult<Option<Task>> {
        if self.repository.get_task(id).await?.is_none() {
            return Ok(None);
        }
        let update = validation::validate_update(input)?;
        Ok(self.repository.update_task(id, update).await?)
    }

    pub async fn delete_task(&self, id: &TaskId) -> AppResult<bool> {
        Ok(self.repository.delete_task(id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::AppError;
    use crate::domain::{NewTask, Priority, Status, TaskUpdate};
    use crate::ports::RepositoryResult;
    use async_trait::async_trait;
    use chrono::Utc;
    use mockall::mock;
    use mockall::predicate::eq;

    mock! {
        Repo {}

        #[async_trait]
        impl TaskRepository for Repo {
            async fn list_tasks(&self) -> RepositoryResult<Vec<Task>>;
            async fn get_task(&self, id: &TaskId) -> RepositoryResult<Option<Task>>;
            async fn create_task(&self, input: NewTask) -> RepositoryResult<Task>;
            async fn update_task(
                &self,
                id: &TaskId,
                update: TaskUpdate,
            ) -> RepositoryResult<Option<Task>>;
            async fn delete_task(&self, id: &TaskId) -> RepositoryResult<bool>;
        }
    }

    fn stored_task(id: &str) -> Task {
        let now = Utc::now();
        Task {
            id: TaskId(id.to_string()),
            title: "Buy milk".to_string(),
            description: None,
            priority: Priority::Low,
            status: Status::Pending,
            due_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn create_rejects_invalid_input_without_touching_the_repository() {
        let mut repo = MockRepo::new();
        repo.expect_create_task().never();

        let service = TaskService::new(Arc::new(repo));
        let result = service.create_task(CreateTaskInput::default()).await;

        match result {
            Err(AppError::Validation(errors)) => {
                assert_eq!(
                    errors.to_string(),
                    "Title is required, Priority is required"
                );
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn create_passes_validated_input_to_the_repository() {
        let mut repo = MockRepo::new();
        repo.expect_create_task()
            .withf(|input| input.title == "Buy milk" && input.priority == Priority::Low)
            .return_once(|_| Ok(stored_task("task1")));

        let service = TaskService::new(Arc::new(repo));
        let task = service
            .create_task(CreateTaskInput {
                title: Some("Buy milk".to_string()),
                priority: Some("low".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(task.id, TaskId("task1".to_string()));
    }

    #[tokio::test]
    async fn update_reports_missing_id_before_validating() {
        let mut repo = MockRepo::new();
        repo.expect_get_task()
            .with(eq(TaskId("nope".to_string())))
            .return_once(|_| Ok(None));
        repo.expect_update_task().never();

        let service = TaskService::new(Arc::new(repo));
        // A payload that would fail validation must still yield not-found.
        let input: UpdateTaskInput =
            serde_json::from_value(serde_json::json!({"status": "done"})).unwrap();
        let result = service.update_task(&"nope".into(), input).await.unwrap();

        assert_eq!(result, None);
    }

    #[tokio::test]
    async fn update_validates_once_the_task_exists() {
        let mut repo = MockRepo::new();
        repo.expect_get_task()
            .return_once(|_| Ok(Some(stored_task("task1"))));
        repo.expect_update_task().never();

        let service = TaskService::new(Arc::new(repo));
        let input: UpdateTaskInput =
            serde_json::from_value(serde_json::json!({"status": "done"})).unwrap();
        let result = service.update_task(&"task1".into(), input).await;

        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn delete_forwards_the_repository_answer() {
        let mut repo = MockRepo::new();
        repo.expect_delete_task()
            .with(eq(TaskId("task1".to_string())))
            .return_once(|_| Ok(true));

        let service = TaskService::new(Arc::new(repo));
        assert!(service.delete_task(&"task1".into()).await.unwrap());
    }
}
