use async_trait::async_trait;
use chrono::{NaiveDate, TimeZone, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{NewTask, Priority, Status, Task, TaskId, TaskUpdate};
use crate::ports::{RepositoryResult, TaskRepository};

/// In-memory task store. A single writer lock makes every operation
/// atomic with respect to the others; reads hand out clones, so no
/// caller ever holds a reference into the live collection.
#[derive(Default)]
pub struct InMemoryTaskRepository {
    tasks: RwLock<Vec<Task>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: RwLock::new(tasks),
        }
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list_tasks(&self) -> RepositoryResult<Vec<Task>> {
        Ok(self.tasks.read().await.clone())
    }

    async fn get_task(&self, id: &TaskId) -> RepositoryResult<Option<Task>> {
        Ok(self.tasks.read().await.iter().find(|t| &t.id == id).cloned())
    }

    async fn create_task(&self, input: NewTask) -> RepositoryResult<Task> {
        let now = Utc::now();
        let task = Task {
            // UUIDs stay distinct even for two tasks created in the same instant.
            id: TaskId(Uuid::new_v4().to_string()),
            title: input.title,
            description: input.description,
            priority: input.priority,
            status: Status::Pending,
            due_date: input.due_date,
            created_at: now,
            updated_at: now,
        };
        self.tasks.write().await.push(task.clone());
        Ok(task)
    }

    async fn update_task(
        &self,
        id: &TaskId,
        update: TaskUpdate,
    ) -> RepositoryResult<Option<Task>> {
        let mut tasks = self.tasks.write().await;
        let Some(task) = tasks.iter_mut().find(|t| &t.id == id) else {
            return Ok(None);
        };
        task.apply_update(update, Utc::now());
        Ok(Some(task.clone()))
    }

    async fn delete_task(&self, id: &TaskId) -> RepositoryResult<bool> {
        let mut tasks = self.tasks.write().await;
        match tasks.iter().position(|t| &t.id == id) {
            Some(index) => {
                tasks.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

/// Demo tasks for first-launch content, loaded behind the `--seed` flag.
pub fn sample_tasks() -> Vec<Task> {
    fn seeded(
        id: &str,
        title: &str,
        description: &str,
        priority: Priority,
        status: Status,
        due: (i32, u32, u32),
        created: (i32, u32, u32, u32, u32),
    ) -> Task {
        let (y, m, d, h, min) = created;
        let created_at = Utc
            .with_ymd_and_hms(y, m, d, h, min, 0)
            .single()
            .unwrap_or_else(Utc::now);
        Task {
            id: TaskId(id.to_string()),
            title: title.to_string(),
            description: Some(description.to_string()),
            priority,
            status,
            due_date: NaiveDate::from_ymd_opt(due.0, due.1, due.2),
            created_at,
            updated_at: created_at,
        }
    }

    vec![
        seeded(
            "task1",
            "Complete project documentation",
            "Write comprehensive documentation for the task management system",
            Priority::High,
            Status::Pending,
            (2025, 1, 20),
            (2024, 12, 10, 8, 0),
        ),
        seeded(
            "task2",
            "Review code pull requests",
            "Review and provide feedback on pending pull requests",
            Priority::Medium,
            Status::Pending,
            (2025, 1, 15),
            (2024, 12, 11, 9, 30),
        ),
        seeded(
            "task3",
            "Update dependencies",
            "Update all project dependencies to their latest stable versions",
            Priority::Low,
            Status::Completed,
            (2024, 12, 14),
            (2024, 12, 9, 14, 20),
        ),
        seeded(
            "task4",
            "Prepare demo presentation",
            "Create slides and prepare demo for the stakeholder meeting",
            Priority::High,
            Status::Pending,
            (2025, 1, 18),
            (2024, 12, 12, 11, 45),
        ),
        seeded(
            "task5",
            "Database backup",
            "Set up automated daily backups for production database",
            Priority::High,
            Status::Completed,
            (2024, 12, 13),
            (2024, 12, 8, 7, 0),
        ),
        seeded(
            "task6",
            "Update privacy policy",
            "Review and update privacy policy for new data protection regulations",
            Priority::Low,
            Status::Completed,
            (2024, 12, 12),
            (2024, 12, 5, 9, 0),
        ),
    ]
}
