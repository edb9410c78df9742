use crate::errors::Result;
use crate::tasks::tasks_model::{NewTask, Task, TaskDraft, TaskPatch, TaskUpdate};
use async_trait::async_trait;

/// Trait for task repository operations.
///
/// Every write also refreshes the parent goal's `completed` flag in the same
/// transaction.
#[async_trait]
pub trait TaskRepositoryTrait: Send + Sync {
    fn load_tasks(&self) -> Result<Vec<Task>>;
    fn get_task(&self, task_id: i32) -> Result<Task>;
    async fn insert_task(&self, goal_id: i32, draft: TaskDraft) -> Result<Task>;
    async fn update_task(&self, patch: TaskPatch) -> Result<Task>;
    async fn delete_task(&self, task_id: i32) -> Result<()>;
}

/// Trait for task service operations
#[async_trait]
pub trait TaskServiceTrait: Send + Sync {
    fn get_tasks(&self) -> Result<Vec<Task>>;
    fn get_task(&self, task_id: i32) -> Result<Task>;
    async fn create_task(&self, new_task: NewTask) -> Result<Task>;
    async fn update_task(&self, task_id: i32, update: TaskUpdate) -> Result<Task>;
    async fn delete_task(&self, task_id: i32) -> Result<()>;
}
