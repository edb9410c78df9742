use crate::errors::Result;
use crate::tasks::tasks_model::{NewTask, Task, TaskUpdate};
use crate::tasks::tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
use async_trait::async_trait;
use log::debug;
use std::sync::Arc;

pub struct TaskService {
    task_repo: Arc<dyn TaskRepositoryTrait>,
}

impl TaskService {
    pub fn new(task_repo: Arc<dyn TaskRepositoryTrait>) -> Self {
        TaskService { task_repo }
    }
}

#[async_trait]
impl TaskServiceTrait for TaskService {
    fn get_tasks(&self) -> Result<Vec<Task>> {
        self.task_repo.load_tasks()
    }

    fn get_task(&self, task_id: i32) -> Result<Task> {
        self.task_repo.get_task(task_id)
    }

    async fn create_task(&self, new_task: NewTask) -> Result<Task> {
        let draft = new_task.validate()?;
        debug!("Creating task under goal {}", new_task.goal_id);
        self.task_repo.insert_task(new_task.goal_id, draft).await
    }

    async fn update_task(&self, task_id: i32, update: TaskUpdate) -> Result<Task> {
        let patch = update.validate(task_id)?;
        self.task_repo.update_task(patch).await
    }

    async fn delete_task(&self, task_id: i32) -> Result<()> {
        self.task_repo.delete_task(task_id).await
    }
}
