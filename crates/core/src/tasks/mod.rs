//! Tasks module - checklist items that belong to exactly one goal.

mod tasks_model;
mod tasks_service;
mod tasks_traits;

pub use tasks_model::{NewTask, Task, TaskDraft, TaskPatch, TaskStatus, TaskUpdate};
pub use tasks_service::TaskService;
pub use tasks_traits::{TaskRepositoryTrait, TaskServiceTrait};
