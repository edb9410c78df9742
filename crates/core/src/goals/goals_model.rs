//! Goals domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::{Result, ValidationError};
use crate::tasks::{Task, TaskDraft, TaskPatch, TaskStatus};

/// Domain model representing a goal together with its tasks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: Option<i32>,
    pub created_at: NaiveDateTime,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// A goal is complete when it has tasks and every one of them is done.
pub fn all_tasks_done<I>(statuses: I) -> bool
where
    I: IntoIterator<Item = TaskStatus>,
{
    let mut any = false;
    for status in statuses {
        if status != TaskStatus::Done {
            return false;
        }
        any = true;
    }
    any
}

impl Goal {
    pub fn derived_completed(&self) -> bool {
        all_tasks_done(self.tasks.iter().map(|t| t.status))
    }
}

/// A task entry inside a goal create/update payload.
///
/// Entries without `id` are created under the goal; entries with `id` patch the
/// matching task's name and status in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalTaskInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl GoalTaskInput {
    fn into_draft(self) -> Result<TaskDraft> {
        let status = self
            .status
            .ok_or_else(|| ValidationError::MissingField("status".to_string()))?;
        let name = self
            .name
            .ok_or_else(|| ValidationError::MissingField("name".to_string()))?;
        Ok(TaskDraft {
            name,
            status: status.parse()?,
        })
    }
}

/// Input model for creating a new goal
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct NewGoal {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default)]
    pub tasks: Vec<GoalTaskInput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i32>,
}

impl NewGoal {
    /// Validates every nested task and resolves the stored `completed` flag.
    /// Task ids in a create payload are ignored: every entry becomes a new row.
    pub fn validate(self) -> Result<GoalDraft> {
        let user_id = self
            .user_id
            .ok_or_else(|| ValidationError::MissingField("userId".to_string()))?;
        if self.title.trim().is_empty() {
            return Err(ValidationError::MissingField("title".to_string()).into());
        }
        let tasks = self
            .tasks
            .into_iter()
            .map(GoalTaskInput::into_draft)
            .collect::<Result<Vec<_>>>()?;
        let completed = self
            .completed
            .unwrap_or_else(|| all_tasks_done(tasks.iter().map(|t| t.status)));
        Ok(GoalDraft {
            title: self.title,
            description: self.description,
            completed,
            user_id,
            tasks,
        })
    }
}

/// Input model for updating a goal. Absent fields are left untouched.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct GoalUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<GoalTaskInput>>,
}

impl GoalUpdate {
    /// Validates statuses and splits the task list into creates and in-place patches.
    pub fn validate(self, goal_id: i32) -> Result<GoalChanges> {
        let mut new_tasks = Vec::new();
        let mut task_patches = Vec::new();
        for input in self.tasks.unwrap_or_default() {
            match input.id {
                Some(task_id) => task_patches.push(TaskPatch {
                    id: task_id,
                    name: input.name,
                    status: input.status.as_deref().map(str::parse).transpose()?,
                }),
                None => new_tasks.push(input.into_draft()?),
            }
        }
        Ok(GoalChanges {
            goal_id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            new_tasks,
            task_patches,
        })
    }
}

/// A validated goal ready for insertion, tasks included.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalDraft {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: i32,
    pub tasks: Vec<TaskDraft>,
}

/// A validated goal update. The two task sets are disjoint by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GoalChanges {
    pub goal_id: i32,
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub new_tasks: Vec<TaskDraft>,
    pub task_patches: Vec<TaskPatch>,
}

impl GoalChanges {
    /// Whether `completed` has to be recomputed from the tasks after applying
    /// this change.
    pub fn needs_completion_refresh(&self) -> bool {
        self.completed.is_none()
            && (!self.new_tasks.is_empty() || self.task_patches.iter().any(|p| p.status.is_some()))
    }
}
