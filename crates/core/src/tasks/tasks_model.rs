//! Task domain models.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result, ValidationError};

/// Checklist state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    #[default]
    Todo,
    Done,
}

impl TaskStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Todo => "todo",
            TaskStatus::Done => "done",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            TaskStatus::Todo => TaskStatus::Done,
            TaskStatus::Done => TaskStatus::Todo,
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TaskStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "todo" => Ok(TaskStatus::Todo),
            "done" => Ok(TaskStatus::Done),
            other => Err(ValidationError::InvalidTaskStatus(other.to_string()).into()),
        }
    }
}

/// Domain model representing a task
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: i32,
    pub name: String,
    pub status: TaskStatus,
    pub goal_id: i32,
}

/// Input model for creating a standalone task.
///
/// `status` stays textual until [`NewTask::validate`] so that an unknown value
/// surfaces as a validation error rather than a payload decoding failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewTask {
    pub name: String,
    pub status: String,
    pub goal_id: i32,
}

impl NewTask {
    pub fn validate(&self) -> Result<TaskDraft> {
        Ok(TaskDraft {
            name: self.name.clone(),
            status: self.status.parse()?,
        })
    }
}

/// Input model for patching a task. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl TaskUpdate {
    pub fn validate(&self, task_id: i32) -> Result<TaskPatch> {
        Ok(TaskPatch {
            id: task_id,
            name: self.name.clone(),
            status: self.status.as_deref().map(str::parse).transpose()?,
        })
    }
}

/// A validated task ready to be inserted under a goal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskDraft {
    pub name: String,
    pub status: TaskStatus,
}

/// A validated in-place change to an existing task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskPatch {
    pub id: i32,
    pub name: Option<String>,
    pub status: Option<TaskStatus>,
}

impl TaskPatch {
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(name) = &self.name {
            task.name = name.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(serde_json::to_string(&TaskStatus::Todo).unwrap(), "\"todo\"");
        assert_eq!(serde_json::to_string(&TaskStatus::Done).unwrap(), "\"done\"");
        assert_eq!("done".parse::<TaskStatus>().unwrap(), TaskStatus::Done);
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        for raw in ["", "DONE", "in-progress", " todo"] {
            let err = raw.parse::<TaskStatus>().unwrap_err();
            assert!(matches!(
                err,
                Error::Validation(ValidationError::InvalidTaskStatus(_))
            ));
        }
    }

    #[test]
    fn test_toggle_twice_is_identity() {
        assert_eq!(TaskStatus::Todo.toggled(), TaskStatus::Done);
        assert_eq!(TaskStatus::Todo.toggled().toggled(), TaskStatus::Todo);
    }

    #[test]
    fn test_update_validation_only_checks_present_status() {
        let patch = TaskUpdate {
            name: Some("renamed".to_string()),
            status: None,
        }
        .validate(3)
        .unwrap();
        assert_eq!(patch.status, None);

        let err = TaskUpdate {
            name: None,
            status: Some("finished".to_string()),
        }
        .validate(3)
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid task status 'finished'. Allowed values are 'todo' and 'done'."
        );
    }
}
