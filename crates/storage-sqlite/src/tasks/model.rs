//! Database models for tasks.

use diesel::prelude::*;

use crate::goals::GoalDB;
use goaltrack_core::tasks::{Task, TaskDraft, TaskPatch};
use goaltrack_core::Error;

/// Database model for tasks
#[derive(Queryable, Identifiable, Associations, Selectable, PartialEq, Debug, Clone)]
#[diesel(belongs_to(GoalDB, foreign_key = goal_id))]
#[diesel(table_name = crate::schema::tasks)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TaskDB {
    pub id: i32,
    pub name: String,
    pub status: String,
    pub goal_id: i32,
}

/// Database model for creating a new task
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::tasks)]
pub struct NewTaskDB {
    pub name: String,
    pub status: String,
    pub goal_id: i32,
}

#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::tasks)]
pub struct TaskChangesetDB {
    pub name: Option<String>,
    pub status: Option<String>,
}

impl TaskChangesetDB {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.status.is_none()
    }
}

impl NewTaskDB {
    pub fn from_draft(goal_id: i32, draft: &TaskDraft) -> Self {
        Self {
            name: draft.name.clone(),
            status: draft.status.as_str().to_string(),
            goal_id,
        }
    }
}

impl From<&TaskPatch> for TaskChangesetDB {
    fn from(patch: &TaskPatch) -> Self {
        Self {
            name: patch.name.clone(),
            status: patch.status.map(|s| s.as_str().to_string()),
        }
    }
}

impl TryFrom<TaskDB> for Task {
    type Error = Error;

    fn try_from(db: TaskDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            name: db.name,
            status: db.status.parse()?,
            goal_id: db.goal_id,
        })
    }
}
