//! Database models for goals.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::tasks::TaskDB;
use goaltrack_core::goals::{Goal, GoalChanges, GoalDraft};
use goaltrack_core::tasks::Task;
use goaltrack_core::Result;

/// Database model for goals
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct GoalDB {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: Option<i32>,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new goal
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::goals)]
pub struct NewGoalDB {
    pub title: String,
    pub description: String,
    pub completed: bool,
    pub user_id: Option<i32>,
}

/// Column-level patch for a goal row; `None` fields are skipped.
#[derive(AsChangeset, Debug, Clone, Default)]
#[diesel(table_name = crate::schema::goals)]
pub struct GoalChangesetDB {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
}

impl GoalChangesetDB {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }
}

impl GoalDB {
    pub fn into_domain(self, tasks: Vec<TaskDB>) -> Result<Goal> {
        Ok(Goal {
            id: self.id,
            title: self.title,
            description: self.description,
            completed: self.completed,
            user_id: self.user_id,
            created_at: self.created_at,
            tasks: tasks
                .into_iter()
                .map(Task::try_from)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}

impl From<&GoalDraft> for NewGoalDB {
    fn from(draft: &GoalDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            completed: draft.completed,
            user_id: Some(draft.user_id),
        }
    }
}

impl From<&GoalChanges> for GoalChangesetDB {
    fn from(changes: &GoalChanges) -> Self {
        Self {
            title: changes.title.clone(),
            description: changes.description.clone(),
            completed: changes.completed,
        }
    }
}
