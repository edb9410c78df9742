use goaltrack_core::tasks::{Task, TaskDraft, TaskPatch, TaskRepositoryTrait};
use goaltrack_core::{Error, Result};

use super::model::{NewTaskDB, TaskChangesetDB, TaskDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::goals::{find_goal_row, refresh_goal_completion};
use crate::schema::tasks;
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct TaskRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl TaskRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        TaskRepository { pool, writer }
    }
}

fn find_task_row(conn: &mut SqliteConnection, task_id: i32) -> Result<TaskDB> {
    tasks::table
        .find(task_id)
        .select(TaskDB::as_select())
        .first::<TaskDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found("Task", task_id))
}

#[async_trait]
impl TaskRepositoryTrait for TaskRepository {
    fn load_tasks(&self) -> Result<Vec<Task>> {
        let mut conn = get_connection(&self.pool)?;
        tasks::table
            .select(TaskDB::as_select())
            .order(tasks::id.asc())
            .load::<TaskDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Task::try_from)
            .collect()
    }

    fn get_task(&self, task_id: i32) -> Result<Task> {
        let mut conn = get_connection(&self.pool)?;
        find_task_row(&mut conn, task_id)?.try_into()
    }

    async fn insert_task(&self, goal_id: i32, draft: TaskDraft) -> Result<Task> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                find_goal_row(conn, goal_id)?;
                let task_db = diesel::insert_into(tasks::table)
                    .values(NewTaskDB::from_draft(goal_id, &draft))
                    .returning(TaskDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                refresh_goal_completion(conn, goal_id)?;
                task_db.try_into()
            })
            .await
    }

    async fn update_task(&self, patch: TaskPatch) -> Result<Task> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Task> {
                let existing = find_task_row(conn, patch.id)?;
                let changeset = TaskChangesetDB::from(&patch);
                if changeset.is_empty() {
                    return existing.try_into();
                }
                let task_db = diesel::update(tasks::table.find(patch.id))
                    .set(&changeset)
                    .returning(TaskDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                if patch.status.is_some() {
                    refresh_goal_completion(conn, task_db.goal_id)?;
                }
                task_db.try_into()
            })
            .await
    }

    async fn delete_task(&self, task_id: i32) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                let existing = find_task_row(conn, task_id)?;
                diesel::delete(tasks::table.find(task_id))
                    .execute(conn)
                    .into_core()?;
                refresh_goal_completion(conn, existing.goal_id)
            })
            .await
    }
}
