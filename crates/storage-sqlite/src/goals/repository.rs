use goaltrack_core::goals::{
    all_tasks_done, Goal, GoalChanges, GoalDraft, GoalRepositoryTrait,
};
use goaltrack_core::tasks::TaskStatus;
use goaltrack_core::{Error, Result};

use super::model::{GoalChangesetDB, GoalDB, NewGoalDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goals, tasks};
use crate::tasks::{NewTaskDB, TaskChangesetDB, TaskDB};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct GoalRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl GoalRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        GoalRepository { pool, writer }
    }
}

/// Attaches each goal's tasks with a single grouped query.
pub(crate) fn with_tasks(conn: &mut SqliteConnection, goals_db: Vec<GoalDB>) -> Result<Vec<Goal>> {
    let tasks_db = TaskDB::belonging_to(&goals_db)
        .select(TaskDB::as_select())
        .order(tasks::id.asc())
        .load::<TaskDB>(conn)
        .into_core()?;
    let grouped = tasks_db.grouped_by(&goals_db);
    goals_db
        .into_iter()
        .zip(grouped)
        .map(|(goal, goal_tasks)| goal.into_domain(goal_tasks))
        .collect()
}

pub(crate) fn find_goal_row(conn: &mut SqliteConnection, goal_id: i32) -> Result<GoalDB> {
    goals::table
        .find(goal_id)
        .select(GoalDB::as_select())
        .first::<GoalDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found("Goal", goal_id))
}

pub(crate) fn fetch_goal(conn: &mut SqliteConnection, goal_id: i32) -> Result<Goal> {
    let goal_db = find_goal_row(conn, goal_id)?;
    with_tasks(conn, vec![goal_db])?
        .pop()
        .ok_or_else(|| Error::not_found("Goal", goal_id))
}

/// Recomputes `goals.completed` from the goal's current task statuses.
pub(crate) fn refresh_goal_completion(conn: &mut SqliteConnection, goal_id: i32) -> Result<()> {
    let statuses = tasks::table
        .filter(tasks::goal_id.eq(goal_id))
        .select(tasks::status)
        .load::<String>(conn)
        .into_core()?
        .iter()
        .map(|s| s.parse::<TaskStatus>())
        .collect::<Result<Vec<_>>>()?;
    diesel::update(goals::table.find(goal_id))
        .set(goals::completed.eq(all_tasks_done(statuses)))
        .execute(conn)
        .into_core()?;
    Ok(())
}

#[async_trait]
impl GoalRepositoryTrait for GoalRepository {
    fn load_goals(&self) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .select(GoalDB::as_select())
            .order(goals::id.asc())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        with_tasks(&mut conn, goals_db)
    }

    fn load_goals_for_user(&self, user_id: i32) -> Result<Vec<Goal>> {
        let mut conn = get_connection(&self.pool)?;
        let goals_db = goals::table
            .filter(goals::user_id.eq(user_id))
            .select(GoalDB::as_select())
            .order(goals::id.asc())
            .load::<GoalDB>(&mut conn)
            .into_core()?;
        with_tasks(&mut conn, goals_db)
    }

    fn get_goal(&self, goal_id: i32) -> Result<Goal> {
        let mut conn = get_connection(&self.pool)?;
        fetch_goal(&mut conn, goal_id)
    }

    async fn insert_goal(&self, draft: GoalDraft) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_db = diesel::insert_into(goals::table)
                    .values(NewGoalDB::from(&draft))
                    .returning(GoalDB::as_returning())
                    .get_result(conn)
                    .into_core()?;

                let new_tasks: Vec<NewTaskDB> = draft
                    .tasks
                    .iter()
                    .map(|t| NewTaskDB::from_draft(goal_db.id, t))
                    .collect();
                if !new_tasks.is_empty() {
                    diesel::insert_into(tasks::table)
                        .values(&new_tasks)
                        .execute(conn)
                        .into_core()?;
                }
                fetch_goal(conn, goal_db.id)
            })
            .await
    }

    async fn update_goal(&self, changes: GoalChanges) -> Result<Goal> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Goal> {
                let goal_id = changes.goal_id;
                find_goal_row(conn, goal_id)?;

                let changeset = GoalChangesetDB::from(&changes);
                if !changeset.is_empty() {
                    diesel::update(goals::table.find(goal_id))
                        .set(&changeset)
                        .execute(conn)
                        .into_core()?;
                }

                for patch in &changes.task_patches {
                    let scoped = tasks::table
                        .filter(tasks::id.eq(patch.id))
                        .filter(tasks::goal_id.eq(goal_id));
                    let changeset = TaskChangesetDB::from(patch);
                    let matched = if changeset.is_empty() {
                        scoped.count().get_result::<i64>(conn).into_core()? as usize
                    } else {
                        diesel::update(scoped)
                            .set(&changeset)
                            .execute(conn)
                            .into_core()?
                    };
                    if matched == 0 {
                        return Err(Error::NotFound(format!(
                            "Task {} in goal {}",
                            patch.id, goal_id
                        )));
                    }
                }

                let new_tasks: Vec<NewTaskDB> = changes
                    .new_tasks
                    .iter()
                    .map(|t| NewTaskDB::from_draft(goal_id, t))
                    .collect();
                if !new_tasks.is_empty() {
                    diesel::insert_into(tasks::table)
                        .values(&new_tasks)
                        .execute(conn)
                        .into_core()?;
                }

                if changes.needs_completion_refresh() {
                    refresh_goal_completion(conn, goal_id)?;
                }
                fetch_goal(conn, goal_id)
            })
            .await
    }

    async fn delete_goal(&self, goal_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                find_goal_row(conn, goal_id)?;
                let removed_tasks = diesel::delete(tasks::table.filter(tasks::goal_id.eq(goal_id)))
                    .execute(conn)
                    .into_core()?;
                diesel::delete(goals::table.find(goal_id))
                    .execute(conn)
                    .into_core()?;
                Ok(removed_tasks)
            })
            .await
    }
}
