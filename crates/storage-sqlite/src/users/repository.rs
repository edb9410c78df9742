use goaltrack_core::users::{NewUserRecord, User, UserChanges, UserRepositoryTrait};
use goaltrack_core::{Error, Result};

use super::model::{NewUserDB, UserChangesetDB, UserDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{goals, tasks, users};
use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;

use std::sync::Arc;

pub struct UserRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        UserRepository { pool, writer }
    }
}

fn find_user_row(conn: &mut SqliteConnection, user_id: i32) -> Result<UserDB> {
    users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .optional()
        .into_core()?
        .ok_or_else(|| Error::not_found("User", user_id))
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    fn load_users(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        let users_db = users::table
            .select(UserDB::as_select())
            .order(users::id.asc())
            .load::<UserDB>(&mut conn)
            .into_core()?;
        Ok(users_db.into_iter().map(User::from).collect())
    }

    fn get_user(&self, user_id: i32) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;
        find_user_row(&mut conn, user_id).map(User::from)
    }

    fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::username.eq(username))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        let user = users::table
            .filter(users::email.eq(email))
            .select(UserDB::as_select())
            .first::<UserDB>(&mut conn)
            .optional()
            .into_core()?;
        Ok(user.map(User::from))
    }

    async fn insert_user(&self, record: NewUserRecord) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let user_db = diesel::insert_into(users::table)
                    .values(NewUserDB::from(record))
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::from(user_db))
            })
            .await
    }

    async fn update_user(&self, changes: UserChanges) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let user_id = changes.user_id;
                let existing = find_user_row(conn, user_id)?;
                let changeset = UserChangesetDB::from(changes);
                if changeset.is_empty() {
                    return Ok(User::from(existing));
                }
                let user_db = diesel::update(users::table.find(user_id))
                    .set(&changeset)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .into_core()?;
                Ok(User::from(user_db))
            })
            .await
    }

    async fn delete_user(&self, user_id: i32) -> Result<()> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<()> {
                find_user_row(conn, user_id)?;
                let owned_goals = goals::table
                    .filter(goals::user_id.eq(user_id))
                    .select(goals::id);
                diesel::delete(tasks::table.filter(tasks::goal_id.eq_any(owned_goals)))
                    .execute(conn)
                    .into_core()?;
                diesel::delete(goals::table.filter(goals::user_id.eq(user_id)))
                    .execute(conn)
                    .into_core()?;
                diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .into_core()?;
                Ok(())
            })
            .await
    }
}
