//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use goaltrack_core::users::{NewUserRecord, User, UserChanges};

/// Database model for users. The `password` column holds an argon2 PHC string.
#[derive(Queryable, Identifiable, Selectable, PartialEq, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i32,
    pub username: String,
    pub email: String,
    #[diesel(column_name = password)]
    pub password_hash: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub username: String,
    pub email: String,
    #[diesel(column_name = password)]
    pub password_hash: String,
}

#[derive(AsChangeset, Default)]
#[diesel(table_name = crate::schema::users)]
pub struct UserChangesetDB {
    pub username: Option<String>,
    pub email: Option<String>,
    #[diesel(column_name = password)]
    pub password_hash: Option<String>,
}

impl UserChangesetDB {
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.email.is_none() && self.password_hash.is_none()
    }
}

impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            username: db.username,
            email: db.email,
            password_hash: db.password_hash,
            created_at: db.created_at,
        }
    }
}

impl From<NewUserRecord> for NewUserDB {
    fn from(record: NewUserRecord) -> Self {
        Self {
            username: record.username,
            email: record.email,
            password_hash: record.password_hash,
        }
    }
}

impl From<UserChanges> for UserChangesetDB {
    fn from(changes: UserChanges) -> Self {
        Self {
            username: changes.username,
            email: changes.email,
            password_hash: changes.password_hash,
        }
    }
}
