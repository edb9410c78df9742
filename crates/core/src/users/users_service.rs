use crate::errors::{ConflictError, DatabaseError, Error, Result};
use crate::goals::GoalRepositoryTrait;
use crate::users::password::{hash_password_blocking, verify_password};
use crate::users::users_model::{
    NewUser, NewUserRecord, User, UserChanges, UserDetail, UserUpdate,
};
use crate::users::users_traits::{UserRepositoryTrait, UserServiceTrait};
use async_trait::async_trait;
use log::{debug, warn};
use std::sync::Arc;

pub struct UserService {
    user_repo: Arc<dyn UserRepositoryTrait>,
    goal_repo: Arc<dyn GoalRepositoryTrait>,
}

impl UserService {
    pub fn new(
        user_repo: Arc<dyn UserRepositoryTrait>,
        goal_repo: Arc<dyn GoalRepositoryTrait>,
    ) -> Self {
        UserService {
            user_repo,
            goal_repo,
        }
    }

    /// Rejects a username or email already held by a user other than `except`.
    fn ensure_available(
        &self,
        username: Option<&str>,
        email: Option<&str>,
        except: Option<i32>,
    ) -> Result<()> {
        let taken_by_other = |found: Option<User>| found.is_some_and(|u| Some(u.id) != except);
        if let Some(username) = username {
            if taken_by_other(self.user_repo.find_by_username(username)?) {
                return Err(ConflictError::UsernameTaken.into());
            }
        }
        if let Some(email) = email {
            if taken_by_other(self.user_repo.find_by_email(email)?) {
                return Err(ConflictError::EmailTaken.into());
            }
        }
        Ok(())
    }
}

/// Two concurrent sign-ups can both pass the pre-check; the unique index then
/// decides, and its message names the offending column.
fn map_unique_violation(err: Error) -> Error {
    match err {
        Error::Database(DatabaseError::UniqueViolation(ref message)) => {
            if message.contains("username") {
                ConflictError::UsernameTaken.into()
            } else if message.contains("email") {
                ConflictError::EmailTaken.into()
            } else {
                err
            }
        }
        other => other,
    }
}

#[async_trait]
impl UserServiceTrait for UserService {
    fn get_users(&self) -> Result<Vec<User>> {
        self.user_repo.load_users()
    }

    fn get_user(&self, user_id: i32) -> Result<User> {
        self.user_repo.get_user(user_id)
    }

    fn get_user_detail(&self, user_id: i32) -> Result<UserDetail> {
        let user = self.user_repo.get_user(user_id)?;
        let goals = self.goal_repo.load_goals_for_user(user_id)?;
        Ok(UserDetail {
            user: user.into(),
            goals,
        })
    }

    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        self.ensure_available(Some(&new_user.username), Some(&new_user.email), None)?;
        let record = NewUserRecord {
            username: new_user.username,
            email: new_user.email,
            password_hash: hash_password_blocking(new_user.password).await?,
        };
        debug!("Creating user '{}'", record.username);
        self.user_repo
            .insert_user(record)
            .await
            .map_err(map_unique_violation)
    }

    async fn update_user(&self, user_id: i32, update: UserUpdate) -> Result<User> {
        self.user_repo.get_user(user_id)?;
        self.ensure_available(
            update.username.as_deref(),
            update.email.as_deref(),
            Some(user_id),
        )?;
        let password_hash = match update.password {
            Some(password) if !password.is_empty() => {
                Some(hash_password_blocking(password).await?)
            }
            _ => None,
        };
        self.user_repo
            .update_user(UserChanges {
                user_id,
                username: update.username,
                email: update.email,
                password_hash,
            })
            .await
            .map_err(map_unique_violation)
    }

    async fn delete_user(&self, user_id: i32) -> Result<()> {
        self.user_repo.delete_user(user_id).await
    }

    fn authenticate(&self, username: &str, password: &str) -> Result<User> {
        let Some(user) = self.user_repo.find_by_username(username)? else {
            debug!("Login attempt for unknown user");
            return Err(Error::InvalidCredentials);
        };
        match verify_password(password, &user.password_hash) {
            Ok(true) => Ok(user),
            Ok(false) => Err(Error::InvalidCredentials),
            Err(e) => {
                warn!("Stored password hash for user {} is unusable: {}", user.id, e);
                Err(Error::InvalidCredentials)
            }
        }
    }
}
