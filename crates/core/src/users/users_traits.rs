use crate::errors::Result;
use crate::users::users_model::{
    NewUser, NewUserRecord, User, UserChanges, UserDetail, UserUpdate,
};
use async_trait::async_trait;

/// Trait for user repository operations
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    fn load_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, user_id: i32) -> Result<User>;
    fn find_by_username(&self, username: &str) -> Result<Option<User>>;
    fn find_by_email(&self, email: &str) -> Result<Option<User>>;
    async fn insert_user(&self, record: NewUserRecord) -> Result<User>;
    async fn update_user(&self, changes: UserChanges) -> Result<User>;
    /// Removes the user along with their goals and those goals' tasks.
    async fn delete_user(&self, user_id: i32) -> Result<()>;
}

/// Trait for user service operations
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    fn get_users(&self) -> Result<Vec<User>>;
    fn get_user(&self, user_id: i32) -> Result<User>;
    fn get_user_detail(&self, user_id: i32) -> Result<UserDetail>;
    async fn create_user(&self, new_user: NewUser) -> Result<User>;
    async fn update_user(&self, user_id: i32, update: UserUpdate) -> Result<User>;
    async fn delete_user(&self, user_id: i32) -> Result<()>;
    /// Checks a username/password pair. Unknown users and wrong passwords are
    /// indistinguishable to the caller.
    fn authenticate(&self, username: &str, password: &str) -> Result<User>;
}
