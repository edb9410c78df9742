//! Users module - accounts, password hashing and credential checks.

mod password;
mod users_model;
mod users_service;
mod users_traits;

pub use password::{hash_password, hash_password_blocking, verify_password};
pub use users_model::{
    NewUser, NewUserRecord, User, UserChanges, UserDetail, UserResponse, UserUpdate,
};
pub use users_service::UserService;
pub use users_traits::{UserRepositoryTrait, UserServiceTrait};
