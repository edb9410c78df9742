//! SQLite storage implementation for users.

mod model;
mod repository;

pub use model::{NewUserDB, UserChangesetDB, UserDB};
pub use repository::UserRepository;
