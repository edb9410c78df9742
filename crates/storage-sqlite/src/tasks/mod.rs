//! SQLite storage implementation for tasks.

mod model;
mod repository;

pub use model::{NewTaskDB, TaskChangesetDB, TaskDB};
pub use repository::TaskRepository;
