use std::sync::Arc;

use crate::{auth::AuthManager, config::Config};
use goaltrack_core::{
    goals::{GoalService, GoalServiceTrait},
    tasks::{TaskService, TaskServiceTrait},
    users::{UserService, UserServiceTrait},
};
use goaltrack_storage_sqlite::{
    db, goals::GoalRepository, tasks::TaskRepository, users::UserRepository,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub goal_service: Arc<dyn GoalServiceTrait + Send + Sync>,
    pub task_service: Arc<dyn TaskServiceTrait + Send + Sync>,
    pub user_service: Arc<dyn UserServiceTrait + Send + Sync>,
    pub auth: Arc<AuthManager>,
}

pub fn init_tracing() {
    let log_format = std::env::var("GT_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let (pool, writer) = db::open(&config.db_path)?;
    tracing::info!("Database path in use: {}", config.db_path);

    let goal_repository = Arc::new(GoalRepository::new(pool.clone(), writer.clone()));
    let task_repository = Arc::new(TaskRepository::new(pool.clone(), writer.clone()));
    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));

    let goal_service = Arc::new(GoalService::new(
        goal_repository.clone(),
        user_repository.clone(),
    ));
    let task_service = Arc::new(TaskService::new(task_repository));
    let user_service = Arc::new(UserService::new(user_repository, goal_repository));

    let auth = Arc::new(AuthManager::from_config(config)?);

    Ok(Arc::new(AppState {
        goal_service,
        task_service,
        user_service,
        auth,
    }))
}
