use std::sync::Arc;

use crate::{
    api::shared::{ApiJson, MessageResponse},
    auth::AuthUser,
    error::ApiResult,
    main_lib::AppState,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use goaltrack_core::{
    ids::parse_id,
    tasks::{NewTask, Task, TaskUpdate},
};

async fn get_tasks(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Task>>> {
    Ok(Json(state.task_service.get_tasks()?))
}

async fn get_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Task>> {
    Ok(Json(state.task_service.get_task(parse_id(&id)?)?))
}

/// Tasks are changed only by the owner of their goal.
fn ensure_owns_goal(state: &AppState, caller: &AuthUser, goal_id: i32) -> ApiResult<()> {
    let goal = state.goal_service.get_goal(goal_id)?;
    caller.ensure_owns(goal.user_id)?;
    Ok(())
}

async fn create_task(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    ApiJson(task): ApiJson<NewTask>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    ensure_owns_goal(&state, &caller, task.goal_id)?;
    let created = state.task_service.create_task(task).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    ApiJson(update): ApiJson<TaskUpdate>,
) -> ApiResult<Json<Task>> {
    let task_id = parse_id(&id)?;
    let goal_id = state.task_service.get_task(task_id)?.goal_id;
    ensure_owns_goal(&state, &caller, goal_id)?;
    let task = state.task_service.update_task(task_id, update).await?;
    Ok(Json(task))
}

async fn delete_task(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let task_id = parse_id(&id)?;
    let goal_id = state.task_service.get_task(task_id)?.goal_id;
    ensure_owns_goal(&state, &caller, goal_id)?;
    state.task_service.delete_task(task_id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(get_tasks).post(create_task))
        .route(
            "/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
}
