use std::sync::Arc;

use crate::{
    api::shared::{ApiJson, MessageResponse},
    auth::{AuthError, AuthUser},
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
    goals::{Goal, GoalUpdate, NewGoal},
    ids::{parse_id, OwnerRef},
};

async fn get_goals(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<Goal>>> {
    let goals = state.goal_service.get_goals()?;
    Ok(Json(goals))
}

async fn get_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Goal>> {
    let goal = state.goal_service.get_goal(parse_id(&id)?)?;
    Ok(Json(goal))
}

async fn get_goals_by_owner(
    Path(owner): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<Vec<Goal>>> {
    let owner = OwnerRef::parse(&owner);
    // Unknown owners are 404 before the ownership check.
    let goals = state.goal_service.get_goals_by_owner(&owner)?;
    let is_caller = match &owner {
        OwnerRef::Id(id) => *id == caller.id,
        OwnerRef::Username(name) => *name == caller.username,
    };
    if !is_caller {
        return Err(AuthError::Forbidden.into());
    }
    Ok(Json(goals))
}

async fn create_goal(
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    ApiJson(mut goal): ApiJson<NewGoal>,
) -> ApiResult<(StatusCode, Json<Goal>)> {
    let owner_id = *goal.user_id.get_or_insert(caller.id);
    if owner_id != caller.id {
        state.user_service.get_user(owner_id)?;
        return Err(AuthError::Forbidden.into());
    }
    let created = state.goal_service.create_goal(goal).await?;
    tracing::info!(goal_id = created.id, tasks = created.tasks.len(), "Goal created");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    ApiJson(update): ApiJson<GoalUpdate>,
) -> ApiResult<Json<Goal>> {
    let goal_id = parse_id(&id)?;
    caller.ensure_owns(state.goal_service.get_goal(goal_id)?.user_id)?;
    let goal = state.goal_service.update_goal(goal_id, update).await?;
    Ok(Json(goal))
}

async fn delete_goal(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let goal_id = parse_id(&id)?;
    caller.ensure_owns(state.goal_service.get_goal(goal_id)?.user_id)?;
    state.goal_service.delete_goal(goal_id).await?;
    Ok(Json(MessageResponse::new("Goal deleted successfully")))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/goals", get(get_goals).post(create_goal))
        .route("/goals/user/{owner}", get(get_goals_by_owner))
        .route(
            "/goals/{id}",
            get(get_goal).put(update_goal).delete(delete_goal),
        )
}
