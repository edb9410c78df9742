use std::sync::Arc;

use crate::{
    api::shared::{ApiJson, MessageResponse},
    auth::AuthUser,
    error::{ApiError, ApiResult},
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
    users::{NewUser, UserDetail, UserResponse, UserUpdate},
};

async fn get_users(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<UserResponse>>> {
    let users = state.user_service.get_users()?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<UserDetail>> {
    Ok(Json(state.user_service.get_user_detail(parse_id(&id)?)?))
}

/// Public: account creation does not require a token.
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(user): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let created = state
        .user_service
        .create_user(user)
        .await
        .map_err(|e| ApiError::redacted(e, "Failed to create user"))?;
    Ok((StatusCode::CREATED, Json(UserResponse::from(created))))
}

/// Accounts are changed only by their holder; unknown ids stay 404.
fn ensure_self(state: &AppState, caller: &AuthUser, user_id: i32) -> ApiResult<()> {
    let user = state.user_service.get_user(user_id)?;
    caller.ensure_owns(Some(user.id))?;
    Ok(())
}

async fn update_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
    ApiJson(update): ApiJson<UserUpdate>,
) -> ApiResult<Json<UserResponse>> {
    let user_id = parse_id(&id)?;
    ensure_self(&state, &caller, user_id)?;
    let updated = state
        .user_service
        .update_user(user_id, update)
        .await
        .map_err(|e| ApiError::redacted(e, "Failed to update user"))?;
    Ok(Json(UserResponse::from(updated)))
}

async fn delete_user(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
    caller: AuthUser,
) -> ApiResult<Json<MessageResponse>> {
    let user_id = parse_id(&id)?;
    ensure_self(&state, &caller, user_id)?;
    state.user_service.delete_user(user_id).await?;
    Ok(Json(MessageResponse::new("User deleted successfully")))
}

/// Bearer-protected user routes. `POST /users` is mounted separately.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/users", get(get_users)).route(
        "/users/{id}",
        get(get_user).put(update_user).delete(delete_user),
    )
}
