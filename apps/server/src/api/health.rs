use std::sync::Arc;

use axum::{routing::get, Json, Router};

use crate::{api::shared::MessageResponse, main_lib::AppState};

pub async fn healthz() -> &'static str {
    "ok"
}

async fn ping() -> Json<MessageResponse> {
    Json(MessageResponse::new("pong"))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/ping", get(ping))
}
