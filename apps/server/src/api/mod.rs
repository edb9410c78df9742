use std::{sync::Arc, time::Duration};

use axum::{
    http::{HeaderValue, StatusCode},
    middleware,
    routing::post,
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{auth, config::Config, main_lib::AppState};

pub mod goals;
pub mod health;
pub mod shared;
pub mod tasks;
pub mod users;

const ACCOUNT_CREATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Requests running past `limit` are answered with 408.
fn timeout_layer(limit: Duration) -> TimeoutLayer {
    TimeoutLayer::with_status_code(StatusCode::REQUEST_TIMEOUT, limit)
}

pub fn app_router(state: Arc<AppState>, config: &Config) -> Router {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any).allow_headers(Any).allow_methods(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .filter_map(|o| match o.parse::<HeaderValue>() {
                Ok(origin) => Some(origin),
                Err(_) => {
                    tracing::warn!("Ignoring invalid CORS origin '{o}'");
                    None
                }
            })
            .collect::<Vec<HeaderValue>>();
        CorsLayer::new()
            .allow_origin(origins)
            .allow_headers(Any)
            .allow_methods(Any)
    };

    let account_timeout = timeout_layer(ACCOUNT_CREATION_TIMEOUT);

    let public = Router::new()
        .merge(health::router())
        .route("/auth/signup", post(auth::signup).layer(account_timeout))
        .route("/auth/login", post(auth::login))
        .route("/users", post(users::create_user).layer(account_timeout))
        .route("/users/", post(users::create_user).layer(account_timeout));

    let protected = Router::new()
        .merge(goals::router())
        .merge(tasks::router())
        .merge(users::router())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_jwt,
        ));

    Router::new()
        .merge(public)
        .merge(protected)
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(timeout_layer(config.request_timeout))
        .layer(TraceLayer::new_for_http())
}
