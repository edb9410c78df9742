mod common;

use std::time::{SystemTime, UNIX_EPOCH};

use axum::http::{Method, StatusCode};
use common::test_app;
use goaltrack_server::auth::Claims;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::json;

#[tokio::test]
async fn signup_login_and_list_own_goals() {
    let app = test_app().await;

    let (status, user) = app
        .send(
            Method::POST,
            "/users/",
            None,
            Some(json!({ "username": "alice", "email": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(user["username"], "alice");
    assert!(user.get("password").is_none());
    assert!(user.get("passwordHash").is_none());
    let alice_id = user["id"].as_i64().unwrap();

    let (status, login) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(login["tokenType"], "Bearer");
    assert_eq!(login["userId"].as_i64(), Some(alice_id));
    let token = login["token"].as_str().unwrap();

    let (status, goals) = app.get(&format!("/goals/user/{alice_id}"), token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goals, json!([]));
}

#[tokio::test]
async fn signup_reports_conflicts_with_error_codes() {
    let app = test_app().await;
    let (status, _) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "username": "alice", "email": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "username": "alice", "email": "b@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "USERNAME_TAKEN");

    let (status, body) = app
        .send(
            Method::POST,
            "/auth/signup",
            None,
            Some(json!({ "username": "bob", "email": "a@x.com", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errorCode"], "EMAIL_TAKEN");
}

#[tokio::test]
async fn bad_credentials_are_unauthorized() {
    let app = test_app().await;
    app.register("alice").await;

    for body in [
        json!({ "username": "alice", "password": "wrong" }),
        json!({ "username": "nobody", "password": "p" }),
    ] {
        let (status, error) = app
            .send(Method::POST, "/auth/login", None, Some(body))
            .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(error["code"], 401);
    }
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let app = test_app().await;

    let (status, _) = app.send(Method::GET, "/goals", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.get("/goals", "not-a-token").await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.send(Method::GET, "/users", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (token, _) = app.register("alice").await;
    let (status, goals) = app.get("/goals", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(goals, json!([]));
}

#[tokio::test]
async fn expired_token_is_forbidden() {
    let app = test_app().await;
    let (fresh, alice) = app.register("alice").await;
    let (status, _) = app.get("/goals", &fresh).await;
    assert_eq!(status, StatusCode::OK);

    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_secs() as usize;
    let claims = Claims {
        sub: alice.to_string(),
        id: alice as i32,
        username: "alice".to_string(),
        iat: now - 3600,
        exp: now - 5,
    };
    let expired = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(&app.secret),
    )
    .unwrap();

    let (status, error) = app.get("/goals", &expired).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], 403);
}

#[tokio::test]
async fn ping_and_healthz_are_public() {
    let app = test_app().await;
    let (status, body) = app.send(Method::GET, "/ping", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "pong" }));

    let (status, body) = app.send(Method::GET, "/healthz", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!("ok"));
}
