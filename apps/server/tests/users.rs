mod common;

use axum::http::{Method, StatusCode};
use common::test_app;
use serde_json::json;

#[tokio::test]
async fn user_detail_update_and_cascading_delete() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;
    let (_, goal) = app
        .send(
            Method::POST,
            "/goals",
            Some(&token),
            Some(json!({ "title": "Read", "tasks": [{ "name": "ch1", "status": "todo" }] })),
        )
        .await;

    let user_uri = format!("/users/{alice}");
    let (status, detail) = app.get(&user_uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(detail["username"], "alice");
    assert_eq!(detail["goals"][0]["id"], goal["id"]);
    assert!(detail.get("password").is_none());

    let (status, users) = app.get("/users", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 1);

    let (status, updated) = app
        .send(
            Method::PUT,
            &user_uri,
            Some(&token),
            Some(json!({ "email": "alice@x.com", "password": "p2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["email"], "alice@x.com");

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "p2" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = app.send(Method::DELETE, &user_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "User deleted successfully");

    let (_, goals) = app.get("/goals", &token).await;
    assert_eq!(goals, json!([]));
    let (status, _) = app.get(&user_uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn update_user_conflict_keeps_error_code() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;
    app.register("bob").await;

    let (status, error) = app
        .send(
            Method::PUT,
            &format!("/users/{alice}"),
            Some(&token),
            Some(json!({ "username": "bob" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(error["errorCode"], "USERNAME_TAKEN");
}

#[tokio::test]
async fn create_user_requires_fields() {
    let app = test_app().await;
    let (status, _) = app
        .send(
            Method::POST,
            "/users",
            None,
            Some(json!({ "username": "alice", "email": "", "password": "p" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::POST, "/users", None, Some(json!({ "username": "alice" })))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}
