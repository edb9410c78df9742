mod common;

use axum::http::{Method, StatusCode};
use common::{test_app, TestApp};
use serde_json::{json, Value};

async fn alice_goal(app: &TestApp, token: &str) -> Value {
    let (status, goal) = app
        .send(
            Method::POST,
            "/goals",
            Some(token),
            Some(json!({ "title": "Read", "tasks": [{ "name": "ch1", "status": "todo" }] })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    goal
}

#[tokio::test]
async fn accounts_can_only_be_changed_by_their_holder() {
    let app = test_app().await;
    let (_, alice) = app.register("alice").await;
    let (bob_token, _) = app.register("bob").await;
    let alice_uri = format!("/users/{alice}");

    let (status, error) = app
        .send(
            Method::PUT,
            &alice_uri,
            Some(&bob_token),
            Some(json!({ "password": "owned" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(error["code"], 403);

    let (status, _) = app
        .send(
            Method::POST,
            "/auth/login",
            None,
            Some(json!({ "username": "alice", "password": "owned" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app.send(Method::DELETE, &alice_uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get(&alice_uri, &bob_token).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = app
        .send(Method::DELETE, "/users/999", Some(&bob_token), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goals_and_tasks_can_only_be_changed_by_their_owner() {
    let app = test_app().await;
    let (alice_token, alice) = app.register("alice").await;
    let (bob_token, _) = app.register("bob").await;
    let goal = alice_goal(&app, &alice_token).await;
    let goal_uri = format!("/goals/{}", goal["id"]);
    let task_uri = format!("/tasks/{}", goal["tasks"][0]["id"]);

    let (status, _) = app
        .send(Method::PUT, &goal_uri, Some(&bob_token), Some(json!({ "title": "x" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &goal_uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::PUT, &task_uri, Some(&bob_token), Some(json!({ "status": "done" })))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.send(Method::DELETE, &task_uri, Some(&bob_token), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app
        .send(
            Method::POST,
            "/tasks",
            Some(&bob_token),
            Some(json!({ "name": "sneak", "status": "todo", "goalId": goal["id"] })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(
            Method::POST,
            "/goals",
            Some(&bob_token),
            Some(json!({ "title": "Planted", "userId": alice })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app.get(&format!("/goals/user/{alice}"), &bob_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = app.get("/goals/user/alice", &bob_token).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, unchanged) = app.get(&goal_uri, &alice_token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(unchanged, goal);
    let (_, owned) = app.get("/goals/user/alice", &alice_token).await;
    assert_eq!(owned, json!([goal]));
}
