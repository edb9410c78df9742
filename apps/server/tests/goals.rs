mod common;

use axum::http::{Method, StatusCode};
use common::{test_app, TestApp};
use serde_json::{json, Value};

async fn create_reading_goal(app: &TestApp, token: &str, user_id: i64) -> Value {
    let (status, goal) = app
        .send(
            Method::POST,
            "/goals",
            Some(token),
            Some(json!({
                "title": "Read",
                "description": "d",
                "completed": false,
                "tasks": [{ "name": "ch1", "status": "todo" }],
                "userId": user_id,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    goal
}

#[tokio::test]
async fn create_goal_with_nested_task() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;

    let goal = create_reading_goal(&app, &token, alice).await;
    assert_eq!(goal["title"], "Read");
    assert_eq!(goal["completed"], false);
    assert_eq!(goal["userId"].as_i64(), Some(alice));
    let tasks = goal["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 1);
    assert_eq!(tasks[0]["name"], "ch1");
    assert_eq!(tasks[0]["status"], "todo");
    assert_eq!(tasks[0]["goalId"], goal["id"]);

    let uri = format!("/goals/{}", goal["id"]);
    let (status, first) = app.get(&uri, &token).await;
    assert_eq!(status, StatusCode::OK);
    let (_, second) = app.get(&uri, &token).await;
    assert_eq!(first, second);
    assert_eq!(first, goal);
}

#[tokio::test]
async fn create_goal_defaults_owner_to_caller() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;

    let (status, goal) = app
        .send(
            Method::POST,
            "/goals",
            Some(&token),
            Some(json!({ "title": "Run", "description": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(goal["userId"].as_i64(), Some(alice));
    assert_eq!(goal["tasks"], json!([]));

    let (_, by_name) = app.get("/goals/user/alice", &token).await;
    assert_eq!(by_name, json!([goal]));
}

#[tokio::test]
async fn invalid_goal_payloads_are_rejected_without_writes() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;

    let (status, error) = app
        .send(
            Method::POST,
            "/goals",
            Some(&token),
            Some(json!({
                "title": "Read",
                "tasks": [{ "name": "ch1", "status": "started" }],
                "userId": alice,
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(error["message"].as_str().unwrap().contains("started"));

    let (status, _) = app
        .send(
            Method::POST,
            "/goals",
            Some(&token),
            Some(json!({ "title": "Read", "tasks": "ch1", "userId": alice })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(
            Method::POST,
            "/goals",
            Some(&token),
            Some(json!({ "title": "Read", "userId": 999 })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, goals) = app.get("/goals", &token).await;
    assert_eq!(goals, json!([]));
    let (_, tasks) = app.get("/tasks", &token).await;
    assert_eq!(tasks, json!([]));
}

#[tokio::test]
async fn update_goal_splits_new_and_existing_tasks() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;
    let goal = create_reading_goal(&app, &token, alice).await;
    let ch1 = goal["tasks"][0]["id"].clone();

    let (status, updated) = app
        .send(
            Method::PUT,
            &format!("/goals/{}", goal["id"]),
            Some(&token),
            Some(json!({
                "title": "Read more",
                "tasks": [
                    { "name": "ch2", "status": "todo" },
                    { "id": ch1, "name": "chapter 1", "status": "done" },
                ],
            })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Read more");
    assert_eq!(updated["description"], "d");
    let tasks = updated["tasks"].as_array().unwrap();
    assert_eq!(tasks.len(), 2);
    assert_eq!(tasks[0]["id"], ch1);
    assert_eq!(tasks[0]["name"], "chapter 1");
    assert_eq!(tasks[0]["status"], "done");
    assert_eq!(tasks[1]["name"], "ch2");
    assert_eq!(updated["completed"], false);

    // Omitting tasks never removes them.
    let (_, renamed) = app
        .send(
            Method::PUT,
            &format!("/goals/{}", goal["id"]),
            Some(&token),
            Some(json!({ "tasks": [] })),
        )
        .await;
    assert_eq!(renamed["tasks"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn update_goal_errors() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;
    let goal = create_reading_goal(&app, &token, alice).await;

    let (status, _) = app
        .send(Method::PUT, "/goals/404", Some(&token), Some(json!({ "title": "x" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .send(
            Method::PUT,
            &format!("/goals/{}", goal["id"]),
            Some(&token),
            Some(json!({ "title": "x", "tasks": [{ "name": "n", "status": "DONE!" }] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, unchanged) = app.get(&format!("/goals/{}", goal["id"]), &token).await;
    assert_eq!(unchanged, goal);
}

#[tokio::test]
async fn delete_goal_cascades_to_tasks() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;
    let goal = create_reading_goal(&app, &token, alice).await;
    let task_uri = format!("/tasks/{}", goal["tasks"][0]["id"]);
    let goal_uri = format!("/goals/{}", goal["id"]);

    let (status, body) = app.send(Method::DELETE, &goal_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Goal deleted successfully");

    let (status, _) = app.get(&task_uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get(&goal_uri, &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.send(Method::DELETE, &goal_uri, Some(&token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn goal_lookups_parse_ids_and_owners() {
    let app = test_app().await;
    let (token, alice) = app.register("alice").await;
    let goal = create_reading_goal(&app, &token, alice).await;

    let (status, loose) = app.get(&format!("/goals/+00{}", goal["id"]), &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(loose, goal);

    let (status, _) = app.get("/goals/abc", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, _) = app.get("/goals/1.5", &token).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app.get("/goals/user/nobody", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = app.get("/goals/user/999", &token).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
