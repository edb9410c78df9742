#![allow(dead_code)]

use std::time::Duration;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use goaltrack_server::{api::app_router, build_state, config::Config};
use rand::{rngs::OsRng, RngCore};
use serde_json::{json, Value};
use tempfile::{tempdir, TempDir};
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    /// Raw JWT signing key, for minting tokens the server did not issue.
    pub secret: Vec<u8>,
    _dir: TempDir,
}

pub async fn test_app() -> TestApp {
    let dir = tempdir().unwrap();
    let mut secret_bytes = [0u8; 32];
    OsRng.fill_bytes(&mut secret_bytes);
    let config = Config {
        listen_addr: "127.0.0.1:0".parse().unwrap(),
        db_path: dir.path().join("test.db").to_string_lossy().into_owned(),
        cors_allow: vec!["*".to_string()],
        request_timeout: Duration::from_secs(30),
        jwt_secret: Some(BASE64.encode(secret_bytes)),
        access_token_ttl: Duration::from_secs(3600),
    };
    let state = build_state(&config).await.unwrap();
    TestApp {
        router: app_router(state, &config),
        secret: secret_bytes.to_vec(),
        _dir: dir,
    }
}

impl TestApp {
    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    pub async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    /// Creates `username` through the public endpoint and logs in, returning
    /// the token and the new user id.
    pub async fn register(&self, username: &str) -> (String, i64) {
        let (status, _) = self
            .send(
                Method::POST,
                "/users",
                None,
                Some(json!({
                    "username": username,
                    "email": format!("{username}@x.com"),
                    "password": "p",
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, login) = self
            .send(
                Method::POST,
                "/auth/login",
                None,
                Some(json!({ "username": username, "password": "p" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        (
            login["token"].as_str().unwrap().to_string(),
            login["userId"].as_i64().unwrap(),
        )
    }
}
