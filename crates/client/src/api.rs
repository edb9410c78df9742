//! REST client for the goal tracker API.

use async_trait::async_trait;
use goaltrack_core::goals::{Goal, GoalUpdate, NewGoal};
use goaltrack_core::tasks::{Task, TaskUpdate};
use goaltrack_core::users::{NewUser, UserResponse};
use log::debug;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::Method;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::{ClientError, Result};
use crate::session::Session;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user_id: i32,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorResponse {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error_code: Option<String>,
}

/// The goal/task operations the board needs from a backend.
#[async_trait]
pub trait GoalApi: Send + Sync {
    async fn fetch_goals(&self, user_id: i32) -> Result<Vec<Goal>>;
    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal>;
    async fn update_goal(&self, goal_id: i32, update: &GoalUpdate) -> Result<Goal>;
    async fn delete_goal(&self, goal_id: i32) -> Result<()>;
    async fn update_task(&self, task_id: i32, update: &TaskUpdate) -> Result<Task>;
}

#[derive(Debug, Clone)]
pub struct HttpGoalApi {
    client: reqwest::Client,
    base_url: String,
    auth_header: Option<HeaderValue>,
}

impl HttpGoalApi {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ClientError::Config(format!("Failed to initialize HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: config.api_url.clone(),
            auth_header: None,
        })
    }

    /// Attaches `session`'s token to every subsequent request.
    pub fn set_session(&mut self, session: &Session) -> Result<()> {
        let header = HeaderValue::from_str(&format!("Bearer {}", session.token))
            .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
        self.auth_header = Some(header);
        Ok(())
    }

    pub fn clear_session(&mut self) {
        self.auth_header = None;
    }

    pub async fn signup(&self, new_user: &NewUser) -> Result<UserResponse> {
        self.request(Method::POST, "/auth/signup", Some(new_user))
            .await
    }

    /// Logs in and keeps the returned token for later calls.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<Session> {
        let body = LoginRequest { username, password };
        let response: LoginResponse = self
            .request(Method::POST, "/auth/login", Some(&body))
            .await?;
        let session = Session::from_login(response);
        self.set_session(&session)?;
        Ok(session)
    }

    fn require_session(&self) -> Result<()> {
        if self.auth_header.is_none() {
            return Err(ClientError::NotAuthenticated);
        }
        Ok(())
    }

    fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(auth) = &self.auth_header {
            headers.insert(AUTHORIZATION, auth.clone());
        }
        headers
    }

    async fn request<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!("[GoalApi] {} {}", method, url);
        let mut request = self.client.request(method, &url).headers(self.headers());
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        parse_response(response).await
    }
}

async fn parse_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let (message, error_code) = match serde_json::from_str::<ApiErrorResponse>(&body) {
            Ok(err) => (
                err.message.unwrap_or_else(|| format!("HTTP {status}")),
                err.error_code,
            ),
            Err(_) => (body.chars().take(200).collect(), None),
        };
        return Err(ClientError::Api {
            status: status.as_u16(),
            message,
            error_code,
        });
    }

    serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
}

#[async_trait]
impl GoalApi for HttpGoalApi {
    async fn fetch_goals(&self, user_id: i32) -> Result<Vec<Goal>> {
        self.require_session()?;
        self.request::<(), _>(Method::GET, &format!("/goals/user/{user_id}"), None)
            .await
    }

    async fn create_goal(&self, goal: &NewGoal) -> Result<Goal> {
        self.require_session()?;
        self.request(Method::POST, "/goals", Some(goal)).await
    }

    async fn update_goal(&self, goal_id: i32, update: &GoalUpdate) -> Result<Goal> {
        self.require_session()?;
        self.request(Method::PUT, &format!("/goals/{goal_id}"), Some(update))
            .await
    }

    async fn delete_goal(&self, goal_id: i32) -> Result<()> {
        self.require_session()?;
        self.request::<(), IgnoredAny>(Method::DELETE, &format!("/goals/{goal_id}"), None)
            .await
            .map(|_| ())
    }

    async fn update_task(&self, task_id: i32, update: &TaskUpdate) -> Result<Task> {
        self.require_session()?;
        self.request(Method::PUT, &format!("/tasks/{task_id}"), Some(update))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_goal_calls_need_a_session() {
        let mut api = HttpGoalApi::new(&ClientConfig::default()).unwrap();
        assert!(matches!(
            api.fetch_goals(1).await,
            Err(ClientError::NotAuthenticated)
        ));
        assert!(matches!(
            api.delete_goal(1).await,
            Err(ClientError::NotAuthenticated)
        ));

        let session = Session {
            token: "header.payload.sig".to_string(),
            user_id: 1,
        };
        api.set_session(&session).unwrap();
        assert!(api.require_session().is_ok());
        api.clear_session();
        assert!(matches!(
            api.require_session(),
            Err(ClientError::NotAuthenticated)
        ));
    }
}
