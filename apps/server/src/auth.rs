use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{header::AUTHORIZATION, request::Parts, Request, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use goaltrack_core::users::{NewUser, User, UserResponse};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use rand::{rngs::OsRng, RngCore};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::shared::ApiJson;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::main_lib::AppState;

const MIN_SECRET_LEN: usize = 32;

pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_ttl: Duration,
}

#[derive(Error, Debug)]
pub enum AuthError {
    /// No usable `Authorization: Bearer` header.
    #[error("Authentication required")]
    MissingToken,
    /// A token was presented but did not verify.
    #[error("Invalid or expired token")]
    InvalidToken,
    /// Valid token, but the resource belongs to another user.
    #[error("You do not have access to this resource")]
    Forbidden,
    #[error("{0}")]
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    code: u16,
    message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub id: i32,
    pub username: String,
    pub iat: usize,
    pub exp: usize,
}

/// Identity of the caller, placed in request extensions by [`require_jwt`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub id: i32,
    pub username: String,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user_id: i32,
}

impl AuthManager {
    pub fn new(secret: &[u8], token_ttl: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        validation.leeway = 0;
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
            token_ttl,
        }
    }

    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let secret = match config.jwt_secret.as_deref() {
            Some(raw) => decode_secret_key(raw)?,
            None => {
                tracing::warn!(
                    "GT_JWT_SECRET is not set; using a random secret. Tokens will not survive a restart."
                );
                let mut bytes = vec![0u8; MIN_SECRET_LEN];
                OsRng.fill_bytes(&mut bytes);
                bytes
            }
        };
        Ok(Self::new(&secret, config.access_token_ttl))
    }

    pub fn issue_token(&self, user: &User) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + self.token_ttl;
        let claims = Claims {
            sub: user.id.to_string(),
            id: user.id,
            username: user.username.clone(),
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|err| {
                tracing::debug!("Rejected token: {:?}", err.kind());
                AuthError::InvalidToken
            })
    }

    pub fn expires_in(&self) -> Duration {
        self.token_ttl
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let status = match self {
            AuthError::MissingToken => StatusCode::UNAUTHORIZED,
            AuthError::InvalidToken | AuthError::Forbidden => StatusCode::FORBIDDEN,
            AuthError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = Json(AuthErrorBody {
            code: status.as_u16(),
            message: self.to_string(),
        });
        (status, body).into_response()
    }
}

/// Accepts a base64 secret or a raw string, either way at least 32 bytes.
pub fn decode_secret_key(raw: &str) -> anyhow::Result<Vec<u8>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        anyhow::bail!("JWT secret cannot be empty");
    }
    let decoded = match BASE64.decode(trimmed) {
        Ok(bytes) if bytes.len() >= MIN_SECRET_LEN => bytes,
        _ => trimmed.as_bytes().to_vec(),
    };
    if decoded.len() < MIN_SECRET_LEN {
        anyhow::bail!("JWT secret must be at least {MIN_SECRET_LEN} bytes");
    }
    Ok(decoded)
}

pub async fn signup(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<NewUser>,
) -> ApiResult<(StatusCode, Json<UserResponse>)> {
    let user = state
        .user_service
        .create_user(payload)
        .await
        .map_err(|e| ApiError::redacted(e, "Failed to create user"))?;
    tracing::info!(user_id = user.id, "User signed up");
    Ok((StatusCode::CREATED, Json(UserResponse::from(user))))
}

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let users = state.user_service.clone();
    let LoginRequest { username, password } = payload;
    // Argon2 verification is CPU bound.
    let user = tokio::task::spawn_blocking(move || users.authenticate(&username, &password))
        .await
        .map_err(|e| ApiError::Internal(format!("Login task failed: {e}")))??;
    let token = state.auth.issue_token(&user)?;
    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        expires_in: state.auth.expires_in().as_secs(),
        user_id: user.id,
    }))
}

pub async fn require_jwt(
    State(state): State<Arc<AppState>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let mut parts = header.splitn(2, ' ');
    let (Some(scheme), Some(token)) = (parts.next(), parts.next()) else {
        return Err(AuthError::MissingToken);
    };

    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }

    let claims = state.auth.validate_token(token)?;
    request.extensions_mut().insert(AuthUser {
        id: claims.id,
        username: claims.username,
    });
    Ok(next.run(request).await)
}

impl AuthUser {
    /// Fails with [`AuthError::Forbidden`] unless the caller is `owner_id`.
    pub fn ensure_owns(&self, owner_id: Option<i32>) -> Result<(), AuthError> {
        match owner_id {
            Some(id) if id == self.id => Ok(()),
            _ => Err(AuthError::Forbidden),
        }
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthUser>()
            .cloned()
            .ok_or(AuthError::MissingToken)
    }
}
