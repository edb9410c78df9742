use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use serde::Deserialize;

use crate::api::LoginResponse;
use crate::error::{ClientError, Result};

/// Credentials of the signed-in user.
#[derive(Clone, PartialEq, Eq)]
pub struct Session {
    pub token: String,
    pub user_id: i32,
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("user_id", &self.user_id)
            .finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
struct PeekedClaims {
    id: Option<i32>,
    sub: Option<String>,
}

impl Session {
    pub fn from_login(login: LoginResponse) -> Self {
        Self {
            token: login.token,
            user_id: login.user_id,
        }
    }

    /// Restores a session from a stored token by reading its payload.
    ///
    /// The signature is not checked here; the server stays the authority and
    /// will reject a forged or expired token on the next request.
    pub fn from_token(token: &str) -> Result<Self> {
        let payload = token
            .split('.')
            .nth(1)
            .ok_or_else(|| ClientError::InvalidToken("missing payload segment".into()))?;
        let bytes = URL_SAFE_NO_PAD
            .decode(payload.trim_end_matches('='))
            .map_err(|e| ClientError::InvalidToken(e.to_string()))?;
        let claims: PeekedClaims =
            serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidToken(e.to_string()))?;
        let user_id = claims
            .id
            .or_else(|| claims.sub.as_deref().and_then(|s| s.parse().ok()))
            .ok_or_else(|| ClientError::InvalidToken("no user id claim".into()))?;
        Ok(Self {
            token: token.to_string(),
            user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with(payload: &str) -> String {
        format!(
            "{}.{}.sig",
            URL_SAFE_NO_PAD.encode(r#"{"alg":"HS256","typ":"JWT"}"#),
            URL_SAFE_NO_PAD.encode(payload)
        )
    }

    #[test]
    fn test_from_token_reads_id_claim() {
        let token = token_with(r#"{"sub":"7","id":7,"username":"alice","exp":1}"#);
        let session = Session::from_token(&token).unwrap();
        assert_eq!(session.user_id, 7);
        assert_eq!(session.token, token);
    }

    #[test]
    fn test_from_token_falls_back_to_sub() {
        let session = Session::from_token(&token_with(r#"{"sub":"12"}"#)).unwrap();
        assert_eq!(session.user_id, 12);
    }

    #[test]
    fn test_from_token_rejects_garbage() {
        assert!(matches!(
            Session::from_token("garbage"),
            Err(ClientError::InvalidToken(_))
        ));
        assert!(Session::from_token(&token_with(r#"{"username":"alice"}"#)).is_err());
    }

    #[test]
    fn test_debug_hides_token() {
        let session = Session {
            token: "secret-token".into(),
            user_id: 1,
        };
        assert!(!format!("{session:?}").contains("secret-token"));
    }
}
