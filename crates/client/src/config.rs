use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8080";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Reads `GT_API_URL`, loading `.env` first when present.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let api_url = std::env::var("GT_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());
        Self::new(api_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        assert_eq!(
            ClientConfig::new("http://api.local:8080/").api_url,
            "http://api.local:8080"
        );
    }
}
