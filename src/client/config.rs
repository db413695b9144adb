use std::env;
use std::time::Duration;

/// Settings for the complaint API client
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API root including the `/api` segment
    pub base_url: String,
    /// Stored tokens older than this are discarded
    pub token_max_age: Duration,
    /// Wait before firing the session-expired hook after a 401
    pub redirect_delay: Duration,
    pub request_timeout: Duration,
    /// Wrap stored tokens with a checksum and timestamp
    pub checksum_tokens: bool,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            token_max_age: Duration::from_secs(Self::DEFAULT_TOKEN_MAX_AGE_SECS),
            redirect_delay: Duration::from_millis(Self::DEFAULT_REDIRECT_DELAY_MS),
            request_timeout: Duration::from_secs(Self::DEFAULT_REQUEST_TIMEOUT_SECS),
            checksum_tokens: true,
        }
    }
}

impl ClientConfig {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:5000/api";
    const DEFAULT_TOKEN_MAX_AGE_SECS: u64 = 24 * 60 * 60;
    const DEFAULT_REDIRECT_DELAY_MS: u64 = 1500;
    const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, String> {
        let base_url =
            env::var("COMPLAINT_API_URL").unwrap_or_else(|_| Self::DEFAULT_BASE_URL.to_string());

        let token_max_age_secs = env::var("TOKEN_MAX_AGE_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_TOKEN_MAX_AGE_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "TOKEN_MAX_AGE_SECS must be a valid number".to_string())?;

        let redirect_delay_ms = env::var("SESSION_REDIRECT_DELAY_MS")
            .unwrap_or_else(|_| Self::DEFAULT_REDIRECT_DELAY_MS.to_string())
            .parse::<u64>()
            .map_err(|_| "SESSION_REDIRECT_DELAY_MS must be a valid number".to_string())?;

        let request_timeout_secs = env::var("CLIENT_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| Self::DEFAULT_REQUEST_TIMEOUT_SECS.to_string())
            .parse::<u64>()
            .map_err(|_| "CLIENT_REQUEST_TIMEOUT_SECS must be a valid number".to_string())?;

        let checksum_tokens = env::var("TOKEN_CHECKSUM")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .map_err(|_| "TOKEN_CHECKSUM must be true or false".to_string())?;

        Ok(Self {
            base_url,
            token_max_age: Duration::from_secs(token_max_age_secs),
            redirect_delay: Duration::from_millis(redirect_delay_ms),
            request_timeout: Duration::from_secs(request_timeout_secs),
            checksum_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::new("http://api.test/api");
        assert_eq!(config.base_url, "http://api.test/api");
        assert_eq!(config.token_max_age, Duration::from_secs(86_400));
        assert_eq!(config.redirect_delay, Duration::from_millis(1500));
        assert!(config.checksum_tokens);
    }
}
