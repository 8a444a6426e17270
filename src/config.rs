//! API configuration.
//!
//! The base address is resolved once at startup from the environment and is
//! not mutable per request.

use std::env;
use std::time::Duration;

use url::Url;

use crate::error::{AccessError, Result};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8003/api/v1";
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
pub const RETRY_ATTEMPTS: u32 = 3;
pub const RETRY_DELAY: Duration = Duration::from_secs(1);

pub const BASE_URL_ENV: &str = "COCKPIT_API_URL";
pub const HTTP_LOG_ENV: &str = "COCKPIT_HTTP_LOG";
pub const TOKEN_ENV: &str = "COCKPIT_TOKEN";

#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Base address for all backend calls, without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
    /// Retry budget for no-response failures. HTTP error statuses are
    /// never retried.
    pub retry_attempts: u32,
    pub retry_delay: Duration,
    /// Whether the request logger records traffic.
    pub log_http: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: REQUEST_TIMEOUT,
            retry_attempts: RETRY_ATTEMPTS,
            retry_delay: RETRY_DELAY,
            log_http: cfg!(debug_assertions),
        }
    }
}

impl ApiConfig {
    /// Resolve configuration from the environment, validating the base URL.
    pub fn from_env() -> Result<Self> {
        let mut config = ApiConfig::default();

        if let Ok(raw) = env::var(BASE_URL_ENV)
            && !raw.is_empty()
        {
            let parsed = Url::parse(&raw).map_err(|e| {
                AccessError::request_setup(format!("invalid {BASE_URL_ENV} '{raw}': {e}"), None)
            })?;
            config.base_url = parsed.to_string().trim_end_matches('/').to_string();
        }

        if let Ok(flag) = env::var(HTTP_LOG_ENV) {
            config.log_http = flag == "1" || flag.eq_ignore_ascii_case("true");
        }

        Ok(config)
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    fn test_default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.retry_attempts, 3);
        assert_eq!(config.retry_delay, Duration::from_secs(1));
    }

    #[test]
    fn test_with_base_url_trims_trailing_slash() {
        let config = ApiConfig::default().with_base_url("https://desk.example.com/api/");
        assert_eq!(config.base_url, "https://desk.example.com/api");
    }

    #[test]
    #[serial]
    fn test_from_env_override() {
        unsafe { env::set_var(BASE_URL_ENV, "https://desk.example.com/api/v2") };
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, "https://desk.example.com/api/v2");
        unsafe { env::remove_var(BASE_URL_ENV) };
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_url() {
        unsafe { env::set_var(BASE_URL_ENV, "not a url") };
        let result = ApiConfig::from_env();
        assert!(result.is_err());
        unsafe { env::remove_var(BASE_URL_ENV) };
    }

    #[test]
    #[serial]
    fn test_from_env_default_when_unset() {
        unsafe { env::remove_var(BASE_URL_ENV) };
        let config = ApiConfig::from_env().unwrap();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
    }
}
