use crate::error::{ClimateError, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.elections.kalshi.com/trade-api/v2";

/// Published limits of the trade API. Carried for reference only; no request
/// path consults them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimits {
    pub requests_per_minute: u32,
    pub requests_per_hour: u32,
}

impl Default for RateLimits {
    fn default() -> Self {
        Self {
            requests_per_minute: 100,
            requests_per_hour: 1000,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct KalshiConfig {
    pub base_url: String,
    pub api_key: String,
    pub default_headers: Vec<(String, String)>,
    pub rate_limits: RateLimits,
    /// `None` leaves requests unbounded.
    pub request_timeout: Option<Duration>,
}

impl KalshiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            default_headers: default_headers(),
            rate_limits: RateLimits::default(),
            request_timeout: None,
        }
    }

    /// Build the configuration from `KALSHI_*` environment variables.
    ///
    /// `KALSHI_API_KEY` is required. `KALSHI_API_BASE_URL` and
    /// `KALSHI_REQUEST_TIMEOUT_SECS` are optional; blank values are ignored.
    pub fn from_env() -> Result<Self> {
        let api_key = env_value("KALSHI_API_KEY")
            .ok_or_else(|| ClimateError::Config("KALSHI_API_KEY is not set".to_string()))?;
        let base_url = env_value("KALSHI_API_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let mut config = Self::new(base_url, api_key);

        if let Some(secs) = env_value("KALSHI_REQUEST_TIMEOUT_SECS") {
            let secs: u64 = secs.parse().map_err(|_| {
                ClimateError::Config(format!("KALSHI_REQUEST_TIMEOUT_SECS is not a number: {}", secs))
            })?;
            config.request_timeout = Some(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

fn default_headers() -> Vec<(String, String)> {
    vec![
        ("Accept".to_string(), "application/json".to_string()),
        ("Content-Type".to_string(), "application/json".to_string()),
    ]
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
