//! Client configuration.
//!
//! The base URL and request timeout are fixed when an [`ApiClient`](crate::ApiClient)
//! is built and never change afterwards. Configuration can be assembled in code
//! or loaded from environment variables:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `MEAL_PLANNER_BASE_URL` | `http://localhost:8080/api` | Base path every endpoint is appended to |
//! | `MEAL_PLANNER_TIMEOUT_SECS` | unset | Per-request timeout in whole seconds |

use std::env;
use std::time::Duration;

use thiserror::Error;

pub const BASE_URL_VAR: &str = "MEAL_PLANNER_BASE_URL";
pub const TIMEOUT_VAR: &str = "MEAL_PLANNER_TIMEOUT_SECS";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8080/api";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{var} must be a positive whole number of seconds, got {value:?}")]
    InvalidTimeout { var: &'static str, value: String },
    #[error("{var} must not be empty")]
    EmptyBaseUrl { var: &'static str },
}

/// Immutable settings shared by every request an [`ApiClient`](crate::ApiClient) makes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: None,
        }
    }

    /// Bound every request by `timeout`. Without one, requests wait as long
    /// as the transport allows.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        let base_url = match env::var(BASE_URL_VAR) {
            Ok(value) if value.trim().is_empty() => {
                return Err(ConfigError::EmptyBaseUrl { var: BASE_URL_VAR })
            }
            Ok(value) => value.trim().to_string(),
            Err(_) => DEFAULT_BASE_URL.to_string(),
        };

        let mut config = Self::new(base_url);
        if let Ok(raw) = env::var(TIMEOUT_VAR) {
            let secs = raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .ok_or_else(|| ConfigError::InvalidTimeout {
                    var: TIMEOUT_VAR,
                    value: raw.clone(),
                })?;
            config = config.with_timeout(Duration::from_secs(secs));
        }

        tracing::debug!(base_url = %config.base_url, timeout = ?config.timeout, "Loaded client configuration");
        Ok(config)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
