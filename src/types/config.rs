//! Gateway configuration

use super::constants::DEFAULT_ENDPOINT;
use crate::{HeidelpayError, Result};
use std::env;
use std::time::Duration;

/// Environment variable holding the private key
pub const ENV_PRIVATE_KEY: &str = "HEIDELPAY_PRIVATE_KEY";
/// Environment variable overriding the API endpoint
pub const ENV_API_URL: &str = "HEIDELPAY_API_URL";

/// Configuration of the HTTP gateway
#[derive(Clone)]
pub struct GatewayConfig {
    /// Private API key, e.g. `s-priv-...`
    pub private_key: String,
    /// Base URL of the API, without a trailing slash
    pub endpoint: String,
    /// Request timeout
    pub timeout: Option<Duration>,
}

impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("private_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl GatewayConfig {
    /// Create a config for the default endpoint
    pub fn new(private_key: impl Into<String>) -> Self {
        Self {
            private_key: private_key.into(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }

    /// Read the private key and optional endpoint from the environment
    pub fn from_env() -> Self {
        let private_key = env::var(ENV_PRIVATE_KEY).unwrap_or_default();
        let config = Self::new(private_key);
        match env::var(ENV_API_URL) {
            Ok(endpoint) if !endpoint.is_empty() => config.with_endpoint(endpoint),
            _ => config,
        }
    }

    /// Set the API endpoint
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.private_key.is_empty() {
            return Err(HeidelpayError::missing_private_key());
        }

        if !self.endpoint.starts_with("http://") && !self.endpoint.starts_with("https://") {
            return Err(HeidelpayError::config(
                "Endpoint must start with http:// or https://",
            ));
        }

        Ok(())
    }
}
