//! Client configuration for the lead backend.

use std::time::Duration;
use thiserror::Error;

/// Backend used when nothing else is configured.
pub const DEFAULT_API_BASE: &str = "http://localhost:3000";

/// Path appended to the API base for every lead call.
pub const API_PREFIX: &str = "/api/v1";

/// Timeout for ordinary calls.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Timeout for the replacement create after a stale reference.
pub const DEFAULT_RECREATE_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// No backend URL configured.
    #[error("no lead backend URL configured")]
    MissingApiBase,

    /// The backend URL is not http(s).
    #[error("invalid lead backend URL: {0}")]
    InvalidApiBase(String),

    /// A header value contains characters HTTP does not allow.
    #[error("invalid header value for {name}: {value:?}")]
    InvalidHeader {
        /// Header name.
        name: &'static str,
        /// Rejected value.
        value: String,
    },

    /// The HTTP client could not be built.
    #[error("http client setup failed: {0}")]
    HttpClient(String),
}

/// Configuration for [`HttpLeadStore`](crate::HttpLeadStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Backend base URL, without the `/api/v1` suffix.
    pub api_base: String,
    /// Timeout for create and update calls.
    pub timeout: Duration,
    /// Timeout for the replacement create.
    pub recreate_timeout: Duration,
    /// Value of the `X-Client-Type` header.
    pub client_type: String,
    /// Value of the `X-Platform` header.
    pub platform: String,
}

impl ClientConfig {
    /// Create a configuration for the given backend.
    pub fn new(api_base: impl Into<String>) -> Self {
        Self {
            api_base: api_base.into(),
            timeout: DEFAULT_TIMEOUT,
            recreate_timeout: DEFAULT_RECREATE_TIMEOUT,
            client_type: "mobile-app".to_string(),
            platform: std::env::consts::OS.to_string(),
        }
    }

    /// Set the timeout for ordinary calls.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the timeout for the replacement create.
    pub fn with_recreate_timeout(mut self, timeout: Duration) -> Self {
        self.recreate_timeout = timeout;
        self
    }

    /// Set the `X-Client-Type` header value.
    pub fn with_client_type(mut self, client_type: &str) -> Self {
        self.client_type = client_type.to_string();
        self
    }

    /// Set the `X-Platform` header value.
    pub fn with_platform(mut self, platform: &str) -> Self {
        self.platform = platform.to_string();
        self
    }

    /// Value of the `User-Agent` header.
    pub fn user_agent(&self) -> String {
        format!("EquipterRentalApp/{}", self.platform)
    }

    /// Base URL for lead calls: the API base with `/api/v1` appended.
    pub fn api_root(&self) -> Result<String, ConfigError> {
        let base = self.api_base.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(ConfigError::MissingApiBase);
        }
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(ConfigError::InvalidApiBase(base.to_string()));
        }
        Ok(format!("{base}{API_PREFIX}"))
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE)
    }
}
