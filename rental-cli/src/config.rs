//! Configuration management for equiprent.
//!
//! Configuration is loaded from `config.toml` in the data directory. Every
//! field has a default, so a missing file or a partial file is fine.

use anyhow::{Context, Result};
use equiprent_client::{ClientConfig, DEFAULT_API_BASE};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file name inside the data directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Draft persistence file name inside the data directory.
pub const DRAFT_FILE: &str = "draft.json";

/// Root configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Lead backend settings.
    #[serde(default)]
    pub api: ApiConfig,
    /// Links and contact details shown on the success page.
    #[serde(default)]
    pub links: LinksConfig,
}

/// Lead backend settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Backend base URL, without `/api/v1` (default: http://localhost:3000).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Timeout for create and update calls in seconds (default: 30).
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Timeout for the replacement create in seconds (default: 10).
    #[serde(default = "default_recreate_timeout_secs")]
    pub recreate_timeout_secs: u64,
    /// `X-Client-Type` header value (default: mobile-app).
    #[serde(default = "default_client_type")]
    pub client_type: String,
}

/// Links and contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinksConfig {
    /// Company home page.
    #[serde(default = "default_home_url")]
    pub home_url: String,
    /// Rental locations page.
    #[serde(default = "default_rent_url")]
    pub rent_url: String,
    /// Support phone number.
    #[serde(default = "default_support_phone")]
    pub support_phone: String,
}

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_recreate_timeout_secs() -> u64 {
    10
}

fn default_client_type() -> String {
    "mobile-app".to_string()
}

fn default_home_url() -> String {
    "https://equipter.com".to_string()
}

fn default_rent_url() -> String {
    "https://equipter.com/rent".to_string()
}

fn default_support_phone() -> String {
    "(717) 425-2683".to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            recreate_timeout_secs: default_recreate_timeout_secs(),
            client_type: default_client_type(),
        }
    }
}

impl Default for LinksConfig {
    fn default() -> Self {
        Self {
            home_url: default_home_url(),
            rent_url: default_rent_url(),
            support_phone: default_support_phone(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Load `config.toml` from the data directory, or defaults if absent.
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_path(data_dir);
        if path.exists() {
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save to `config.toml` in the data directory.
    pub async fn save(&self, data_dir: &Path) -> Result<()> {
        let path = config_path(data_dir);
        let contents = toml::to_string_pretty(self).context("Failed to encode configuration")?;
        tokio::fs::write(&path, contents)
            .await
            .context("Failed to save configuration")?;
        set_file_permissions_0600(&path).await?;
        Ok(())
    }

    /// Check if a config file exists.
    pub fn exists(data_dir: &Path) -> bool {
        config_path(data_dir).exists()
    }

    /// Resolve the backend URL: explicit override (flag or environment)
    /// wins over the file, which wins over the default.
    pub fn api_base(&self, override_base: Option<&str>) -> String {
        override_base
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| self.api.base_url.clone())
    }

    /// Client configuration for the given backend.
    pub fn client_config(&self, api_base: &str) -> ClientConfig {
        ClientConfig::new(api_base)
            .with_timeout(Duration::from_secs(self.api.timeout_secs))
            .with_recreate_timeout(Duration::from_secs(self.api.recreate_timeout_secs))
            .with_client_type(&self.api.client_type)
    }
}

/// Path of `config.toml` in a data directory.
pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

/// Path of the draft persistence file in a data directory.
pub fn draft_path(data_dir: &Path) -> PathBuf {
    data_dir.join(DRAFT_FILE)
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
}

/// Set file permissions to 0600 (owner read/write only) on Unix.
/// No-op on non-Unix platforms.
async fn set_file_permissions_0600(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tokio::fs::set_permissions(path, std::fs::Permissions::from_mode(0o600))
            .await
            .context("Failed to set file permissions")?;
    }
    #[cfg(not(unix))]
    {
        let _ = path;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_matches_production_links() {
        let config = AppConfig::default();
        assert_eq!(config.api.base_url, "http://localhost:3000");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.api.recreate_timeout_secs, 10);
        assert_eq!(config.links.rent_url, "https://equipter.com/rent");
        assert_eq!(config.links.support_phone, "(717) 425-2683");
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [api]
            base_url = "https://leads.example.com"
            "#,
        )
        .unwrap();
        assert_eq!(config.api.base_url, "https://leads.example.com");
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.links, LinksConfig::default());
    }

    #[test]
    fn override_beats_file() {
        let mut config = AppConfig::default();
        config.api.base_url = "https://from-file.example.com".into();

        assert_eq!(config.api_base(None), "https://from-file.example.com");
        assert_eq!(config.api_base(Some("  ")), "https://from-file.example.com");
        assert_eq!(
            config.api_base(Some("https://flag.example.com")),
            "https://flag.example.com"
        );
    }

    #[test]
    fn client_config_uses_configured_timeouts() {
        let mut config = AppConfig::default();
        config.api.timeout_secs = 5;
        config.api.recreate_timeout_secs = 2;
        let client = config.client_config("https://x.example.com");
        assert_eq!(client.timeout, Duration::from_secs(5));
        assert_eq!(client.recreate_timeout, Duration::from_secs(2));
        assert_eq!(client.api_base, "https://x.example.com");
    }

    #[test]
    fn load_without_file_gives_defaults() {
        let dir = tempdir().unwrap();
        assert_eq!(AppConfig::load(dir.path()).unwrap(), AppConfig::default());
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let dir = tempdir().unwrap();
        std::fs::write(config_path(dir.path()), "[api\nbase_url = 1").unwrap();
        assert!(matches!(
            AppConfig::load(dir.path()),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let dir = tempdir().unwrap();
        let mut config = AppConfig::default();
        config.api.client_type = "terminal".into();
        config.save(dir.path()).await.unwrap();

        assert!(AppConfig::exists(dir.path()));
        assert_eq!(AppConfig::load(dir.path()).unwrap(), config);
    }
}
