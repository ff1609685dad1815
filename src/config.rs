//! Configuration module for Distributed.

use serde::Deserialize;
use std::path::Path;

use crate::{DistributedError, Result};

/// Backend API configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the Distributed server (scheme, host and port).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Path prefix that endpoint names are appended to.
    #[serde(default = "default_prefix")]
    pub prefix: String,
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Total request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// User agent sent with every request.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_prefix() -> String {
    "/api/".to_string()
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_timeout() -> u64 {
    30
}

fn default_user_agent() -> String {
    format!("distributed/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            prefix: default_prefix(),
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

/// Session cookie configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Name of the cookie holding the session token.
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,
    /// File the cookie jar is persisted to. Empty keeps cookies in memory only.
    #[serde(default = "default_cookie_file")]
    pub cookie_file: String,
}

fn default_cookie_name() -> String {
    "sess".to_string()
}

fn default_cookie_file() -> String {
    "data/cookies.txt".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_file: default_cookie_file(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Path to the log file.
    #[serde(default = "default_log_file")]
    pub file: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_file() -> String {
    "logs/distributed.log".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: default_log_file(),
        }
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    /// Backend API configuration.
    #[serde(default)]
    pub api: ApiConfig,
    /// Session cookie configuration.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(DistributedError::Io)?;
        Self::parse(&content)
    }

    /// Load configuration from a TOML file and apply environment variable overrides.
    pub fn load_with_env<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(|e| DistributedError::Config(format!("config parse error: {e}")))
    }

    /// Apply environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `DISTRIBUTED_API_URL`: Override the API base URL
    pub fn apply_env_overrides(&mut self) {
        if let Ok(base_url) = std::env::var("DISTRIBUTED_API_URL") {
            if !base_url.is_empty() {
                self.api.base_url = base_url;
            }
        }
    }

    /// Validate the configuration.
    ///
    /// Returns an error if:
    /// - The base URL is not an http(s) URL
    /// - The API prefix does not start and end with `/`
    /// - The session cookie name is empty or contains `=` or `;`
    pub fn validate(&self) -> Result<()> {
        let base = url::Url::parse(&self.api.base_url)?;
        if !matches!(base.scheme(), "http" | "https") {
            return Err(DistributedError::Config(format!(
                "api.base_url must use http or https, got {}",
                base.scheme()
            )));
        }
        if !self.api.prefix.starts_with('/') || !self.api.prefix.ends_with('/') {
            return Err(DistributedError::Config(
                "api.prefix must start and end with '/'".to_string(),
            ));
        }
        let name = &self.session.cookie_name;
        if name.is_empty() || name.contains(['=', ';']) {
            return Err(DistributedError::Config(format!(
                "session.cookie_name is not a valid cookie name: {name:?}"
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api.base_url, "http://localhost:8080");
        assert_eq!(config.api.prefix, "/api/");
        assert_eq!(config.api.connect_timeout_secs, 10);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.session.cookie_name, "sess");
        assert_eq!(config.session.cookie_file, "data/cookies.txt");
        assert_eq!(config.logging.level, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml = r#"
[api]
base_url = "https://board.example.com"

[logging]
level = "debug"
"#;
        let config = Config::parse(toml).unwrap();
        assert_eq!(config.api.base_url, "https://board.example.com");
        assert_eq!(config.api.prefix, "/api/");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.file, "logs/distributed.log");
        assert_eq!(config.session.cookie_name, "sess");
    }

    #[test]
    fn test_parse_empty_config() {
        let config = Config::parse("").unwrap();
        assert_eq!(config.api.base_url, "http://localhost:8080");
    }

    #[test]
    fn test_parse_invalid_config() {
        let result = Config::parse("[api\nbase_url = ");
        assert!(matches!(result, Err(DistributedError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_bad_scheme() {
        let mut config = Config::default();
        config.api.base_url = "ftp://example.com".to_string();
        assert!(matches!(config.validate(), Err(DistributedError::Config(_))));
    }

    #[test]
    fn test_validate_rejects_unparsable_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".to_string();
        assert!(matches!(config.validate(), Err(DistributedError::Url(_))));
    }

    #[test]
    fn test_validate_rejects_bad_prefix() {
        let mut config = Config::default();
        config.api.prefix = "api".to_string();
        assert!(config.validate().is_err());

        config.api.prefix = "/api".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_cookie_name() {
        let mut config = Config::default();
        config.session.cookie_name = "se=ss".to_string();
        assert!(config.validate().is_err());

        config.session.cookie_name = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ncookie_file = \"\"\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.session.cookie_file, "");
    }

    #[test]
    fn test_load_missing_file() {
        let result = Config::load("/nonexistent/distributed/config.toml");
        assert!(matches!(result, Err(DistributedError::Io(_))));
    }
}
