//! Centralized configuration management for khelo-admin

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Election Khelo API, without the `/api/v1` suffix
    pub api_base_url: String,
    /// Path to the session token file
    pub session_path: PathBuf,
    /// HTTP client configuration
    pub http: HttpConfig,
}

/// HTTP client configuration
#[derive(Debug, Clone)]
pub struct HttpConfig {
    /// Request timeout in seconds
    pub timeout_seconds: u64,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            user_agent: "khelo-admin/0.1.0".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables and defaults
    pub fn from_env() -> Result<Self> {
        let api_base_url = std::env::var("KHELO_API_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8000".to_string());

        let session_path = std::env::var("KHELO_SESSION_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_session_path());

        let http = HttpConfig {
            timeout_seconds: parse_env_var("KHELO_HTTP_TIMEOUT_SECONDS")?.unwrap_or(30),
            user_agent: std::env::var("KHELO_USER_AGENT")
                .unwrap_or_else(|_| "khelo-admin/0.1.0".to_string()),
        };

        Ok(Config {
            api_base_url,
            session_path,
            http,
        })
    }

    /// Get HTTP timeout as Duration
    pub fn http_timeout(&self) -> Duration {
        Duration::from_secs(self.http.timeout_seconds)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(anyhow::anyhow!(
                "KHELO_API_BASE_URL must be an http(s) URL, got: {}",
                self.api_base_url
            ));
        }

        if self.http.timeout_seconds == 0 {
            return Err(anyhow::anyhow!("HTTP timeout must be greater than zero"));
        }

        // The session directory must be creatable so login can store a token
        if let Some(parent) = self.session_path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Cannot create session directory: {}", parent.display())
            })?;
        }

        Ok(())
    }
}

/// Default session file location: `$HOME/.khelo-admin/token`, falling back to
/// the working directory when no home is available
fn default_session_path() -> PathBuf {
    match std::env::var("HOME") {
        Ok(home) => PathBuf::from(home).join(".khelo-admin").join("token"),
        Err(_) => PathBuf::from(".khelo-admin").join("token"),
    }
}

/// Helper function to parse environment variable as a specific type
fn parse_env_var<T>(var_name: &str) -> Result<Option<T>>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display + Send + Sync + std::error::Error + 'static,
{
    match std::env::var(var_name) {
        Ok(val) => val.parse().map(Some).with_context(|| {
            format!("Failed to parse environment variable {} = '{}'", var_name, val)
        }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        std::env::remove_var("KHELO_API_BASE_URL");
        std::env::remove_var("KHELO_HTTP_TIMEOUT_SECONDS");
        std::env::remove_var("KHELO_USER_AGENT");

        let config = Config::from_env().unwrap();
        assert_eq!(config.api_base_url, "http://localhost:8000");
        assert_eq!(config.http.timeout_seconds, 30);
        assert_eq!(config.http.user_agent, "khelo-admin/0.1.0");
        assert_eq!(config.http_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_validate_rejects_non_http_base_url() {
        let config = Config {
            api_base_url: "ftp://example.com".to_string(),
            session_path: PathBuf::from("./token"),
            http: HttpConfig::default(),
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_session_path_fallback_is_relative() {
        let path = default_session_path();
        assert!(path.ends_with(PathBuf::from(".khelo-admin").join("token")));
    }
}
