use crate::error::{ConfigError, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_directory")]
    pub directory: String,
    #[serde(default = "default_log_filename")]
    pub filename: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path template of a thread page; `{id}` is replaced by the thread id.
    #[serde(default = "default_status_path")]
    pub status_path: String,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_accept_language")]
    pub accept_language: String,

    /// Seconds before a fetch is abandoned.
    #[serde(default = "default_request_timeout")]
    pub request_timeout: u64,

    #[serde(default)]
    pub proxy: Option<String>,

    #[serde(default)]
    pub logging: LogConfig,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: default_log_directory(),
            filename: default_log_filename(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            status_path: default_status_path(),
            user_agent: default_user_agent(),
            accept_language: default_accept_language(),
            request_timeout: default_request_timeout(),
            proxy: None,
            logging: LogConfig::default(),
        }
    }
}

impl Config {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::FileRead)?;
        let config = Self::from_toml(&content)?;
        info!("Configuration loaded successfully");
        Ok(config)
    }

    /// Loads `path` when it exists, otherwise falls back to the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ConfigError::MissingField("base_url".to_string()).into());
        }
        if !self.base_url.starts_with("http") {
            return Err(ConfigError::InvalidValue(format!(
                "base_url must start with http(s): {}",
                self.base_url
            ))
            .into());
        }

        if !self.status_path.contains("{id}") {
            return Err(ConfigError::InvalidValue(format!(
                "status_path must contain an {{id}} placeholder: {}",
                self.status_path
            ))
            .into());
        }

        if self.user_agent.is_empty() {
            return Err(ConfigError::MissingField("user_agent".to_string()).into());
        }

        if self.request_timeout == 0 {
            return Err(ConfigError::InvalidValue(
                "request_timeout must be greater than 0".to_string(),
            )
            .into());
        }

        if let Some(proxy) = &self.proxy {
            if proxy.trim().is_empty() {
                return Err(ConfigError::InvalidValue("proxy cannot be empty".to_string()).into());
            }
        }

        Ok(())
    }
}

fn default_base_url() -> String {
    "https://mobile.twitter.com".to_string()
}

fn default_status_path() -> String {
    "/string/status/{id}".to_string()
}

// Legacy browsers get the simplified markup the reply parser expects.
fn default_user_agent() -> String {
    "MSIE 6.0".to_string()
}

fn default_accept_language() -> String {
    "en".to_string()
}

fn default_request_timeout() -> u64 {
    15
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_directory() -> String {
    "logs".to_string()
}

fn default_log_filename() -> String {
    "conversation.log".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn empty_file_uses_defaults() {
        let config = Config::from_toml("").unwrap();
        assert_eq!(config.base_url, "https://mobile.twitter.com");
        assert_eq!(config.user_agent, "MSIE 6.0");
        assert_eq!(config.accept_language, "en");
        assert_eq!(config.request_timeout, 15);
        assert!(config.proxy.is_none());
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn overrides_are_read() {
        let config = Config::from_toml(
            r#"
            base_url = "http://localhost:8080"
            request_timeout = 3
            proxy = "socks5://127.0.0.1:9050"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();
        assert_eq!(config.base_url, "http://localhost:8080");
        assert_eq!(config.request_timeout, 3);
        assert_eq!(config.proxy.as_deref(), Some("socks5://127.0.0.1:9050"));
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.directory, "logs");
    }

    #[test]
    fn rejects_zero_timeout() {
        let err = Config::from_toml("request_timeout = 0").unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_path_without_placeholder() {
        let err = Config::from_toml(r#"status_path = "/status/""#).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn rejects_non_http_base_url() {
        let err = Config::from_toml(r#"base_url = "ftp://example.com""#).unwrap_err();
        assert!(matches!(err, AppError::Config(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("does/not/exist.toml").unwrap();
        assert_eq!(config.status_path, "/string/status/{id}");
    }
}
