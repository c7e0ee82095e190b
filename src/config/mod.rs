//! Configuration management for the activity service
//!
//! Settings come from built-in defaults, an optional TOML file, and
//! `MERGINGTON_*` environment variables, in increasing order of precedence.
//! Command-line flags are applied on top by the binary.

use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::server::ServerConfig;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse TOML config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,

    /// Seed dataset configuration
    pub seed: SeedConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Where the registry's initial activities come from
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedConfig {
    /// Seed file path. The built-in activity list is used when unset.
    pub path: Option<PathBuf>,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const LOG_FORMATS: [&str; 2] = ["text", "json"];

impl Config {
    /// Load configuration from defaults and environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_env_overrides()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Load from an optional file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        let config = config.with_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `MERGINGTON_*` environment variables on top of this config
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Some(host) = env_var("MERGINGTON_HOST") {
            let ip: IpAddr = host.parse().map_err(|_| {
                ConfigError::invalid("MERGINGTON_HOST", format!("Invalid IP address: {host}"))
            })?;
            self.server.bind_address.set_ip(ip);
        }

        if let Some(port) = env_var("MERGINGTON_PORT") {
            let port: u16 = port
                .parse()
                .map_err(|_| ConfigError::invalid("MERGINGTON_PORT", format!("Invalid port: {port}")))?;
            self.server.bind_address.set_port(port);
        }

        if let Some(dir) = env_var("MERGINGTON_STATIC_DIR") {
            self.server.static_dir = PathBuf::from(dir);
        }

        if let Some(enabled) = env_var("MERGINGTON_ENABLE_CORS") {
            self.server.enable_cors = parse_bool("MERGINGTON_ENABLE_CORS", &enabled)?;
        }

        if let Some(enabled) = env_var("MERGINGTON_REQUEST_LOGGING") {
            self.server.enable_request_logging =
                parse_bool("MERGINGTON_REQUEST_LOGGING", &enabled)?;
        }

        if let Some(path) = env_var("MERGINGTON_SEED_PATH") {
            self.seed.path = Some(PathBuf::from(path));
        }

        if let Some(level) = env_var("MERGINGTON_LOG_LEVEL") {
            self.logging.level = level.to_lowercase();
        }

        if let Some(format) = env_var("MERGINGTON_LOG_FORMAT") {
            self.logging.format = format.to_lowercase();
        }

        Ok(self)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.server.validate()?;

        if !LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::invalid(
                "logging.level",
                format!("Expected one of {}", LOG_LEVELS.join(", ")),
            ));
        }

        if !LOG_FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::invalid(
                "logging.format",
                format!("Expected one of {}", LOG_FORMATS.join(", ")),
            ));
        }

        Ok(())
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_bool(field: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ConfigError::invalid(field, format!("Expected a boolean, got {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const ENV_VARS: [&str; 8] = [
        "MERGINGTON_HOST",
        "MERGINGTON_PORT",
        "MERGINGTON_STATIC_DIR",
        "MERGINGTON_ENABLE_CORS",
        "MERGINGTON_REQUEST_LOGGING",
        "MERGINGTON_SEED_PATH",
        "MERGINGTON_LOG_LEVEL",
        "MERGINGTON_LOG_FORMAT",
    ];

    fn clear_env() {
        for var in ENV_VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address.port(), 8000);
        assert!(config.seed.path.is_none());
    }

    #[test]
    fn test_invalid_log_format() {
        let mut config = Config::default();
        config.logging.format = "xml".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[server]
bind_address = "127.0.0.1:9001"
enable_cors = false

[seed]
path = "data/activities.toml"
"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.server.bind_address.port(), 9001);
        assert!(!config.server.enable_cors);
        assert!(config.server.enable_request_logging);
        assert_eq!(config.seed.path, Some(PathBuf::from("data/activities.toml")));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_from_file_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[server\nbind_address = 1").unwrap();
        assert!(matches!(
            Config::from_file(file.path()),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    #[serial]
    fn test_env_overrides() {
        clear_env();
        std::env::set_var("MERGINGTON_PORT", "9100");
        std::env::set_var("MERGINGTON_ENABLE_CORS", "false");
        std::env::set_var("MERGINGTON_LOG_FORMAT", "JSON");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.server.bind_address.port(), 9100);
        assert!(!config.server.enable_cors);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    #[serial]
    fn test_env_invalid_port() {
        clear_env();
        std::env::set_var("MERGINGTON_PORT", "eighty");

        let result = Config::from_env();
        clear_env();

        assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
    }

    #[test]
    fn test_parse_bool() {
        assert!(parse_bool("x", "Yes").unwrap());
        assert!(!parse_bool("x", "0").unwrap());
        assert!(parse_bool("x", "maybe").is_err());
    }
}
