//! Service configuration
//!
//! Values come from an optional YAML file, then environment overrides, then
//! validation. Missing file keys keep their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const ENV_HOST: &str = "EDI_SERVICE_HOST";
pub const ENV_PORT: &str = "EDI_SERVICE_PORT";
pub const ENV_MAX_WORKERS: &str = "EDI_MAX_WORKERS";
pub const ENV_LOG_LEVEL: &str = "EDI_LOG_LEVEL";

/// Errors that can occur when loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config format: {0}")]
    InvalidFormat(String),

    #[error("Invalid value '{value}' for {key}")]
    InvalidValue { key: String, value: String },
}

impl ConfigError {
    fn invalid_value(key: &str, value: impl Into<String>) -> Self {
        Self::InvalidValue {
            key: key.to_string(),
            value: value.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// HTTP service configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub host: String,
    pub port: u16,
    /// Worker threads of the async runtime
    pub max_workers: usize,
    /// Default tracing filter; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 50051,
            max_workers: 10,
            log_level: "info".to_string(),
        }
    }
}

impl ServiceConfig {
    /// Load from an optional file and the process environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.with_overrides(|key| std::env::var(key).ok())
    }

    /// Read a YAML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml(&content)
    }

    /// Parse YAML text; an empty document yields the defaults
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(yaml)
            .map_err(|e| ConfigError::InvalidFormat(format!("YAML parse error: {e}")))
    }

    /// Apply overrides from `lookup` (normally the environment) and validate
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(host) = lookup(ENV_HOST) {
            self.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.port = port
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value(ENV_PORT, port))?;
        }
        if let Some(workers) = lookup(ENV_MAX_WORKERS) {
            self.max_workers = workers
                .trim()
                .parse()
                .map_err(|_| ConfigError::invalid_value(ENV_MAX_WORKERS, workers))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL) {
            self.log_level = level;
        }

        self.validate()?;
        Ok(self)
    }

    /// Reject values the server cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_workers == 0 {
            return Err(ConfigError::invalid_value("max_workers", "0"));
        }
        if self.host.trim().is_empty() {
            return Err(ConfigError::invalid_value("host", self.host.clone()));
        }
        Ok(())
    }

    /// Address the server listens on
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = ServiceConfig::default().with_overrides(env(&[])).unwrap();

        assert_eq!(config.host, "localhost");
        assert_eq!(config.port, 50051);
        assert_eq!(config.max_workers, 10);
        assert_eq!(config.log_level, "info");
        assert_eq!(config.bind_address(), "localhost:50051");
    }

    #[test]
    fn test_yaml_keeps_defaults_for_missing_keys() {
        let config = ServiceConfig::from_yaml("port: 8080\nlog_level: debug\n").unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.host, "localhost");
        assert_eq!(ServiceConfig::from_yaml("  \n").unwrap(), ServiceConfig::default());
    }

    #[test]
    fn test_invalid_yaml() {
        let err = ServiceConfig::from_yaml("port: [not, a, port]").unwrap_err();

        assert!(matches!(err, ConfigError::InvalidFormat(_)));
    }

    #[test]
    fn test_environment_overrides_file() {
        let config = ServiceConfig::from_yaml("host: 10.0.0.1\nport: 8080\n")
            .unwrap()
            .with_overrides(env(&[
                (ENV_PORT, "9090"),
                (ENV_MAX_WORKERS, "4"),
                (ENV_LOG_LEVEL, "warn"),
            ]))
            .unwrap();

        assert_eq!(config.host, "10.0.0.1");
        assert_eq!(config.port, 9090);
        assert_eq!(config.max_workers, 4);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_overrides() {
        let err = ServiceConfig::default()
            .with_overrides(env(&[(ENV_PORT, "http")]))
            .unwrap_err();
        assert_eq!(err.to_string(), "Invalid value 'http' for EDI_SERVICE_PORT");

        let err = ServiceConfig::default()
            .with_overrides(env(&[(ENV_MAX_WORKERS, "0")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key, .. } if key == "max_workers"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "host: 0.0.0.0\nmax_workers: 2").unwrap();

        let config = ServiceConfig::from_file(file.path()).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.max_workers, 2);

        let missing = ServiceConfig::from_file(Path::new("/nonexistent/edi.yaml")).unwrap_err();
        assert!(matches!(missing, ConfigError::Io { .. }));
    }
}
