//! Configuration loading for the web server and the offline commands.
//!
//! Hierarchy, later sources winning:
//! 1. Built-in defaults
//! 2. Optional TOML file
//! 3. `KARATE_*` environment variables
//!
//! CLI flags are applied on top by the binary.

use std::net::SocketAddr;
use std::path::Path;

use karate_core::{LayoutConfig, MetricsConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse config file {path}: {reason}")]
    Parse { path: String, reason: String },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g., "127.0.0.1:5000")
    pub bind_address: String,
    /// Allowed CORS origin; `*` allows any origin
    pub cors_origin: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:5000".to_string(),
            cors_origin: "*".to_string(),
        }
    }
}

impl ServerConfig {
    /// Parsed bind address.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the address is not `host:port`.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind_address.parse().map_err(|e| {
            ConfigError::InvalidConfig(format!("Invalid bind address '{}': {e}", self.bind_address))
        })
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KarateConfig {
    pub server: ServerConfig,
    pub layout: LayoutConfig,
    pub metrics: MetricsConfig,
}

impl KarateConfig {
    /// Load defaults, then `path` if given, then environment overrides.
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - The file cannot be read or is malformed TOML
    /// - An environment variable does not parse
    /// - A value fails validation
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => load_toml_file(path)?,
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `KARATE_*` overrides read through `lookup`.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if a numeric variable does not parse.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup("KARATE_BIND_ADDRESS") {
            self.server.bind_address = value;
        }

        if let Some(value) = lookup("KARATE_CORS_ORIGIN") {
            self.server.cors_origin = value;
        }

        if let Some(value) = lookup("KARATE_LAYOUT_SEED") {
            self.layout.seed = value.trim().parse().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid KARATE_LAYOUT_SEED value: {e}"))
            })?;
        }

        if let Some(value) = lookup("KARATE_TOP_K") {
            self.metrics.top_k = value.trim().parse().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid KARATE_TOP_K value: {e}"))
            })?;
        }

        if let Some(value) = lookup("KARATE_EIGENVECTOR_MAX_ITER") {
            self.metrics.eigenvector_max_iter = value.trim().parse().map_err(|e| {
                ConfigError::InvalidConfig(format!("Invalid KARATE_EIGENVECTOR_MAX_ITER value: {e}"))
            })?;
        }

        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if any value is out of range.
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.server.cors_origin.trim().is_empty() {
            return Err(ConfigError::InvalidConfig(
                "cors_origin must not be empty".to_string(),
            ));
        }

        if self.metrics.top_k == 0 {
            return Err(ConfigError::InvalidConfig(
                "metrics.top_k must be at least 1".to_string(),
            ));
        }

        if self.metrics.eigenvector_max_iter == 0 {
            return Err(ConfigError::InvalidConfig(
                "metrics.eigenvector_max_iter must be at least 1".to_string(),
            ));
        }

        if !(self.metrics.eigenvector_tolerance.is_finite() && self.metrics.eigenvector_tolerance > 0.0)
        {
            return Err(ConfigError::InvalidConfig(
                "metrics.eigenvector_tolerance must be a positive number".to_string(),
            ));
        }

        if !(self.layout.scale.is_finite() && self.layout.z_factor.is_finite()) {
            return Err(ConfigError::InvalidConfig(
                "layout.scale and layout.z_factor must be finite".to_string(),
            ));
        }

        Ok(())
    }
}

/// Load a TOML file; missing sections and fields take their defaults.
///
/// # Errors
///
/// Returns error if the file cannot be read or the TOML is malformed.
fn load_toml_file(path: &Path) -> Result<KarateConfig> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::HashMap;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = KarateConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.server.bind_address, "127.0.0.1:5000");
        assert_eq!(config.layout.seed, 42);
        assert_eq!(config.metrics.top_k, 5);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: KarateConfig = toml::from_str(
            r#"
            [server]
            cors_origin = "http://localhost:3000"

            [layout]
            iterations = 80
            "#,
        )
        .unwrap();
        assert_eq!(config.server.cors_origin, "http://localhost:3000");
        assert_eq!(config.server.bind_address, "127.0.0.1:5000");
        assert_eq!(config.layout.iterations, 80);
        assert_eq!(config.layout.seed, 42);
        assert_eq!(config.metrics, MetricsConfig::default());
    }

    #[test]
    fn test_env_var_overrides_config() {
        let mut config = KarateConfig::default();
        config
            .apply_env(env(&[
                ("KARATE_BIND_ADDRESS", "0.0.0.0:8080"),
                ("KARATE_LAYOUT_SEED", "7"),
                ("KARATE_TOP_K", "10"),
            ]))
            .unwrap();
        assert_eq!(config.server.bind_address, "0.0.0.0:8080");
        assert_eq!(config.layout.seed, 7);
        assert_eq!(config.metrics.top_k, 10);
        assert_eq!(config.metrics.eigenvector_max_iter, 1000);
    }

    #[test]
    fn test_invalid_env_value_is_rejected() {
        let mut config = KarateConfig::default();
        let result = config.apply_env(env(&[("KARATE_TOP_K", "many")]));
        assert!(matches!(result, Err(ConfigError::InvalidConfig(msg)) if msg.contains("KARATE_TOP_K")));
    }

    #[test]
    fn test_validation_rejects_bad_values() {
        let mut config = KarateConfig::default();
        config.metrics.top_k = 0;
        assert!(config.validate().is_err());

        let mut config = KarateConfig::default();
        config.server.bind_address = "not an address".to_string();
        assert!(config.validate().is_err());

        let mut config = KarateConfig::default();
        config.metrics.eigenvector_tolerance = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let result = KarateConfig::load(Some(Path::new("/nonexistent/karate.toml")));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
