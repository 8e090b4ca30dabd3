//! Configuration management utilities

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Environment variable selecting the deployment environment
pub const ENV_ENVIRONMENT: &str = "DESK_ENV";
/// Environment variable selecting the log output format
pub const ENV_LOG_FORMAT: &str = "DESK_LOG_FORMAT";

/// Output format for tracing events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per event
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" | "text" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown log format: {other}")),
        }
    }
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Application name
    pub app_name: String,
    /// Environment (dev, prod, etc.)
    pub environment: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: "trade-desk".to_string(),
            environment: "development".to_string(),
            log_format: LogFormat::Pretty,
        }
    }
}

impl Config {
    /// Load configuration from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup
    ///
    /// Unset or unparseable values keep their defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(environment) = lookup(ENV_ENVIRONMENT).filter(|v| !v.trim().is_empty()) {
            config.environment = environment.trim().to_string();
        }

        if let Some(format) = lookup(ENV_LOG_FORMAT).and_then(|v| v.parse().ok()) {
            config.log_format = format;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.app_name, "trade-desk");
        assert_eq!(config.environment, "development");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_ENVIRONMENT, "production"), (ENV_LOG_FORMAT, "JSON")]);
        let config = Config::from_lookup(|k| vars.get(k).map(|v| (*v).to_string()));

        assert_eq!(config.environment, "production");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_from_lookup_ignores_garbage() {
        let config = Config::from_lookup(|k| match k {
            ENV_LOG_FORMAT => Some("xml".to_string()),
            ENV_ENVIRONMENT => Some("   ".to_string()),
            _ => None,
        });

        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.environment, "development");
    }

    #[test]
    fn test_partial_json() {
        let config: Config = serde_json::from_str(r#"{"log_format": "json"}"#).unwrap();
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.app_name, "trade-desk");
    }
}
