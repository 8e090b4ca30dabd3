//! Configuration for the trading desk

use crate::risk::{self, DEFAULT_STOP_LOSS_PERCENT};
use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding [`DeskConfig::default_price`]
pub const ENV_PRICE: &str = "DESK_PRICE";
/// Environment variable overriding [`DeskConfig::default_balance`]
pub const ENV_BALANCE: &str = "DESK_BALANCE";
/// Environment variable overriding [`DeskConfig::default_stop_loss_percent`]
pub const ENV_STOP_LOSS_PERCENT: &str = "DESK_STOP_LOSS_PERCENT";
/// Environment variable overriding [`DeskConfig::strict_input`]
pub const ENV_STRICT_INPUT: &str = "DESK_STRICT_INPUT";

/// Configuration for analysis runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeskConfig {
    /// Entry price used when a request carries none
    pub default_price: f64,

    /// Account balance used when a request carries none
    pub default_balance: f64,

    /// Stop-loss distance used when a request carries none
    pub default_stop_loss_percent: f64,

    /// Fail on missing messages and unrecognized tickers instead of
    /// continuing with a warning
    pub strict_input: bool,
}

impl Default for DeskConfig {
    fn default() -> Self {
        Self {
            default_price: 125.0,
            default_balance: 10_000.0,
            default_stop_loss_percent: DEFAULT_STOP_LOSS_PERCENT,
            strict_input: false,
        }
    }
}

impl DeskConfig {
    /// Create a new configuration builder
    pub fn builder() -> DeskConfigBuilder {
        DeskConfigBuilder::default()
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Result<Self> {
        self.with_lookup(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_lookup(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(raw) = lookup(ENV_PRICE) {
            self.default_price = parse_number(ENV_PRICE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_BALANCE) {
            self.default_balance = parse_number(ENV_BALANCE, &raw)?;
        }
        if let Some(raw) = lookup(ENV_STOP_LOSS_PERCENT) {
            self.default_stop_loss_percent = parse_number(ENV_STOP_LOSS_PERCENT, &raw)?;
        }
        if let Some(raw) = lookup(ENV_STRICT_INPUT) {
            self.strict_input = parse_flag(ENV_STRICT_INPUT, &raw)?;
        }
        Ok(self)
    }

    /// Validate the configuration
    ///
    /// The defaults must satisfy the position-sizing preconditions.
    pub fn validate(&self) -> Result<()> {
        risk::validate_inputs(
            self.default_price,
            self.default_balance,
            self.default_stop_loss_percent,
        )
        .map_err(|e| Error::Config(format!("invalid default: {e}")))
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse()
        .map_err(|_| Error::Config(format!("{key} must be a number, got '{raw}'")))
}

fn parse_flag(key: &str, raw: &str) -> Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(Error::Config(format!("{key} must be a boolean, got '{raw}'"))),
    }
}

/// Builder for DeskConfig
#[derive(Debug, Default)]
pub struct DeskConfigBuilder {
    default_price: Option<f64>,
    default_balance: Option<f64>,
    default_stop_loss_percent: Option<f64>,
    strict_input: Option<bool>,
}

impl DeskConfigBuilder {
    pub fn default_price(mut self, price: f64) -> Self {
        self.default_price = Some(price);
        self
    }

    pub fn default_balance(mut self, balance: f64) -> Self {
        self.default_balance = Some(balance);
        self
    }

    pub fn default_stop_loss_percent(mut self, percent: f64) -> Self {
        self.default_stop_loss_percent = Some(percent);
        self
    }

    pub fn strict_input(mut self, strict: bool) -> Self {
        self.strict_input = Some(strict);
        self
    }

    /// Build and validate the configuration
    pub fn build(self) -> Result<DeskConfig> {
        let defaults = DeskConfig::default();
        let config = DeskConfig {
            default_price: self.default_price.unwrap_or(defaults.default_price),
            default_balance: self.default_balance.unwrap_or(defaults.default_balance),
            default_stop_loss_percent: self
                .default_stop_loss_percent
                .unwrap_or(defaults.default_stop_loss_percent),
            strict_input: self.strict_input.unwrap_or(defaults.strict_input),
        };

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = DeskConfig::default();
        assert!((config.default_price - 125.0).abs() < f64::EPSILON);
        assert!((config.default_balance - 10_000.0).abs() < f64::EPSILON);
        assert!((config.default_stop_loss_percent - 10.0).abs() < f64::EPSILON);
        assert!(!config.strict_input);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builder() {
        let config = DeskConfig::builder()
            .default_price(50.0)
            .default_balance(2_500.0)
            .strict_input(true)
            .build()
            .unwrap();

        assert!((config.default_price - 50.0).abs() < f64::EPSILON);
        assert!((config.default_balance - 2_500.0).abs() < f64::EPSILON);
        assert!((config.default_stop_loss_percent - 10.0).abs() < f64::EPSILON);
        assert!(config.strict_input);
    }

    #[test]
    fn test_builder_rejects_invalid_defaults() {
        let result = DeskConfig::builder().default_price(0.0).build();
        assert!(matches!(result, Err(Error::Config(_))));

        let result = DeskConfig::builder().default_stop_loss_percent(100.0).build();
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_lookup_overrides() {
        let config = DeskConfig::default()
            .with_lookup(lookup(&[
                (ENV_PRICE, "99.5"),
                (ENV_BALANCE, " 20000 "),
                (ENV_STRICT_INPUT, "Yes"),
            ]))
            .unwrap();

        assert!((config.default_price - 99.5).abs() < f64::EPSILON);
        assert!((config.default_balance - 20_000.0).abs() < f64::EPSILON);
        assert!((config.default_stop_loss_percent - 10.0).abs() < f64::EPSILON);
        assert!(config.strict_input);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = DeskConfig::default()
            .with_lookup(lookup(&[(ENV_BALANCE, "lots")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_BALANCE));

        let err = DeskConfig::default()
            .with_lookup(lookup(&[(ENV_STRICT_INPUT, "maybe")]))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_deserialize_partial() {
        let config: DeskConfig = serde_json::from_str(r#"{"strict_input": true}"#).unwrap();
        assert!(config.strict_input);
        assert!((config.default_price - 125.0).abs() < f64::EPSILON);
    }
}
