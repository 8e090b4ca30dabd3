//! Per-request context carried by the conversation state
//!
//! The `Context` struct is a flexible key-value store for request inputs that
//! are not part of the conversation itself, such as the entry price and the
//! account balance the Manager stage sizes a position against.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known context keys
pub mod keys {
    /// Entry price for the position (number)
    pub const ENTRY_PRICE: &str = "entry_price";
    /// Account balance used for the 2% risk rule (number)
    pub const ACCOUNT_BALANCE: &str = "account_balance";
    /// Stop-loss distance in percent below entry (number)
    pub const STOP_LOSS_PERCENT: &str = "stop_loss_percent";
    /// Caller supplied request identifier (string)
    pub const REQUEST_ID: &str = "request_id";
    /// Position sizing produced by the Manager stage (object)
    pub const RISK_RESULT: &str = "risk_result";
}

/// Context passed through the pipeline alongside the messages
///
/// Keys are kept ordered so that a serialized state is byte-for-byte
/// reproducible.
///
/// # Example
///
/// ```
/// use desk_core::Context;
///
/// let ctx = Context::new()
///     .with_entry_price(125.0)
///     .with_account_balance(10_000.0);
///
/// assert_eq!(ctx.entry_price(), Some(125.0));
/// assert_eq!(ctx.stop_loss_percent(), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Context {
    data: BTreeMap<String, serde_json::Value>,
}

impl Context {
    /// Create a new empty context
    pub fn new() -> Self {
        Self::default()
    }

    // =========== Builder Methods ===========

    /// Set the entry price
    pub fn with_entry_price(mut self, price: f64) -> Self {
        self.insert(keys::ENTRY_PRICE, serde_json::json!(price));
        self
    }

    /// Set the account balance
    pub fn with_account_balance(mut self, balance: f64) -> Self {
        self.insert(keys::ACCOUNT_BALANCE, serde_json::json!(balance));
        self
    }

    /// Set the stop-loss percent
    pub fn with_stop_loss_percent(mut self, percent: f64) -> Self {
        self.insert(keys::STOP_LOSS_PERCENT, serde_json::json!(percent));
        self
    }

    /// Set the request ID
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.insert(keys::REQUEST_ID, serde_json::json!(request_id.into()));
        self
    }

    // =========== Common Accessors ===========

    pub fn entry_price(&self) -> Option<f64> {
        self.get(keys::ENTRY_PRICE).and_then(serde_json::Value::as_f64)
    }

    pub fn account_balance(&self) -> Option<f64> {
        self.get(keys::ACCOUNT_BALANCE)
            .and_then(serde_json::Value::as_f64)
    }

    pub fn stop_loss_percent(&self) -> Option<f64> {
        self.get(keys::STOP_LOSS_PERCENT)
            .and_then(serde_json::Value::as_f64)
    }

    pub fn request_id(&self) -> Option<&str> {
        self.get(keys::REQUEST_ID).and_then(|v| v.as_str())
    }

    // =========== Generic Key-Value Operations ===========

    /// Insert a value into the context
    pub fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    /// Get a value from the context
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    /// Insert a typed value into the context
    ///
    /// Serializes the value to JSON before storing.
    pub fn insert_typed<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> crate::Result<()> {
        let json_value = serde_json::to_value(value).map_err(|e| {
            crate::Error::ProcessingFailed(format!("Failed to serialize context value: {e}"))
        })?;
        self.data.insert(key.into(), json_value);
        Ok(())
    }

    /// Get a typed value from the context
    pub fn get_typed<T: for<'de> Deserialize<'de>>(&self, key: &str) -> crate::Result<Option<T>> {
        match self.data.get(key) {
            None => Ok(None),
            Some(value) => {
                let typed = serde_json::from_value(value.clone()).map_err(|e| {
                    crate::Error::ProcessingFailed(format!(
                        "Failed to deserialize context value: {e}"
                    ))
                })?;
                Ok(Some(typed))
            }
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Merge another context into this one (other values override)
    ///
    /// Used by the reducer to fold stage results into the state.
    pub fn merge(&mut self, other: Context) {
        self.data.extend(other.data);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Sizing {
        position_size: u64,
        max_loss: f64,
    }

    #[test]
    fn test_risk_inputs() {
        let ctx = Context::new()
            .with_entry_price(42.5)
            .with_account_balance(2_500.0)
            .with_stop_loss_percent(5.0)
            .with_request_id("req-7");

        assert_eq!(ctx.entry_price(), Some(42.5));
        assert_eq!(ctx.account_balance(), Some(2_500.0));
        assert_eq!(ctx.stop_loss_percent(), Some(5.0));
        assert_eq!(ctx.request_id(), Some("req-7"));
        assert_eq!(ctx.len(), 4);
    }

    #[test]
    fn test_non_numeric_price_is_ignored() {
        let mut ctx = Context::new();
        ctx.insert(keys::ENTRY_PRICE, serde_json::json!("cheap"));
        assert!(ctx.get(keys::ENTRY_PRICE).is_some());
        assert_eq!(ctx.entry_price(), None);
    }

    #[test]
    fn test_typed_risk_result() {
        let mut ctx = Context::new();
        let sizing = Sizing {
            position_size: 16,
            max_loss: 200.0,
        };

        ctx.insert_typed(keys::RISK_RESULT, &sizing).unwrap();
        let back: Sizing = ctx.get_typed(keys::RISK_RESULT).unwrap().unwrap();
        assert_eq!(back, sizing);

        let missing: Option<Sizing> = Context::new().get_typed(keys::RISK_RESULT).unwrap();
        assert!(missing.is_none());
    }

    #[test]
    fn test_typed_get_wrong_shape_fails() {
        let ctx = Context::new().with_entry_price(125.0);
        let err = ctx.get_typed::<Sizing>(keys::ENTRY_PRICE).unwrap_err();
        assert!(matches!(err, crate::Error::ProcessingFailed(_)));
    }

    #[test]
    fn test_merge_overrides() {
        let mut base = Context::new().with_entry_price(100.0).with_request_id("req-1");
        let stage = Context::new()
            .with_entry_price(90.0)
            .with_account_balance(1_000.0);

        base.merge(stage);
        assert_eq!(base.entry_price(), Some(90.0));
        assert_eq!(base.account_balance(), Some(1_000.0));
        assert_eq!(base.request_id(), Some("req-1"));
    }
}
