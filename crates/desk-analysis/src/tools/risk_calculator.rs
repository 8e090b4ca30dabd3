//! Tool wrapping the position-sizing calculator

use crate::risk::{self, DEFAULT_STOP_LOSS_PERCENT};
use async_trait::async_trait;
use desk_core::{Error, Result};
use desk_tools::{Tool, schema};
use serde::Deserialize;
use serde_json::{Value, json};

/// `calculate_risk`: size a position with the 2% rule
#[derive(Debug, Default)]
pub struct RiskCalculatorTool;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RiskParams {
    ticker: String,
    price: f64,
    balance: f64,
    #[serde(default, alias = "stop_loss_percent")]
    stop_loss_percent: Option<f64>,
}

impl RiskCalculatorTool {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl Tool for RiskCalculatorTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: RiskParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_parameter("arguments", e.to_string()))?;

        let ticker = params.ticker.trim().to_uppercase();
        if ticker.is_empty() {
            return Err(Error::invalid_parameter("ticker", "must not be empty"));
        }

        let result = risk::size(
            &ticker,
            params.price,
            params.balance,
            params
                .stop_loss_percent
                .unwrap_or(DEFAULT_STOP_LOSS_PERCENT),
        )?;

        let structured =
            serde_json::to_value(&result).map_err(|e| Error::ProcessingFailed(e.to_string()))?;
        Ok(json!({
            "text": result.to_report(),
            "result": structured,
        }))
    }

    fn name(&self) -> &str {
        "calculate_risk"
    }

    fn description(&self) -> &str {
        "Calculate position size and risk metrics using the 2% rule: risk at most 2% \
         of the account balance between entry and stop-loss"
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "ticker": schema::string(Some("Stock ticker symbol")),
                "price": schema::number(Some("Current stock price, greater than 0")),
                "balance": schema::number(Some("Account balance, 0 or more")),
                "stopLossPercent": schema::with_default(
                    schema::number(Some("Stop-loss distance below entry in percent")),
                    json!(DEFAULT_STOP_LOSS_PERCENT),
                ),
            }),
            vec!["ticker", "price", "balance"],
        )
    }
}
