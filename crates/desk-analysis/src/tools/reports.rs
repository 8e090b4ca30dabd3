//! Tools returning the per-stage reports for a single ticker

use crate::indicators;
use crate::stages::{consolidation_report, quant_report, research_report};
use async_trait::async_trait;
use desk_core::{Error, Result, Ticker};
use desk_tools::{Tool, schema};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Which stage report a [`ReportTool`] produces
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Researcher,
    Quant,
    Manager,
}

/// Report tool for one stage
#[derive(Debug)]
pub struct ReportTool {
    kind: ReportKind,
}

#[derive(Debug, Deserialize)]
struct ReportParams {
    ticker: String,
}

impl ReportTool {
    pub fn new(kind: ReportKind) -> Self {
        Self { kind }
    }

    fn render(&self, ticker: &Ticker) -> Result<Value> {
        let output = match self.kind {
            ReportKind::Researcher => {
                let ind = indicators::derive(ticker);
                json!({
                    "text": research_report(ticker, &ind),
                    "indicators": structured(ind)?,
                })
            }
            ReportKind::Quant => {
                let ind = indicators::derive(ticker);
                json!({
                    "text": quant_report(ticker, &ind),
                    "indicators": structured(ind)?,
                })
            }
            ReportKind::Manager => json!({
                "text": consolidation_report(ticker),
                "levels": structured(indicators::trade_levels(ticker))?,
            }),
        };
        Ok(output)
    }
}

fn structured<T: Serialize>(value: T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| Error::ProcessingFailed(e.to_string()))
}

#[async_trait]
impl Tool for ReportTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let params: ReportParams = serde_json::from_value(params)
            .map_err(|e| Error::invalid_parameter("arguments", e.to_string()))?;
        let ticker = Ticker::parse(&params.ticker)
            .map_err(|e| Error::invalid_parameter("ticker", e.to_string()))?;

        self.render(&ticker)
    }

    fn name(&self) -> &str {
        match self.kind {
            ReportKind::Researcher => "researcher_analysis",
            ReportKind::Quant => "quant_analysis",
            ReportKind::Manager => "manager_consolidation",
        }
    }

    fn description(&self) -> &str {
        match self.kind {
            ReportKind::Researcher => {
                "Get the Researcher's market sentiment analysis for a stock ticker"
            }
            ReportKind::Quant => "Get the Quant's technical indicator analysis for a stock ticker",
            ReportKind::Manager => {
                "Get the Manager's consolidation summary and trade levels for a stock ticker"
            }
        }
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "ticker": schema::string(Some("Stock ticker symbol, 2 to 5 letters")) }),
            vec!["ticker"],
        )
    }
}
