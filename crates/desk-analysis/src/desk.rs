//! Analysis entry point
//!
//! [`TradingDesk`] owns a configured [`Pipeline`] and turns a ticker or a
//! free-text question into an [`AnalysisReport`].

use crate::config::DeskConfig;
use crate::format::currency;
use crate::risk::{self, RiskResult};
use crate::stages::{ManagerStage, QuantStage, ResearcherStage};
use crate::ticker;
use desk_core::context::keys;
use desk_core::{Context, ConversationState, Error, Message, ReportSlot, Result, Ticker};
use desk_workflow::Pipeline;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

/// Inputs of one analysis
///
/// Only the ticker is required. Unset sizing inputs fall back to the
/// [`DeskConfig`] defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub ticker: String,
    pub user_message: Option<String>,
    pub price: Option<f64>,
    pub balance: Option<f64>,
    pub stop_loss_percent: Option<f64>,
    pub request_id: Option<String>,
}

impl AnalysisRequest {
    pub fn new(ticker: impl Into<String>) -> Self {
        Self {
            ticker: ticker.into(),
            ..Self::default()
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.user_message = Some(message.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_balance(mut self, balance: f64) -> Self {
        self.balance = Some(balance);
        self
    }

    pub fn with_stop_loss_percent(mut self, percent: f64) -> Self {
        self.stop_loss_percent = Some(percent);
        self
    }

    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    fn context(&self) -> Context {
        let mut context = Context::new();
        if let Some(price) = self.price {
            context = context.with_entry_price(price);
        }
        if let Some(balance) = self.balance {
            context = context.with_account_balance(balance);
        }
        if let Some(percent) = self.stop_loss_percent {
            context = context.with_stop_loss_percent(percent);
        }
        if let Some(id) = &self.request_id {
            context = context.with_request_id(id.clone());
        }
        context
    }
}

/// Everything one pipeline run produced
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub ticker: Ticker,
    pub researcher_report: String,
    pub quant_report: String,
    pub risk_report: String,
    pub final_message: String,
    pub messages: Vec<Message>,
    pub risk: RiskResult,
    /// Low-confidence outcomes that did not fail the run
    pub warnings: Vec<String>,
}

impl AnalysisReport {
    pub fn is_tradeable(&self) -> bool {
        self.risk.is_tradeable()
    }

    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Three-stage advisory desk
///
/// Reentrant: one desk can serve concurrent analyses, each with its own state.
pub struct TradingDesk {
    config: Arc<DeskConfig>,
    manager: Arc<ManagerStage>,
    pipeline: Pipeline,
}

impl TradingDesk {
    /// Create a desk after validating `config`
    pub fn new(config: DeskConfig) -> Result<Self> {
        config.validate()?;
        let config = Arc::new(config);
        let manager = Arc::new(ManagerStage::new(config.clone()));

        let pipeline = Pipeline::builder()
            .researcher(Arc::new(ResearcherStage::new(config.clone())))
            .quant(Arc::new(QuantStage::new(config.clone())))
            .manager(manager.clone())
            .build()?;

        Ok(Self {
            config,
            manager,
            pipeline,
        })
    }

    pub fn config(&self) -> &DeskConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &Pipeline {
        &self.pipeline
    }

    /// Analyze `ticker`, defaulting the message to `"Analyze {ticker} for trading"`
    pub fn analyze(&self, ticker: &str, user_message: Option<&str>) -> Result<AnalysisReport> {
        let mut request = AnalysisRequest::new(ticker);
        if let Some(message) = user_message {
            request = request.with_message(message);
        }
        self.analyze_request(request)
    }

    /// Analyze a free-text question, extracting the ticker from it first
    pub fn ask(&self, text: &str) -> Result<AnalysisReport> {
        self.analyze_request(self.question_request(text)?)
    }

    /// The request [`ask`](Self::ask) runs for `text`, open to further inputs
    pub fn question_request(&self, text: &str) -> Result<AnalysisRequest> {
        let strict = self.config.strict_input;
        if strict && text.trim().is_empty() {
            return Err(Error::EmptyInput);
        }

        let ticker = if strict {
            ticker::extract_strict(text)?
        } else {
            ticker::extract(text)
        };
        let symbol = if ticker.is_unknown() { "" } else { ticker.as_str() };

        Ok(AnalysisRequest::new(symbol).with_message(text))
    }

    /// Run the pipeline for a fully specified request
    pub fn analyze_request(&self, request: AnalysisRequest) -> Result<AnalysisReport> {
        let strict = self.config.strict_input;
        let mut warnings = Vec::new();

        let raw = request.ticker.trim();
        let explicit = if raw.is_empty() {
            None
        } else {
            let ticker = ticker::extract(raw);
            if ticker.is_unknown() {
                if strict {
                    return Err(Error::InvalidInput(format!("'{raw}' is not a ticker symbol")));
                }
                warn!(input = raw, "Ticker not recognized, using UNKNOWN");
                warnings.push(format!(
                    "'{raw}' is not a ticker symbol; the analysis uses {}",
                    Ticker::UNKNOWN
                ));
            }
            Some(ticker)
        };

        // Reject bad sizing inputs before any stage runs
        risk::validate_inputs(
            request.price.unwrap_or(self.config.default_price),
            request.balance.unwrap_or(self.config.default_balance),
            request
                .stop_loss_percent
                .unwrap_or(self.config.default_stop_loss_percent),
        )?;

        let message = match (&request.user_message, &explicit) {
            (Some(message), _) => message.clone(),
            (None, Some(ticker)) if !ticker.is_unknown() => format!("Analyze {ticker} for trading"),
            (None, Some(_)) => format!("Analyze {raw} for trading"),
            (None, None) => return Err(Error::EmptyInput),
        };

        let mut state = ConversationState::new(message).with_context(request.context());
        if let Some(ticker) = explicit.clone() {
            state = state.with_ticker(ticker);
        }

        let ticker = self.manager.resolve_ticker(&state)?;
        if explicit.is_none() && ticker.is_unknown() {
            warnings.push(format!(
                "No ticker symbol recognized in the message; the analysis uses {}",
                Ticker::UNKNOWN
            ));
        }

        let state = self.pipeline.run(state)?;
        let risk: RiskResult = state
            .context()
            .get_typed(keys::RISK_RESULT)?
            .ok_or_else(|| Error::ProcessingFailed("manager produced no risk result".to_string()))?;
        if !risk.is_tradeable() {
            warnings.push(format!(
                "One share risks {} but the budget is {}; position size is 0",
                currency(risk.risk_per_share),
                currency(risk.risk_per_trade),
            ));
        }

        info!(
            request_id = state.context().request_id().unwrap_or("-"),
            ticker = %ticker,
            position_size = risk.position_size,
            warnings = warnings.len(),
            "Analysis completed"
        );

        Ok(AnalysisReport {
            researcher_report: report(&state, ReportSlot::Researcher)?,
            quant_report: report(&state, ReportSlot::Quant)?,
            risk_report: report(&state, ReportSlot::Risk)?,
            final_message: state
                .final_message()
                .map(str::to_string)
                .ok_or_else(|| Error::ProcessingFailed("no final message".to_string()))?,
            messages: state.messages().to_vec(),
            ticker,
            risk,
            warnings,
        })
    }
}

fn report(state: &ConversationState, slot: ReportSlot) -> Result<String> {
    state
        .report(slot)
        .map(str::to_string)
        .ok_or_else(|| Error::ProcessingFailed(format!("{slot} report missing")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk() -> TradingDesk {
        TradingDesk::new(DeskConfig::default()).unwrap()
    }

    fn strict_desk() -> TradingDesk {
        TradingDesk::new(DeskConfig::builder().strict_input(true).build().unwrap()).unwrap()
    }

    #[test]
    fn test_analyze_default_message() {
        let report = desk().analyze("tsla", None).unwrap();

        assert_eq!(report.ticker.as_str(), "TSLA");
        assert_eq!(report.messages[0], Message::user("Analyze TSLA for trading"));
        assert_eq!(report.messages.len(), 4);
        assert_eq!(report.risk.position_size, 16);
        assert!(!report.has_warnings());
    }

    #[test]
    fn test_request_overrides() {
        let report = desk()
            .analyze_request(
                AnalysisRequest::new("AMD")
                    .with_price(20.0)
                    .with_balance(1_000.0)
                    .with_request_id("req-1"),
            )
            .unwrap();

        assert_eq!(report.risk.position_size, 10);
        assert!(report.risk_report.contains("- Current Price: $20.00"));
    }

    #[test]
    fn test_risk_matches_manager_output() {
        let desk = desk();
        let report = desk
            .analyze_request(AnalysisRequest::new("AMD").with_price(20.0).with_request_id("req-9"))
            .unwrap();
        assert_eq!(report.risk_report, report.risk.to_report());

        let state = desk
            .pipeline()
            .run(
                ConversationState::new("Analyze AMD for trading")
                    .with_context(Context::new().with_entry_price(20.0).with_request_id("req-9")),
            )
            .unwrap();
        let recorded: RiskResult = state.context().get_typed(keys::RISK_RESULT).unwrap().unwrap();
        assert_eq!(recorded, report.risk);
        assert_eq!(state.context().request_id(), Some("req-9"));
    }

    #[test]
    fn test_invalid_override_fails_fast() {
        let err = desk()
            .analyze_request(AnalysisRequest::new("AMD").with_price(0.0))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "price"));
    }

    #[test]
    fn test_unknown_ticker_is_a_warning() {
        let report = desk().analyze("123", None).unwrap();
        assert!(report.ticker.is_unknown());
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn test_unknown_ticker_strict() {
        let err = strict_desk().analyze("123", None).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_missing_input() {
        assert!(matches!(desk().analyze("  ", None), Err(Error::EmptyInput)));
        assert!(matches!(strict_desk().ask(" "), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_ask_extracts_ticker() {
        let report = desk().ask("analyze NVDA please").unwrap();
        assert_eq!(report.ticker.as_str(), "NVDA");
        assert_eq!(report.messages[0], Message::user("analyze NVDA please"));
    }

    #[test]
    fn test_question_request_takes_sizing_inputs() {
        let desk = desk();
        let request = desk.question_request("KO please").unwrap().with_balance(1_000.0);
        assert_eq!(request.ticker, "KO");

        let report = desk.analyze_request(request).unwrap();
        assert!((report.risk.account_balance - 1_000.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_ask_without_symbol() {
        let report = desk().ask("12345 !!!").unwrap();
        assert!(report.ticker.is_unknown());
        assert!(report.has_warnings());
    }

    #[test]
    fn test_zero_position_warning() {
        let report = desk()
            .analyze_request(AnalysisRequest::new("KO").with_price(90_000.0))
            .unwrap();
        assert!(!report.is_tradeable());
        assert!(report.warnings.iter().any(|w| w.contains("position size is 0")));
    }
}
