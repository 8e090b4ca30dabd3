//! Consolidation and risk sizing stage

use super::{input_text, resolve_ticker};
use crate::config::DeskConfig;
use crate::indicators::{self, TradeLevels};
use crate::risk::{self, RiskResult};
use desk_core::context::keys;
use desk_core::{Context, ConversationState, Error, ReportSlot, Result, Stage, StageOutput, Ticker};
use std::sync::Arc;
use tracing::warn;

const DISCLAIMER: &str = "⚠️ **Risk Disclaimer:** This is a demonstration using mock data. \
Always conduct your own research and consult with financial advisors before making \
investment decisions.";

/// Manager: consolidates the analyses and sizes the position
///
/// Price, balance and stop-loss come from the state context when present,
/// otherwise from the configured defaults. The sized [`RiskResult`] is
/// attached to the output under [`keys::RISK_RESULT`].
pub struct ManagerStage {
    config: Arc<DeskConfig>,
}

impl ManagerStage {
    pub fn new(config: Arc<DeskConfig>) -> Self {
        Self { config }
    }

    /// The explicit ticker, else one re-extracted from the first user message
    pub fn resolve_ticker(&self, state: &ConversationState) -> Result<Ticker> {
        let strict = self.config.strict_input;
        match state.ticker() {
            Some(ticker) if strict && ticker.is_unknown() => Err(Error::InvalidInput(
                "no ticker symbol was recognized".to_string(),
            )),
            Some(ticker) => Ok(ticker.clone()),
            None => {
                let text = input_text(state.first_user_message(), strict)?;
                resolve_ticker(self.name(), text, strict)
            }
        }
    }

    /// Size the position for `ticker` with the inputs found in `context`
    pub fn size_position(&self, ticker: &Ticker, context: &Context) -> Result<RiskResult> {
        risk::size(
            ticker.as_str(),
            context.entry_price().unwrap_or(self.config.default_price),
            context
                .account_balance()
                .unwrap_or(self.config.default_balance),
            context
                .stop_loss_percent()
                .unwrap_or(self.config.default_stop_loss_percent),
        )
    }
}

impl Stage for ManagerStage {
    fn name(&self) -> &str {
        "manager"
    }

    fn slot(&self) -> ReportSlot {
        ReportSlot::Risk
    }

    fn process(&self, state: &ConversationState) -> Result<StageOutput> {
        let ticker = self.resolve_ticker(state)?;
        let result = self.size_position(&ticker, state.context())?;
        if !result.is_tradeable() {
            warn!(
                ticker = %ticker,
                risk_per_trade = result.risk_per_trade,
                risk_per_share = result.risk_per_share,
                "Risk budget too small for a single share"
            );
        }

        let risk_block = result.to_report();
        let message = format!(
            "{}\n\n{}\n\n{}",
            consolidation_report(&ticker),
            risk_block,
            final_recommendation(&indicators::trade_levels(&ticker), &result),
        );

        StageOutput::new(ReportSlot::Risk, risk_block, message)
            .with_context_value(keys::RISK_RESULT, &result)
    }
}

/// Render the manager narrative that opens the final message
pub fn consolidation_report(ticker: &Ticker) -> String {
    format!(
        "🎯 **Manager Consolidation for {ticker}**\n\n\
         **Analysis Summary:**\n\
         I've reviewed both the Researcher's sentiment analysis and the Quant's technical indicators.\n\n\
         **Consensus Building:**\n\
         - Fundamental sentiment and technical signals are being evaluated\n\
         - Risk management parameters are being calculated\n\
         - Position sizing will be determined based on portfolio balance\n\n\
         **Next Step:** Calculating risk metrics using the Risk Calculator tool..."
    )
}

/// Render the closing recommendation with trade levels and the disclaimer
pub fn final_recommendation(levels: &TradeLevels, result: &RiskResult) -> String {
    let position = if result.is_tradeable() {
        format!("{} shares (as calculated above)", result.position_size)
    } else {
        "no position at the current risk budget".to_string()
    };

    format!(
        "**Final Recommendation:**\n\
         Based on comprehensive analysis from our Researcher and Quant teams:\n\
         - Entry Level: ${entry}\n\
         - Position Size: {position}\n\
         - Stop Loss: ${stop}\n\
         - Take Profit: ${target}\n\n\
         {DISCLAIMER}",
        entry = levels.entry,
        stop = levels.stop_loss,
        target = levels.take_profit,
    )
}
