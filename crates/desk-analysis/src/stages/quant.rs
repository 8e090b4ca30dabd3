//! Technical analysis stage

use super::{input_text, resolve_ticker};
use crate::config::DeskConfig;
use crate::indicators::{self, Indicators};
use desk_core::{ConversationState, ReportSlot, Result, Stage, StageOutput, Ticker};
use std::sync::Arc;

/// Quant: technical indicators for the ticker in the first user message
///
/// Works independently of the Researcher's report.
pub struct QuantStage {
    config: Arc<DeskConfig>,
}

impl QuantStage {
    pub fn new(config: Arc<DeskConfig>) -> Self {
        Self { config }
    }
}

impl Stage for QuantStage {
    fn name(&self) -> &str {
        "quant"
    }

    fn slot(&self) -> ReportSlot {
        ReportSlot::Quant
    }

    fn process(&self, state: &ConversationState) -> Result<StageOutput> {
        let strict = self.config.strict_input;
        let text = input_text(state.first_user_message(), strict)?;
        let ticker = resolve_ticker(self.name(), text, strict)?;

        let report = quant_report(&ticker, &indicators::derive(&ticker));
        Ok(StageOutput::report_only(ReportSlot::Quant, report))
    }
}

/// Render the technical report
pub fn quant_report(ticker: &Ticker, ind: &Indicators) -> String {
    let signal = ind.moving_average_signal;
    format!(
        "📈 **Quant Analysis for {ticker}**\n\n\
         **Technical Indicators:**\n\
         - RSI (14-day): {rsi} - {zone}\n\
         - 50-day MA: ${ma_50}\n\
         - 200-day MA: ${ma_200}\n\
         - Price Position: {signal} moving averages\n\n\
         **Pattern Recognition:**\n\
         - Trend: {trend}\n\
         - Support Level: ${support}\n\
         - Resistance Level: ${resistance}\n\n\
         **Technical Signal:** {action} signal based on moving average crossover.",
        rsi = ind.rsi,
        zone = ind.rsi_zone,
        ma_50 = ind.ma_50,
        ma_200 = ind.ma_200,
        trend = signal.trend(),
        support = ind.support,
        resistance = ind.resistance,
        action = signal.signal(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use desk_core::{Error, Message};

    fn stage() -> QuantStage {
        QuantStage::new(Arc::new(DeskConfig::default()))
    }

    #[test]
    fn test_report_contents() {
        let output = stage().process(&ConversationState::new("TSLA")).unwrap();
        let report = output.report();

        assert_eq!(output.slot(), ReportSlot::Quant);
        assert!(report.starts_with("📈 **Quant Analysis for TSLA**"));
        assert!(report.contains("- RSI (14-day): 57 - Neutral"));
        assert!(report.contains("- 50-day MA: $140"));
        assert!(report.contains("- 200-day MA: $112"));
        assert!(report.contains("- Price Position: ABOVE moving averages"));
        assert!(report.contains("- Trend: Uptrend"));
        assert!(report.contains("- Support Level: $103"));
        assert!(report.contains("- Resistance Level: $151"));
        assert!(report.contains("**Technical Signal:** Buy signal"));
    }

    #[test]
    fn test_uses_first_user_message() {
        let state: ConversationState = serde_json::from_value(serde_json::json!({
            "messages": [Message::user("IBM"), Message::user("AAPL")]
        }))
        .unwrap();

        let output = stage().process(&state).unwrap();
        assert!(output.report().contains("Quant Analysis for IBM"));
        assert!(output.report().contains("Sell signal"));
    }

    #[test]
    fn test_strict_unknown_ticker() {
        let stage = QuantStage::new(Arc::new(DeskConfig {
            strict_input: true,
            ..DeskConfig::default()
        }));
        let err = stage.process(&ConversationState::new("12345 !!!")).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
