//! Sentiment analysis stage

use super::{input_text, resolve_ticker};
use crate::config::DeskConfig;
use crate::indicators::{self, Indicators};
use desk_core::{ConversationState, ReportSlot, Result, Stage, StageOutput, Ticker};
use std::sync::Arc;

/// Researcher: market sentiment for the ticker in the latest user message
pub struct ResearcherStage {
    config: Arc<DeskConfig>,
}

impl ResearcherStage {
    pub fn new(config: Arc<DeskConfig>) -> Self {
        Self { config }
    }
}

impl Stage for ResearcherStage {
    fn name(&self) -> &str {
        "researcher"
    }

    fn slot(&self) -> ReportSlot {
        ReportSlot::Researcher
    }

    fn process(&self, state: &ConversationState) -> Result<StageOutput> {
        let strict = self.config.strict_input;
        let text = input_text(state.last_user_message(), strict)?;
        let ticker = resolve_ticker(self.name(), text, strict)?;

        let report = research_report(&ticker, &indicators::derive(&ticker));
        Ok(StageOutput::report_only(ReportSlot::Researcher, report))
    }
}

/// Render the sentiment report
pub fn research_report(ticker: &Ticker, ind: &Indicators) -> String {
    let bullish = ind.sentiment.is_bullish();
    let (social, analysts) = if bullish {
        ("upward", "Majority Buy recommendations")
    } else {
        ("downward", "Mixed with caution signals")
    };

    format!(
        "📊 **Researcher Analysis for {ticker}**\n\n\
         **Market Sentiment:** {sentiment}\n\
         **Confidence Level:** {confidence}%\n\n\
         **Key Findings:**\n\
         - Recent news sentiment indicates {momentum} momentum\n\
         - Social media mentions trending {social}\n\
         - Analyst ratings: {analysts}\n\n\
         **Recommendation:** {title} outlook based on current market sentiment.",
        sentiment = ind.sentiment,
        confidence = ind.confidence,
        momentum = ind.sentiment.title().to_lowercase(),
        title = ind.sentiment.title(),
    )
}
