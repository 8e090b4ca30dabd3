//! Conversation state threaded through the pipeline

use crate::{Context, Error, Message, ReportSlot, Result, StageOutput, Ticker};
use serde::{Deserialize, Serialize};

/// State of one analysis request
///
/// Messages are append-only and each report is written exactly once. The only
/// way to change a state after construction is [`ConversationState::apply`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    messages: Vec<Message>,
    ticker: Option<Ticker>,
    researcher_report: Option<String>,
    quant_report: Option<String>,
    risk_report: Option<String>,
    #[serde(default, skip_serializing_if = "Context::is_empty")]
    context: Context,
}

impl ConversationState {
    /// Create a state holding a single user message
    pub fn new(user_message: impl Into<String>) -> Self {
        Self {
            messages: vec![Message::user(user_message)],
            ..Self::default()
        }
    }

    /// Create a state with no messages at all
    pub fn empty() -> Self {
        Self::default()
    }

    /// Set the explicit ticker
    pub fn with_ticker(mut self, ticker: Ticker) -> Self {
        self.ticker = Some(ticker);
        self
    }

    /// Set the request context
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    // =========== Accessors ===========

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Explicit ticker supplied by the caller, if any
    pub fn ticker(&self) -> Option<&Ticker> {
        self.ticker.as_ref()
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Text of the first user message
    pub fn first_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .find(|m| m.is_user())
            .map(Message::text)
    }

    /// Text of the most recent user message
    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_user())
            .map(Message::text)
    }

    /// Text of the most recent assistant message
    pub fn final_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.is_assistant())
            .map(Message::text)
    }

    /// Report stored in the given slot
    pub fn report(&self, slot: ReportSlot) -> Option<&str> {
        match slot {
            ReportSlot::Researcher => self.researcher_report.as_deref(),
            ReportSlot::Quant => self.quant_report.as_deref(),
            ReportSlot::Risk => self.risk_report.as_deref(),
        }
    }

    pub fn researcher_report(&self) -> Option<&str> {
        self.report(ReportSlot::Researcher)
    }

    pub fn quant_report(&self) -> Option<&str> {
        self.report(ReportSlot::Quant)
    }

    pub fn risk_report(&self) -> Option<&str> {
        self.report(ReportSlot::Risk)
    }

    /// Whether all three reports have been produced
    pub fn is_complete(&self) -> bool {
        self.researcher_report.is_some() && self.quant_report.is_some() && self.risk_report.is_some()
    }

    // =========== Reducer ===========

    /// Fold a stage output into the state
    ///
    /// Writes the report into its slot, appends the stage's assistant
    /// message and merges any context entries the stage attached. Fails with [`Error::ReportAlreadyWritten`] if the slot is
    /// already filled, leaving the caller's previous state untouched.
    pub fn apply(mut self, output: StageOutput) -> Result<Self> {
        let (slot, report, message, context) = output.into_parts();

        let field = match slot {
            ReportSlot::Researcher => &mut self.researcher_report,
            ReportSlot::Quant => &mut self.quant_report,
            ReportSlot::Risk => &mut self.risk_report,
        };

        if field.is_some() {
            return Err(Error::ReportAlreadyWritten(slot));
        }

        *field = Some(report);
        self.messages.push(message);
        self.context.merge(context);
        Ok(self)
    }
}
