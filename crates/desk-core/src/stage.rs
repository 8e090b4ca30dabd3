//! Pipeline stage trait

use crate::{Context, ConversationState, Message, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Report field of the conversation state a stage writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportSlot {
    /// Sentiment report from the Researcher
    Researcher,
    /// Technical report from the Quant
    Quant,
    /// Risk block from the Manager
    Risk,
}

impl fmt::Display for ReportSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Researcher => f.write_str("researcher"),
            Self::Quant => f.write_str("quant"),
            Self::Risk => f.write_str("risk"),
        }
    }
}

/// What a stage contributes to the conversation
///
/// A stage never mutates the state directly. It returns one of these and the
/// pipeline folds it in through [`ConversationState::apply`]. Structured
/// results a later reader needs travel in `context` and are merged into the
/// state's context on apply.
#[derive(Debug, Clone, PartialEq)]
pub struct StageOutput {
    slot: ReportSlot,
    report: String,
    message: Message,
    context: Context,
}

impl StageOutput {
    /// Create an output whose assistant message is the given text
    pub fn new(slot: ReportSlot, report: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            slot,
            report: report.into(),
            message: Message::assistant(message),
            context: Context::new(),
        }
    }

    /// Create an output whose assistant message repeats the report
    pub fn report_only(slot: ReportSlot, report: impl Into<String>) -> Self {
        let report = report.into();
        Self::new(slot, report.clone(), report)
    }

    /// Attach a structured value under `key`
    pub fn with_context_value<T: Serialize>(
        mut self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self> {
        self.context.insert_typed(key, value)?;
        Ok(self)
    }

    pub fn slot(&self) -> ReportSlot {
        self.slot
    }

    pub fn report(&self) -> &str {
        &self.report
    }

    pub fn message(&self) -> &Message {
        &self.message
    }

    /// Context entries merged into the state on apply
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub(crate) fn into_parts(self) -> (ReportSlot, String, Message, Context) {
        (self.slot, self.report, self.message, self.context)
    }
}

/// One node of the advisory pipeline
///
/// Stages are synchronous and must be reentrant: the same instance may serve
/// many independent conversations at once, so all per-request data has to
/// come from the state passed in.
pub trait Stage: Send + Sync {
    /// Stage name used in logs and graphs
    fn name(&self) -> &str;

    /// Report slot this stage fills
    fn slot(&self) -> ReportSlot;

    /// Read the state and produce this stage's contribution
    fn process(&self, state: &ConversationState) -> Result<StageOutput>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_only_repeats_report() {
        let output = StageOutput::report_only(ReportSlot::Quant, "RSI 57");
        assert_eq!(output.slot(), ReportSlot::Quant);
        assert_eq!(output.report(), "RSI 57");
        assert_eq!(output.message(), &Message::assistant("RSI 57"));
    }

    #[test]
    fn test_message_is_always_assistant() {
        let output = StageOutput::new(ReportSlot::Risk, "block", "narrative + block");
        assert!(output.message().is_assistant());
        assert_eq!(output.message().text(), "narrative + block");
        assert!(output.context().is_empty());
    }

    #[test]
    fn test_context_value_is_serialized() {
        let output = StageOutput::new(ReportSlot::Risk, "block", "final")
            .with_context_value("sized", &vec![16_u64, 2])
            .unwrap();
        assert_eq!(
            output.context().get("sized"),
            Some(&serde_json::json!([16, 2]))
        );
        let back: Vec<u64> = output.context().get_typed("sized").unwrap().unwrap();
        assert_eq!(back, vec![16, 2]);
    }
}
