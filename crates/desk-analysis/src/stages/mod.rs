//! The three analysis stages: Researcher, Quant and Manager

mod manager;
mod quant;
mod researcher;

pub use manager::{ManagerStage, consolidation_report, final_recommendation};
pub use quant::{QuantStage, quant_report};
pub use researcher::{ResearcherStage, research_report};

use crate::ticker;
use desk_core::{Error, Result, Ticker};
use tracing::warn;

/// Text a stage works on, or `EmptyInput` in strict mode when there is none
fn input_text(message: Option<&str>, strict: bool) -> Result<&str> {
    match message {
        Some(text) if !(strict && text.trim().is_empty()) => Ok(text),
        _ if strict => Err(Error::EmptyInput),
        _ => Ok(""),
    }
}

/// Extract a ticker, logging when the lenient path falls back to `UNKNOWN`
fn resolve_ticker(stage: &str, text: &str, strict: bool) -> Result<Ticker> {
    if strict {
        return ticker::extract_strict(text);
    }
    let ticker = ticker::extract(text);
    if ticker.is_unknown() {
        warn!(stage = stage, input = text, "No ticker recognized, using UNKNOWN");
    }
    Ok(ticker)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_text() {
        assert_eq!(input_text(Some("hi"), false).unwrap(), "hi");
        assert_eq!(input_text(Some("hi"), true).unwrap(), "hi");
        assert_eq!(input_text(None, false).unwrap(), "");
        assert_eq!(input_text(Some("  "), false).unwrap(), "  ");
        assert!(matches!(input_text(None, true), Err(Error::EmptyInput)));
        assert!(matches!(input_text(Some("  "), true), Err(Error::EmptyInput)));
    }

    #[test]
    fn test_resolve_ticker() {
        assert_eq!(resolve_ticker("t", "buy AMD", false).unwrap().as_str(), "AMD");
        assert!(resolve_ticker("t", "", false).unwrap().is_unknown());
        assert!(matches!(
            resolve_ticker("t", "", true),
            Err(Error::InvalidInput(_))
        ));
    }
}
