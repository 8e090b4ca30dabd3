//! Deterministic mock indicators derived from a ticker symbol
//!
//! Every value is a function of the symbol length and its parity only. The
//! constants are placeholders; determinism is what callers rely on.

use desk_core::Ticker;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Market sentiment reported by the Researcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Sentiment {
    Bullish,
    Bearish,
}

impl Sentiment {
    pub fn is_bullish(self) -> bool {
        matches!(self, Self::Bullish)
    }

    /// "Bullish" / "Bearish"
    pub fn title(self) -> &'static str {
        match self {
            Self::Bullish => "Bullish",
            Self::Bearish => "Bearish",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bullish => write!(f, "BULLISH"),
            Self::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// RSI classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RsiZone {
    Oversold,
    Neutral,
    Overbought,
}

impl RsiZone {
    /// Neutral for 40..=60, Overbought above, Oversold below
    pub fn classify(rsi: u32) -> Self {
        match rsi {
            0..40 => Self::Oversold,
            40..=60 => Self::Neutral,
            _ => Self::Overbought,
        }
    }
}

impl fmt::Display for RsiZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Oversold => write!(f, "Oversold"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Overbought => write!(f, "Overbought"),
        }
    }
}

/// Price position relative to the moving averages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MaSignal {
    Above,
    Below,
}

impl MaSignal {
    pub fn trend(self) -> &'static str {
        match self {
            Self::Above => "Uptrend",
            Self::Below => "Downtrend",
        }
    }

    /// Crossover signal: Buy above the averages, Sell below
    pub fn signal(self) -> &'static str {
        match self {
            Self::Above => "Buy",
            Self::Below => "Sell",
        }
    }
}

impl fmt::Display for MaSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Above => write!(f, "ABOVE"),
            Self::Below => write!(f, "BELOW"),
        }
    }
}

/// Sentiment and technical metrics for one symbol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Indicators {
    pub sentiment: Sentiment,
    /// Confidence in percent
    pub confidence: u32,
    pub rsi: u32,
    pub rsi_zone: RsiZone,
    pub moving_average_signal: MaSignal,
    pub ma_50: u32,
    pub ma_200: u32,
    pub support: u32,
    pub resistance: u32,
}

/// Entry, stop and target levels quoted in the final recommendation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradeLevels {
    pub entry: u32,
    pub stop_loss: u32,
    pub take_profit: u32,
}

/// Derive the indicator set for a ticker
pub fn derive(ticker: &Ticker) -> Indicators {
    let len = ticker.symbol_len() as u32;
    let even = len % 2 == 0;
    let rsi = 45 + 3 * len;

    Indicators {
        sentiment: if even {
            Sentiment::Bullish
        } else {
            Sentiment::Bearish
        },
        confidence: 75 + 2 * len,
        rsi,
        rsi_zone: RsiZone::classify(rsi),
        moving_average_signal: if even { MaSignal::Above } else { MaSignal::Below },
        ma_50: 120 + 5 * len,
        ma_200: 100 + 3 * len,
        support: 95 + 2 * len,
        resistance: 135 + 4 * len,
    }
}

/// Derive the trade levels for a ticker
pub fn trade_levels(ticker: &Ticker) -> TradeLevels {
    let len = ticker.symbol_len() as u32;
    TradeLevels {
        entry: 115 + 3 * len,
        stop_loss: 105 + 2 * len,
        take_profit: 145 + 5 * len,
    }
}
