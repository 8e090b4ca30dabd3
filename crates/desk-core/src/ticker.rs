//! Ticker symbol type

use crate::{Error, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

static SYMBOL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{2,5}$").expect("ticker pattern is a valid regex"));

/// Canonical stock symbol
///
/// Either two to five uppercase ASCII letters, or the `UNKNOWN` sentinel
/// produced when no symbol could be recognized in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Sentinel symbol for unrecognized input
    pub const UNKNOWN: &'static str = "UNKNOWN";

    /// Parse a single token into a ticker
    ///
    /// The token is trimmed and uppercased before matching `^[A-Z]{2,5}$`.
    pub fn parse(raw: &str) -> Result<Self> {
        let normalized = raw.trim().to_uppercase();
        if SYMBOL_PATTERN.is_match(&normalized) {
            Ok(Self(normalized))
        } else {
            Err(Error::InvalidInput(format!("'{raw}' is not a ticker symbol")))
        }
    }

    /// The `UNKNOWN` sentinel
    pub fn unknown() -> Self {
        Self(Self::UNKNOWN.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        self.0 == Self::UNKNOWN
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters in the symbol (7 for `UNKNOWN`)
    pub fn symbol_len(&self) -> usize {
        self.0.len()
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Ticker {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        if value == Self::UNKNOWN {
            Ok(Self::unknown())
        } else {
            Self::parse(&value)
        }
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}
