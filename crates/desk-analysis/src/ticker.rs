//! Ticker extraction from free-text queries

use desk_core::{Error, Result, Ticker};

/// Find the first ticker-shaped token in a query
///
/// Splits on whitespace, uppercases each token and returns the first one made
/// of two to five ASCII letters. Falls back to the `UNKNOWN` sentinel, which
/// callers should treat as a valid but low-confidence result.
pub fn extract(text: &str) -> Ticker {
    text.split_whitespace()
        .find_map(|token| Ticker::parse(token).ok())
        .unwrap_or_else(Ticker::unknown)
}

/// Like [`extract`], but fails with [`Error::InvalidInput`] instead of
/// returning `UNKNOWN`
pub fn extract_strict(text: &str) -> Result<Ticker> {
    let ticker = extract(text);
    if ticker.is_unknown() {
        Err(Error::InvalidInput(format!(
            "no ticker symbol found in '{}'",
            text.trim()
        )))
    } else {
        Ok(ticker)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_first_symbol() {
        assert_eq!(extract("analyze AAPL now").as_str(), "AAPL");
        assert_eq!(extract("Analyze TSLA for trading").as_str(), "TSLA");
        assert_eq!(extract("what about msft?").as_str(), "WHAT");
    }

    #[test]
    fn test_extract_lowercase_is_normalized() {
        assert_eq!(extract("nvda").as_str(), "NVDA");
    }

    #[test]
    fn test_extract_skips_long_and_punctuated_tokens() {
        assert_eq!(extract("fundamentals brk.b, ko").as_str(), "KO");
        assert_eq!(extract("x GOOGLE amd").as_str(), "AMD");
    }

    #[test]
    fn test_extract_unknown() {
        assert!(extract("12345 !!!").is_unknown());
        assert!(extract("").is_unknown());
        assert!(extract("   ").is_unknown());
    }

    #[test]
    fn test_extract_strict() {
        assert_eq!(extract_strict("buy IBM").unwrap().as_str(), "IBM");
        assert!(matches!(
            extract_strict("12345 !!!"),
            Err(Error::InvalidInput(_))
        ));
    }
}
