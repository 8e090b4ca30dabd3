//! Position sizing with the 2% rule
//!
//! A position is sized so that a stop-loss exit loses at most 2% of the
//! account balance.

use crate::format::currency;
use desk_core::{Error, Result};
use serde::{Deserialize, Serialize};

/// Share of the balance put at risk per trade, in percent
pub const RISK_PERCENT: f64 = 2.0;

/// Stop-loss distance used when the caller gives none
pub const DEFAULT_STOP_LOSS_PERCENT: f64 = 10.0;

/// Take-profit target relative to the entry price (1:2 risk/reward at a 10% stop)
pub const TAKE_PROFIT_MULTIPLIER: f64 = 1.20;

/// Outcome of a sizing calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RiskResult {
    pub ticker: String,
    pub account_balance: f64,
    pub risk_per_trade: f64,
    pub risk_percentage: f64,
    pub price: f64,
    pub stop_loss_percent: f64,
    pub stop_loss_price: f64,
    pub risk_per_share: f64,
    pub position_size: u64,
    pub total_investment: f64,
    pub max_loss: f64,
    pub take_profit_price: f64,
    /// Total investment as a percent of the balance
    pub portfolio_allocation: f64,
}

/// Check the calculator preconditions without sizing anything
pub fn validate_inputs(price: f64, balance: f64, stop_loss_percent: f64) -> Result<()> {
    if !price.is_finite() || price <= 0.0 {
        return Err(Error::invalid_parameter(
            "price",
            format!("must be a positive number, got {price}"),
        ));
    }
    if !balance.is_finite() || balance < 0.0 {
        return Err(Error::invalid_parameter(
            "balance",
            format!("must be zero or positive, got {balance}"),
        ));
    }
    if !stop_loss_percent.is_finite() || stop_loss_percent <= 0.0 || stop_loss_percent >= 100.0 {
        return Err(Error::invalid_parameter(
            "stopLossPercent",
            format!("must be between 0 and 100 exclusive, got {stop_loss_percent}"),
        ));
    }
    Ok(())
}

/// Size a position for `ticker`
///
/// # Example
///
/// ```
/// use desk_analysis::risk;
///
/// let result = risk::size("AAPL", 125.0, 10_000.0, 10.0).unwrap();
/// assert_eq!(result.position_size, 16);
/// assert_eq!(result.max_loss, 200.0);
/// ```
pub fn size(ticker: &str, price: f64, balance: f64, stop_loss_percent: f64) -> Result<RiskResult> {
    validate_inputs(price, balance, stop_loss_percent)?;

    let risk_per_trade = round_cents(balance * (RISK_PERCENT / 100.0));
    if !risk_per_trade.is_finite() {
        return Err(Error::invalid_parameter(
            "balance",
            format!("{balance} is too large to size a position"),
        ));
    }
    let stop_loss_price = price * (1.0 - stop_loss_percent / 100.0);
    let risk_per_share = price - stop_loss_price;

    let position_size = if risk_per_share > 0.0 {
        let quotient = (risk_per_trade / risk_per_share).floor();
        if quotient >= u64::MAX as f64 {
            return Err(Error::invalid_parameter(
                "balance",
                format!("position of {quotient} shares is out of range"),
            ));
        }
        quotient as u64
    } else {
        0
    };

    let shares = position_size as f64;
    let total_investment = shares * price;
    if !total_investment.is_finite() {
        return Err(Error::invalid_parameter(
            "balance",
            format!("position of {position_size} shares is out of range"),
        ));
    }
    let portfolio_allocation = if balance > 0.0 {
        total_investment / balance * 100.0
    } else {
        0.0
    };

    Ok(RiskResult {
        ticker: ticker.to_string(),
        account_balance: balance,
        risk_per_trade,
        risk_percentage: RISK_PERCENT,
        price,
        stop_loss_percent,
        stop_loss_price,
        risk_per_share,
        position_size,
        total_investment,
        max_loss: shares * risk_per_share,
        take_profit_price: price * TAKE_PROFIT_MULTIPLIER,
        portfolio_allocation,
    })
}

fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

impl RiskResult {
    /// Whether at least one whole share fits the risk budget
    pub fn is_tradeable(&self) -> bool {
        self.position_size > 0
    }

    /// Render the calculator block shown to users
    pub fn to_report(&self) -> String {
        let take_profit_gain = (TAKE_PROFIT_MULTIPLIER - 1.0) * 100.0;
        let footer = if self.is_tradeable() {
            format!(
                "✅ **Position sized to risk at most {}% of portfolio balance**",
                self.risk_percentage
            )
        } else {
            format!(
                "⚠️ **No position: one share at this stop risks more than the {}% budget**",
                self.risk_percentage
            )
        };

        format!(
            "💰 **Risk Calculator Results for {ticker}**\n\n\
             **Portfolio Parameters:**\n\
             - Account Balance: {balance}\n\
             - Risk Per Trade ({pct}% Rule): {risk}\n\n\
             **Trade Setup:**\n\
             - Current Price: {price}\n\
             - Stop Loss Price: {stop} ({stop_pct}% below)\n\
             - Risk Per Share: {per_share}\n\n\
             **Position Sizing:**\n\
             - Recommended Shares: {shares}\n\
             - Total Investment: {investment}\n\
             - Portfolio Allocation: {allocation:.1}%\n\n\
             **Risk Management:**\n\
             - Maximum Loss: {max_loss}\n\
             - Risk/Reward Ratio: 1:2\n\
             - Take Profit Target: {target} ({gain:.0}% gain)\n\n\
             {footer}",
            ticker = self.ticker,
            balance = currency(self.account_balance),
            pct = self.risk_percentage,
            risk = currency(self.risk_per_trade),
            price = currency(self.price),
            stop = currency(self.stop_loss_price),
            stop_pct = self.stop_loss_percent,
            per_share = currency(self.risk_per_share),
            shares = self.position_size,
            investment = currency(self.total_investment),
            allocation = self.portfolio_allocation,
            max_loss = currency(self.max_loss),
            target = currency(self.take_profit_price),
            gain = take_profit_gain,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_reference_example() {
        let r = size("AAPL", 125.0, 10_000.0, 10.0).unwrap();
        assert!((r.risk_per_trade - 200.0).abs() < EPS);
        assert!((r.stop_loss_price - 112.5).abs() < EPS);
        assert!((r.risk_per_share - 12.5).abs() < EPS);
        assert_eq!(r.position_size, 16);
        assert!((r.total_investment - 2000.0).abs() < EPS);
        assert!((r.max_loss - 200.0).abs() < EPS);
        assert!((r.take_profit_price - 150.0).abs() < EPS);
        assert!((r.portfolio_allocation - 20.0).abs() < EPS);
        assert!(r.is_tradeable());
    }

    #[test]
    fn test_zero_position_when_budget_too_small() {
        let r = size("BRK", 500_000.0, 1_000.0, 10.0).unwrap();
        assert_eq!(r.position_size, 0);
        assert!(r.max_loss.abs() < EPS);
        assert!(!r.is_tradeable());
        assert!(r.to_report().contains("No position"));
    }

    #[test]
    fn test_zero_balance() {
        let r = size("AAPL", 125.0, 0.0, 10.0).unwrap();
        assert_eq!(r.position_size, 0);
        assert!(r.portfolio_allocation.abs() < EPS);
    }

    #[test]
    fn test_invalid_price() {
        for price in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = size("AAPL", price, 10_000.0, 10.0).unwrap_err();
            assert!(
                matches!(&err, Error::InvalidParameter { name, .. } if name == "price"),
                "unexpected error for {price}: {err}"
            );
        }
    }

    #[test]
    fn test_invalid_balance() {
        let err = size("AAPL", 125.0, -5.0, 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "balance"));
    }

    #[test]
    fn test_invalid_stop_loss() {
        for pct in [0.0, 100.0, 150.0, -3.0] {
            let err = size("AAPL", 125.0, 10_000.0, pct).unwrap_err();
            assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "stopLossPercent"));
        }
    }

    #[test]
    fn test_budget_overflow_is_rejected() {
        let err = size("AAPL", 125.0, 1e308, 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "balance"));
    }

    #[test]
    fn test_share_count_beyond_u64_is_rejected() {
        // 2e18 budget over 0.001 per share
        let err = size("AAPL", 0.01, 1e20, 10.0).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name, .. } if name == "balance"));
    }

    #[test]
    fn test_large_balance_keeps_invariants() {
        let r = size("AAPL", 125.0, 1e15, 10.0).unwrap();
        assert!((r.risk_per_trade - 2e13).abs() < 1.0);
        assert_eq!(r.position_size, 1_600_000_000_000);
        assert!(r.max_loss <= r.risk_per_trade);

        let json = serde_json::to_value(&r).unwrap();
        assert!(json["riskPerTrade"].is_f64());
        assert!(json["totalInvestment"].is_f64());
    }

    #[test]
    fn test_report_text() {
        let report = size("AAPL", 125.0, 10_000.0, 10.0).unwrap().to_report();
        assert!(report.starts_with("💰 **Risk Calculator Results for AAPL**"));
        assert!(report.contains("- Account Balance: $10,000.00"));
        assert!(report.contains("- Risk Per Trade (2% Rule): $200.00"));
        assert!(report.contains("- Stop Loss Price: $112.50 (10% below)"));
        assert!(report.contains("- Recommended Shares: 16"));
        assert!(report.contains("- Total Investment: $2,000.00"));
        assert!(report.contains("- Portfolio Allocation: 20.0%"));
        assert!(report.contains("- Take Profit Target: $150.00 (20% gain)"));
        assert!(report.ends_with("risk at most 2% of portfolio balance**"));
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(size("AAPL", 125.0, 10_000.0, 10.0).unwrap()).unwrap();
        assert_eq!(json["positionSize"], 16);
        assert_eq!(json["riskPerTrade"], 200.0);
        assert_eq!(json["stopLossPercent"], 10.0);
    }

    proptest! {
        #[test]
        fn max_loss_never_exceeds_budget(
            price in 0.01f64..100_000.0,
            balance in 0.0f64..10_000_000.0,
            stop in 0.1f64..99.9,
        ) {
            let r = size("TEST", price, balance, stop).unwrap();
            prop_assert!(r.max_loss >= 0.0);
            prop_assert!(r.max_loss <= r.risk_per_trade + EPS);
            prop_assert!((r.max_loss - r.position_size as f64 * r.risk_per_share).abs() < EPS);
        }
    }
}
