use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::market::normalize_ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = TradeSchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            _ => Err(TradeSchemaError::UnknownAction(s.to_string())),
        }
    }
}

/// A validated trade: known action, normalized ticker, positive share count.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Trade {
    pub action: TradeAction,
    pub ticker: String,
    pub shares: u64,
}

impl Trade {
    pub fn buy(ticker: &str, shares: u64) -> Self {
        Self {
            action: TradeAction::Buy,
            ticker: normalize_ticker(ticker),
            shares,
        }
    }

    pub fn sell(ticker: &str, shares: u64) -> Self {
        Self {
            action: TradeAction::Sell,
            ticker: normalize_ticker(ticker),
            shares,
        }
    }

    pub fn is_sell(&self) -> bool {
        self.action == TradeAction::Sell
    }

    /// Cash amount of the trade at `price`, or `None` when it does not fit
    /// in a `Decimal`.
    pub fn value_at(&self, price: Decimal) -> Option<Decimal> {
        Decimal::from(self.shares).checked_mul(price)
    }
}

/// Reasons a proposed trade is malformed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TradeSchemaError {
    #[error("trade has no action")]
    MissingAction,

    #[error("unknown action '{0}', expected buy or sell")]
    UnknownAction(String),

    #[error("trade has no ticker")]
    MissingTicker,

    #[error("trade has no share count")]
    MissingShares,

    #[error("share count {0} is not an integer")]
    NonIntegerShares(String),

    #[error("share count {0} is not positive")]
    NonPositiveShares(String),
}

/// Trade as received from an upstream proposer, before validation.
///
/// Every field is optional and `shares` is kept as raw JSON so that malformed
/// proposals (missing fields, fractional or negative counts, unknown actions)
/// can be reported precisely instead of failing deserialization of the whole
/// list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProposedTrade {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticker: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shares: Option<Value>,
}

impl ProposedTrade {
    pub fn new(action: &str, ticker: &str, shares: impl Into<Value>) -> Self {
        Self {
            action: Some(action.to_string()),
            ticker: Some(ticker.to_string()),
            shares: Some(shares.into()),
        }
    }

    /// Normalized ticker, when one was given. Used to attribute violations
    /// even for trades that fail validation.
    pub fn ticker_hint(&self) -> Option<String> {
        self.ticker
            .as_deref()
            .map(normalize_ticker)
            .filter(|t| !t.is_empty())
    }

    /// Validates the record into a [`Trade`].
    ///
    /// Whole-number floats (`5.0`) are accepted as share counts; strings,
    /// fractions, zero and negative counts are not.
    pub fn validate(&self) -> Result<Trade, TradeSchemaError> {
        let action = self
            .action
            .as_deref()
            .ok_or(TradeSchemaError::MissingAction)?
            .parse::<TradeAction>()?;
        let ticker = self.ticker_hint().ok_or(TradeSchemaError::MissingTicker)?;
        let shares = parse_share_count(
            self.shares
                .as_ref()
                .ok_or(TradeSchemaError::MissingShares)?,
        )?;

        Ok(Trade {
            action,
            ticker,
            shares,
        })
    }
}

impl From<Trade> for ProposedTrade {
    fn from(trade: Trade) -> Self {
        Self {
            action: Some(trade.action.as_str().to_string()),
            ticker: Some(trade.ticker),
            shares: Some(Value::from(trade.shares)),
        }
    }
}

fn parse_share_count(raw: &Value) -> Result<u64, TradeSchemaError> {
    let Value::Number(number) = raw else {
        return Err(TradeSchemaError::NonIntegerShares(raw.to_string()));
    };

    if let Some(shares) = number.as_u64() {
        return match shares {
            0 => Err(TradeSchemaError::NonPositiveShares(number.to_string())),
            n => Ok(n),
        };
    }
    if number.as_i64().is_some() {
        // only negative integers fail as_u64
        return Err(TradeSchemaError::NonPositiveShares(number.to_string()));
    }

    match number.as_f64() {
        Some(f) if f.is_finite() && f.fract() == 0.0 => {
            if f <= 0.0 {
                Err(TradeSchemaError::NonPositiveShares(number.to_string()))
            } else if f > u64::MAX as f64 {
                Err(TradeSchemaError::NonIntegerShares(number.to_string()))
            } else {
                Ok(f as u64)
            }
        }
        _ => Err(TradeSchemaError::NonIntegerShares(number.to_string())),
    }
}
