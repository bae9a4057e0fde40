//! Core error types for the Valuedesk engine.
//!
//! Trade-level problems (malformed trades, unpriced tickers, oversells,
//! overdrafts) are not errors: they are reported as data by the checker and
//! the simulator. The types here cover inputs that cannot be evaluated at all.

use rust_decimal::Decimal;
use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the engine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid configuration value: {0}")]
    InvalidConfigValue(String),

    #[error("Trade proposal failed: {0}")]
    Proposal(String),
}

/// Validation errors for user input and data parsing.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Risk profile must be between 1 and 10, got {0}")]
    RiskProfileOutOfRange(i64),

    #[error("Capital must not be negative, got {0}")]
    NegativeCapital(Decimal),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

// === From implementations for common error types ===

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::Json(err))
    }
}
