use std::collections::HashSet;

use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_SIGNAL_CONFIDENCE, MAX_SIGNAL_CONFIDENCE};
use crate::market::normalize_ticker;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    Bullish,
    Bearish,
    Neutral,
}

/// A bullish/bearish/neutral judgment on one ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub ticker: String,
    pub signal: SignalKind,
    /// 0-100; 50 when the producer left it out
    #[serde(default = "default_confidence")]
    pub confidence: f64,
    #[serde(default)]
    pub reasoning: String,
}

fn default_confidence() -> f64 {
    DEFAULT_SIGNAL_CONFIDENCE
}

impl Signal {
    pub fn new(ticker: &str, signal: SignalKind, confidence: f64) -> Self {
        Self {
            ticker: normalize_ticker(ticker),
            signal,
            confidence,
            reasoning: String::new(),
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Confidence as a fraction in [0, 1]. Values outside 0-100 are clamped;
    /// a non-finite confidence falls back to the default.
    pub fn confidence_fraction(&self) -> Decimal {
        let confidence = if self.confidence.is_finite() {
            self.confidence.clamp(0.0, MAX_SIGNAL_CONFIDENCE)
        } else {
            DEFAULT_SIGNAL_CONFIDENCE
        };
        let confidence = Decimal::from_f64(confidence).unwrap_or(Decimal::ZERO);
        confidence / Decimal::ONE_HUNDRED
    }
}

/// Keeps the first signal seen for each ticker, preserving input order.
pub fn first_signal_per_ticker(signals: &[Signal]) -> Vec<&Signal> {
    let mut seen = HashSet::new();
    signals
        .iter()
        .filter(|s| seen.insert(normalize_ticker(&s.ticker)))
        .collect()
}
