//! Scenario files: one JSON document describing the state to evaluate.

use std::path::Path;

use anyhow::{Context, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use valuedesk_core::errors::ValidationError;
use valuedesk_core::market::normalize_ticker;
use valuedesk_core::signals::Signal;
use valuedesk_core::{FinancialSummary, Portfolio, PriceMap, ProposedTrade, RiskProfile};

/// Every field is optional; each command reads the ones it needs.
///
/// ```json
/// {
///   "portfolio": {"AAPL": 10},
///   "capital": 1000,
///   "prices": {"AAPL": 50},
///   "trades": [{"action": "sell", "ticker": "AAPL", "shares": 12}]
/// }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Scenario {
    pub portfolio: Portfolio,
    pub capital: Decimal,
    pub prices: PriceMap,
    pub summaries: Vec<FinancialSummary>,
    pub signals: Vec<Signal>,
    pub risk_profile: Option<RiskProfile>,
    pub trades: Vec<ProposedTrade>,
}

impl Scenario {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read scenario {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("invalid scenario {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let mut scenario: Scenario = serde_json::from_str(raw)?;
        if scenario.capital < Decimal::ZERO {
            return Err(ValidationError::NegativeCapital(scenario.capital).into());
        }
        for signal in &mut scenario.signals {
            signal.ticker = normalize_ticker(&signal.ticker);
        }
        Ok(scenario)
    }

    /// Estimates from `summaries`, overridden by explicit `prices`.
    pub fn price_map(&self) -> PriceMap {
        let mut prices = PriceMap::from_summaries(&self.summaries);
        for (ticker, price) in self.prices.iter() {
            prices.insert(ticker, price);
        }
        prices
    }

    pub fn require_risk_profile(&self) -> Result<RiskProfile> {
        self.risk_profile
            .context("scenario has no riskProfile (expected an integer from 1 to 10)")
    }
}
