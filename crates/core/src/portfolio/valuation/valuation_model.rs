//! Portfolio valuation domain models.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::Portfolio;

/// Point-in-time valuation of a portfolio plus its cash balance.
///
/// Derived, never stored: it is recomputed from holdings, cash and prices
/// whenever a snapshot is needed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationSnapshot {
    pub portfolio: Portfolio,
    pub cash: Decimal,
    /// shares x price per held ticker; zero for unpriced holdings
    pub position_values: BTreeMap<String, Decimal>,
    pub total_value: Decimal,
    /// Share of total value per ticker, plus the `CASH` entry.
    /// All zero when the total value is not positive.
    pub weights: BTreeMap<String, Decimal>,
    /// Held tickers that could not be priced and were valued at zero.
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub unpriced: Vec<String>,
}

impl ValuationSnapshot {
    /// Market value of all priced positions, excluding cash.
    pub fn invested_value(&self) -> Decimal {
        self.position_values.values().copied().sum()
    }

    pub fn weight(&self, key: &str) -> Decimal {
        self.weights.get(key).copied().unwrap_or(Decimal::ZERO)
    }
}
