use std::collections::BTreeMap;

use log::debug;
use num_traits::FromPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::{normalize_ticker, FinancialSummary};

/// Why a ticker has no usable price.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum PricingIssue {
    #[error("no price available")]
    Missing,

    #[error("price {0} is not a finite number")]
    NonFinite(f64),

    #[error("price {0} is not positive")]
    NonPositive(f64),

    #[error("price {0} cannot be represented as a decimal amount")]
    Unrepresentable(f64),

    #[error("position value is out of range")]
    OutOfRange,
}

/// Per-ticker price estimates.
///
/// Prices are kept as the raw floating-point estimates supplied upstream
/// (market cap / outstanding shares, or a latest close). They only become
/// `Decimal` amounts through [`PriceMap::resolve`], which is where missing,
/// non-positive and non-finite prices are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, Option<f64>>",
    into = "BTreeMap<String, f64>"
)]
pub struct PriceMap {
    prices: BTreeMap<String, f64>,
}

impl PriceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a price map from fundamentals summaries. Tickers without a
    /// price estimate are left out and therefore stay unpriced.
    pub fn from_summaries<'a, I>(summaries: I) -> Self
    where
        I: IntoIterator<Item = &'a FinancialSummary>,
    {
        let mut map = Self::new();
        for summary in summaries {
            match summary.estimated_price() {
                Some(price) => map.insert(&summary.ticker, price),
                None => debug!(
                    "No price estimate for {}: missing close and market cap data",
                    summary.ticker
                ),
            }
        }
        map
    }

    pub fn insert(&mut self, ticker: &str, price: f64) {
        self.prices.insert(normalize_ticker(ticker), price);
    }

    /// Raw estimate for a ticker, without any validation.
    pub fn get(&self, ticker: &str) -> Option<f64> {
        self.prices.get(&normalize_ticker(ticker)).copied()
    }

    /// Returns the usable price of a ticker, or the reason it has none.
    pub fn resolve(&self, ticker: &str) -> Result<Decimal, PricingIssue> {
        let raw = self.get(ticker).ok_or(PricingIssue::Missing)?;
        if !raw.is_finite() {
            return Err(PricingIssue::NonFinite(raw));
        }
        if raw <= 0.0 {
            return Err(PricingIssue::NonPositive(raw));
        }
        match Decimal::from_f64(raw) {
            Some(price) if price > Decimal::ZERO => Ok(price),
            _ => Err(PricingIssue::Unrepresentable(raw)),
        }
    }

    pub fn is_priced(&self, ticker: &str) -> bool {
        self.resolve(ticker).is_ok()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.prices.iter().map(|(ticker, price)| (ticker.as_str(), *price))
    }
}

impl From<BTreeMap<String, Option<f64>>> for PriceMap {
    fn from(raw: BTreeMap<String, Option<f64>>) -> Self {
        let mut map = Self::new();
        for (ticker, price) in raw {
            // null prices are treated as missing
            if let Some(price) = price {
                map.insert(&ticker, price);
            }
        }
        map
    }
}

impl From<PriceMap> for BTreeMap<String, f64> {
    fn from(map: PriceMap) -> Self {
        map.prices
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for PriceMap {
    fn from_iter<T: IntoIterator<Item = (S, f64)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (ticker, price) in iter {
            map.insert(ticker.as_ref(), price);
        }
        map
    }
}
