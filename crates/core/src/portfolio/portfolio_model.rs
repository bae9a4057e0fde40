//! Portfolio holdings model.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::market::normalize_ticker;

/// Share counts held per ticker.
///
/// Counts are unsigned, so no holding can go negative. A holding that reaches
/// zero is removed, and zero entries are dropped when a portfolio is built,
/// so `tickers()` only ever lists positions that are actually held.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u64>", into = "BTreeMap<String, u64>")]
pub struct Portfolio {
    holdings: BTreeMap<String, u64>,
}

impl Portfolio {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shares held for a ticker; zero when the ticker is not held.
    pub fn shares(&self, ticker: &str) -> u64 {
        self.holdings
            .get(&normalize_ticker(ticker))
            .copied()
            .unwrap_or(0)
    }

    pub fn holds(&self, ticker: &str) -> bool {
        self.shares(ticker) > 0
    }

    /// Adds shares to a holding, creating it if absent.
    pub fn add(&mut self, ticker: &str, shares: u64) {
        if shares == 0 {
            return;
        }
        let entry = self.holdings.entry(normalize_ticker(ticker)).or_insert(0);
        *entry = entry.saturating_add(shares);
    }

    /// Removes up to `shares` from a holding and returns how many were
    /// actually removed. The entry disappears once it reaches zero.
    pub fn remove(&mut self, ticker: &str, shares: u64) -> u64 {
        let key = normalize_ticker(ticker);
        let Some(held) = self.holdings.get_mut(&key) else {
            return 0;
        };
        let removed = shares.min(*held);
        *held -= removed;
        if *held == 0 {
            self.holdings.remove(&key);
        }
        removed
    }

    pub fn tickers(&self) -> impl Iterator<Item = &str> {
        self.holdings.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.holdings
            .iter()
            .map(|(ticker, shares)| (ticker.as_str(), *shares))
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }
}

impl From<BTreeMap<String, u64>> for Portfolio {
    fn from(raw: BTreeMap<String, u64>) -> Self {
        raw.into_iter().collect()
    }
}

impl From<Portfolio> for BTreeMap<String, u64> {
    fn from(portfolio: Portfolio) -> Self {
        portfolio.holdings
    }
}

impl<S: AsRef<str>> FromIterator<(S, u64)> for Portfolio {
    fn from_iter<T: IntoIterator<Item = (S, u64)>>(iter: T) -> Self {
        let mut portfolio = Self::new();
        for (ticker, shares) in iter {
            portfolio.add(ticker.as_ref(), shares);
        }
        portfolio
    }
}
