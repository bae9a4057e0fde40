//! Market data shapes consumed by the engine: tickers, price maps and
//! fundamentals summaries supplied by an external data provider.

mod financial_summary;
mod price_map;

pub use financial_summary::FinancialSummary;
pub use price_map::{PriceMap, PricingIssue};

/// Normalizes a ticker symbol to the upper-case, whitespace-free convention
/// used as the key of portfolios, price maps and signals.
pub fn normalize_ticker(ticker: &str) -> String {
    ticker.trim().to_uppercase()
}

#[cfg(test)]
mod price_map_tests;
