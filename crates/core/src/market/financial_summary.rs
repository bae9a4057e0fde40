use serde::{Deserialize, Serialize};

/// Fundamentals snapshot for a single ticker, as returned by the external
/// financial-metrics provider. Every metric is optional; providers routinely
/// omit fields for smaller issuers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub ticker: String,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub outstanding_shares: Option<f64>,
    /// Most recent closing price, when a quote was fetched alongside the metrics.
    #[serde(default)]
    pub latest_close: Option<f64>,
    #[serde(default)]
    pub return_on_equity: Option<f64>,
    #[serde(default)]
    pub debt_to_equity: Option<f64>,
    #[serde(default)]
    pub operating_margin: Option<f64>,
    #[serde(default)]
    pub current_ratio: Option<f64>,
    #[serde(default)]
    pub earnings_growth: Option<f64>,
    #[serde(default)]
    pub return_on_invested_capital: Option<f64>,
    #[serde(default)]
    pub gross_margin: Option<f64>,
    /// Net equity issuance; negative when the company bought back shares.
    #[serde(default)]
    pub issuance_or_purchase_of_equity_shares: Option<f64>,
    #[serde(default)]
    pub payout_ratio: Option<f64>,
    #[serde(default)]
    pub book_value_growth: Option<f64>,
    #[serde(default)]
    pub net_income: Option<f64>,
    #[serde(default)]
    pub depreciation_and_amortization: Option<f64>,
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
}

impl FinancialSummary {
    pub fn new(ticker: &str) -> Self {
        Self {
            ticker: super::normalize_ticker(ticker),
            ..Default::default()
        }
    }

    /// Estimates a per-share price.
    ///
    /// Prefers the latest close; falls back to market cap divided by
    /// outstanding shares. Returns `None` when neither is usable.
    pub fn estimated_price(&self) -> Option<f64> {
        if let Some(close) = self.latest_close.filter(|c| c.is_finite() && *c > 0.0) {
            return Some(close);
        }
        match (self.market_cap, self.outstanding_shares) {
            (Some(cap), Some(shares)) if cap > 0.0 && shares > 0.0 => {
                let price = cap / shares;
                price.is_finite().then_some(price)
            }
            _ => None,
        }
    }
}
