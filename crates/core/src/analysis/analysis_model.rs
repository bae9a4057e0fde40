use serde::{Deserialize, Serialize};

use crate::market::FinancialSummary;

use super::buffett_tools::{
    analyze_book_value_growth, analyze_consistency, analyze_fundamentals,
    analyze_management_quality, analyze_moat, analyze_pricing_power,
};
use super::intrinsic_value::calculate_intrinsic_value;

/// Points awarded by one scorecard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisScore {
    pub score: u32,
    pub max_score: u32,
    /// Reasons for each award, joined with "; "
    pub details: String,
}

impl AnalysisScore {
    pub(crate) fn new(max_score: u32) -> Self {
        Self {
            score: 0,
            max_score,
            details: String::new(),
        }
    }

    pub(crate) fn award(&mut self, points: u32, reason: impl AsRef<str>) {
        self.score += points;
        if !self.details.is_empty() {
            self.details.push_str("; ");
        }
        self.details.push_str(reason.as_ref());
    }
}

/// Owner-earnings DCF estimate.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntrinsicValue {
    pub owner_earnings: Option<f64>,
    pub intrinsic_value: Option<f64>,
    pub intrinsic_value_per_share: Option<f64>,
    pub details: String,
}

impl IntrinsicValue {
    /// Discount of `price` to the per-share value, as a fraction of the value.
    /// Negative when the price is above the estimate.
    pub fn margin_of_safety(&self, price: f64) -> Option<f64> {
        self.intrinsic_value_per_share
            .filter(|value| *value > 0.0 && price.is_finite())
            .map(|value| (value - price) / value)
    }
}

/// Every scorecard for one ticker; the context handed to a signal analyst.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuffettAnalysis {
    pub ticker: String,
    pub fundamentals: AnalysisScore,
    pub consistency: AnalysisScore,
    pub moat: AnalysisScore,
    pub management_quality: AnalysisScore,
    pub book_value_growth: AnalysisScore,
    pub pricing_power: AnalysisScore,
    pub intrinsic_value: IntrinsicValue,
    pub total_score: u32,
    pub max_score: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_of_safety: Option<f64>,
}

impl BuffettAnalysis {
    pub fn from_summary(summary: &FinancialSummary) -> Self {
        let scores = [
            analyze_fundamentals(summary),
            analyze_consistency(summary),
            analyze_moat(summary),
            analyze_management_quality(summary),
            analyze_book_value_growth(summary),
            analyze_pricing_power(summary),
        ];
        let total_score = scores.iter().map(|s| s.score).sum();
        let max_score = scores.iter().map(|s| s.max_score).sum();
        let intrinsic_value = calculate_intrinsic_value(summary);
        let margin_of_safety = summary
            .estimated_price()
            .and_then(|price| intrinsic_value.margin_of_safety(price));

        let [fundamentals, consistency, moat, management_quality, book_value_growth, pricing_power] =
            scores;

        Self {
            ticker: summary.ticker.clone(),
            fundamentals,
            consistency,
            moat,
            management_quality,
            book_value_growth,
            pricing_power,
            intrinsic_value,
            total_score,
            max_score,
            margin_of_safety,
        }
    }
}
