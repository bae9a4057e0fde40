use crate::market::FinancialSummary;

use super::analysis_model::AnalysisScore;

fn above(metric: Option<f64>, threshold: f64) -> Option<f64> {
    metric.filter(|value| *value > threshold)
}

fn below(metric: Option<f64>, threshold: f64) -> Option<f64> {
    metric.filter(|value| *value < threshold)
}

/// ROE, leverage, operating margin and liquidity.
pub fn analyze_fundamentals(summary: &FinancialSummary) -> AnalysisScore {
    let mut result = AnalysisScore::new(7);

    if let Some(roe) = above(summary.return_on_equity, 0.15) {
        result.award(2, format!("Strong ROE of {:.1}%", roe * 100.0));
    }
    if below(summary.debt_to_equity, 0.5).is_some() {
        result.award(2, "Conservative debt levels");
    }
    if above(summary.operating_margin, 0.15).is_some() {
        result.award(2, "Strong operating margins");
    }
    if above(summary.current_ratio, 1.5).is_some() {
        result.award(1, "Good liquidity position");
    }

    result
}

/// Earnings growth track record.
pub fn analyze_consistency(summary: &FinancialSummary) -> AnalysisScore {
    let mut result = AnalysisScore::new(3);
    if above(summary.earnings_growth, 0.05).is_some() {
        result.award(3, "Consistent earnings growth");
    }
    result
}

/// Durable competitive advantage: return on capital and gross margin.
pub fn analyze_moat(summary: &FinancialSummary) -> AnalysisScore {
    let mut result = AnalysisScore::new(3);
    if above(summary.return_on_invested_capital, 0.15).is_some() {
        result.award(2, "High ROIC suggests a strong moat");
    }
    if above(summary.gross_margin, 0.4).is_some() {
        result.award(1, "High gross margins indicate pricing power");
    }
    result
}

/// Buybacks and dividends.
pub fn analyze_management_quality(summary: &FinancialSummary) -> AnalysisScore {
    let mut result = AnalysisScore::new(2);
    if below(summary.issuance_or_purchase_of_equity_shares, 0.0).is_some() {
        result.award(1, "Company has been repurchasing shares");
    }
    if above(summary.payout_ratio, 0.0).is_some() {
        result.award(1, "Company pays dividends");
    }
    result
}

pub fn analyze_book_value_growth(summary: &FinancialSummary) -> AnalysisScore {
    let mut result = AnalysisScore::new(2);
    if above(summary.book_value_growth, 0.1).is_some() {
        result.award(2, "Strong book value growth");
    }
    result
}

pub fn analyze_pricing_power(summary: &FinancialSummary) -> AnalysisScore {
    let mut result = AnalysisScore::new(2);
    if above(summary.gross_margin, 0.4).is_some() {
        result.award(2, "High gross margins suggest strong pricing power");
    }
    result
}
