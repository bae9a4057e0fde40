//! Deterministic value-investing scorecards computed from a
//! [`FinancialSummary`](crate::market::FinancialSummary).
//!
//! Each scorecard awards points for metrics that clear a fixed threshold and
//! records a short reason per award. Missing metrics award nothing.

mod analysis_model;
mod buffett_tools;
mod intrinsic_value;

pub use analysis_model::{AnalysisScore, BuffettAnalysis, IntrinsicValue};
pub use buffett_tools::{
    analyze_book_value_growth, analyze_consistency, analyze_fundamentals,
    analyze_management_quality, analyze_moat, analyze_pricing_power,
};
pub use intrinsic_value::{calculate_intrinsic_value, calculate_owner_earnings};
