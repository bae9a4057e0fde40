use log::debug;

use crate::constants::{
    DCF_DISCOUNT_RATE, DCF_FALLBACK_GROWTH_RATE, DCF_PROJECTION_YEARS, DCF_TERMINAL_GROWTH_RATE,
};
use crate::market::FinancialSummary;

use super::analysis_model::IntrinsicValue;

fn non_zero(metric: Option<f64>) -> Option<f64> {
    metric.filter(|value| value.is_finite() && *value != 0.0)
}

/// Net income + D&A - maintenance capex, with maintenance capex estimated as
/// D&A. Requires net income, D&A and capex to be reported and non-zero.
pub fn calculate_owner_earnings(summary: &FinancialSummary) -> Option<f64> {
    let net_income = non_zero(summary.net_income)?;
    let depreciation = non_zero(summary.depreciation_and_amortization)?;
    non_zero(summary.capital_expenditure)?;

    let maintenance_capex = depreciation;
    Some(net_income + depreciation - maintenance_capex)
}

/// Ten-year owner-earnings DCF with a Gordon-growth terminal value.
pub fn calculate_intrinsic_value(summary: &FinancialSummary) -> IntrinsicValue {
    let owner_earnings = match calculate_owner_earnings(summary) {
        Some(value) => value,
        None => {
            debug!(
                "No owner earnings for {}; skipping intrinsic value",
                summary.ticker
            );
            return IntrinsicValue {
                details: "Could not calculate owner earnings".to_string(),
                ..Default::default()
            };
        }
    };

    let growth_rate = summary
        .earnings_growth
        .filter(|g| *g > 0.0)
        .unwrap_or(DCF_FALLBACK_GROWTH_RATE);

    let dcf_value: f64 = (1..=DCF_PROJECTION_YEARS)
        .map(|year| {
            owner_earnings * (1.0 + growth_rate).powi(year)
                / (1.0 + DCF_DISCOUNT_RATE).powi(year)
        })
        .sum();
    let terminal_value = dcf_value * (1.0 + DCF_TERMINAL_GROWTH_RATE)
        / (DCF_DISCOUNT_RATE - DCF_TERMINAL_GROWTH_RATE);
    let intrinsic_value = dcf_value + terminal_value;

    let per_share = summary
        .outstanding_shares
        .filter(|shares| *shares > 0.0)
        .map(|shares| intrinsic_value / shares);

    IntrinsicValue {
        owner_earnings: Some(owner_earnings),
        intrinsic_value: Some(intrinsic_value),
        intrinsic_value_per_share: per_share,
        details: format!(
            "Intrinsic value estimated at ${}",
            group_thousands(intrinsic_value)
        ),
    }
}

/// Rounds to a whole number and inserts `,` between groups of three digits.
pub(crate) fn group_thousands(value: f64) -> String {
    let rounded = format!("{:.0}", value);
    let (sign, digits) = match rounded.strip_prefix('-') {
        Some(digits) => ("-", digits),
        None => ("", rounded.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    format!("{}{}", sign, grouped)
}
