use std::collections::BTreeMap;

use log::debug;
use rust_decimal::Decimal;

use crate::constants::CASH_WEIGHT_KEY;
use crate::market::{PriceMap, PricingIssue};
use crate::portfolio::valuation::ValuationSnapshot;
use crate::portfolio::Portfolio;

/// Calculates a valuation snapshot for a portfolio and cash balance.
///
/// # Arguments
///
/// * `portfolio` - Holdings to value.
/// * `cash` - Uninvested cash; carries its own weight under `CASH`.
/// * `prices` - Price estimates. Holdings without a usable price, or whose
///   value does not fit in a `Decimal`, are valued at zero and listed in
///   `unpriced`.
///
pub fn calculate_valuation(
    portfolio: &Portfolio,
    cash: Decimal,
    prices: &PriceMap,
) -> ValuationSnapshot {
    let mut position_values = BTreeMap::new();
    let mut unpriced = Vec::new();
    let mut invested = Decimal::ZERO;
    let mut total_value = cash;

    for (ticker, shares) in portfolio.iter() {
        let priced = prices.resolve(ticker).and_then(|price| {
            let value = Decimal::from(shares)
                .checked_mul(price)
                .ok_or(PricingIssue::OutOfRange)?;
            invested
                .checked_add(value)
                .zip(total_value.checked_add(value))
                .map(|(invested, total)| (value, invested, total))
                .ok_or(PricingIssue::OutOfRange)
        });
        let value = match priced {
            Ok((value, new_invested, new_total)) => {
                invested = new_invested;
                total_value = new_total;
                value
            }
            Err(issue) => {
                debug!(
                    "No usable price for held ticker {} ({}). Position value treated as ZERO.",
                    ticker, issue
                );
                unpriced.push(ticker.to_string());
                Decimal::ZERO
            }
        };
        position_values.insert(ticker.to_string(), value);
    }

    let weights = calculate_weights(&position_values, cash, total_value);

    ValuationSnapshot {
        portfolio: portfolio.clone(),
        cash,
        position_values,
        total_value,
        weights,
        unpriced,
    }
}

/// Helper to derive per-position and cash weights from values.
/// Every weight is zero when the total is not positive, and a weight that
/// does not fit in a `Decimal` is reported as zero.
fn calculate_weights(
    position_values: &BTreeMap<String, Decimal>,
    cash: Decimal,
    total_value: Decimal,
) -> BTreeMap<String, Decimal> {
    let share_of_total = |value: Decimal| {
        if total_value > Decimal::ZERO {
            value.checked_div(total_value).unwrap_or(Decimal::ZERO)
        } else {
            Decimal::ZERO
        }
    };

    let mut weights: BTreeMap<String, Decimal> = position_values
        .iter()
        .map(|(ticker, value)| (ticker.clone(), share_of_total(*value)))
        .collect();
    weights.insert(CASH_WEIGHT_KEY.to_string(), share_of_total(cash));
    weights
}
