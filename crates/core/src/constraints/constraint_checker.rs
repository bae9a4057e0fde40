use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use crate::market::PriceMap;
use crate::portfolio::Portfolio;
use crate::trades::{ProposedTrade, TradeAction};

use super::constraints_model::{BudgetSummary, ConstraintReport, Violation, ViolationKind};

/// Checks a proposed trade list against holdings, prices and available capital.
///
/// Each trade must be well formed, reference a priced ticker and, for sells,
/// not exceed the shares still held after earlier sells of the same ticker.
/// The budget rule assumes all sells settle before any buy: the list is
/// rejected when `buy_cost - sell_proceeds` exceeds `available_capital`.
/// Trades that are malformed, unpriced or whose amount does not fit in a
/// `Decimal` do not contribute to the sums.
///
/// Nothing is corrected: every problem is returned as a [`Violation`], in
/// input order, with the aggregate overdraft (if any) last.
pub fn check_trades(
    trades: &[ProposedTrade],
    portfolio: &Portfolio,
    available_capital: Decimal,
    prices: &PriceMap,
) -> ConstraintReport {
    let mut violations = Vec::new();
    let mut buy_cost = Decimal::ZERO;
    let mut sell_proceeds = Decimal::ZERO;
    // shares still sellable per ticker once earlier sells in the list are counted
    let mut sellable: HashMap<String, u64> = HashMap::new();

    for (index, proposed) in trades.iter().enumerate() {
        let trade = match proposed.validate() {
            Ok(trade) => trade,
            Err(err) => {
                violations.push(Violation {
                    kind: ViolationKind::Schema,
                    ticker: proposed.ticker_hint(),
                    trade_index: Some(index),
                    detail: format!("Trade #{}: {}", index, err),
                });
                continue;
            }
        };

        let price = match prices.resolve(&trade.ticker) {
            Ok(price) => price,
            Err(issue) => {
                violations.push(Violation {
                    kind: ViolationKind::Pricing,
                    ticker: Some(trade.ticker.clone()),
                    trade_index: Some(index),
                    detail: format!(
                        "Trade #{}: cannot {} {}: {}",
                        index, trade.action, trade.ticker, issue
                    ),
                });
                continue;
            }
        };

        let running_total = match trade.action {
            TradeAction::Sell => sell_proceeds,
            TradeAction::Buy => buy_cost,
        };
        let Some(new_total) = trade
            .value_at(price)
            .and_then(|value| running_total.checked_add(value))
        else {
            violations.push(Violation {
                kind: ViolationKind::Pricing,
                ticker: Some(trade.ticker.clone()),
                trade_index: Some(index),
                detail: format!(
                    "Trade #{}: amount for {} {} at {} is out of range",
                    index, trade.shares, trade.ticker, price
                ),
            });
            continue;
        };

        match trade.action {
            TradeAction::Sell => {
                let remaining = sellable
                    .entry(trade.ticker.clone())
                    .or_insert_with(|| portfolio.shares(&trade.ticker));
                if trade.shares > *remaining {
                    violations.push(Violation {
                        kind: ViolationKind::Oversell,
                        ticker: Some(trade.ticker.clone()),
                        trade_index: Some(index),
                        detail: format!(
                            "Trade #{}: sell of {} {} exceeds the {} shares available",
                            index, trade.shares, trade.ticker, remaining
                        ),
                    });
                } else {
                    *remaining -= trade.shares;
                }
                sell_proceeds = new_total;
            }
            TradeAction::Buy => {
                buy_cost = new_total;
            }
        }
    }

    // both sums are non-negative, so the difference cannot overflow
    let required_cash = buy_cost - sell_proceeds;
    if required_cash > available_capital {
        violations.push(Violation {
            kind: ViolationKind::Overdraft,
            ticker: None,
            trade_index: None,
            detail: format!(
                "Trades need {} in cash but only {} is available",
                required_cash.round_dp(2),
                available_capital.round_dp(2)
            ),
        });
    }

    debug!(
        "Checked {} trades: buy_cost={}, sell_proceeds={}, required_cash={}, violations={}",
        trades.len(),
        buy_cost,
        sell_proceeds,
        required_cash,
        violations.len()
    );

    ConstraintReport {
        is_valid: violations.is_empty(),
        summary: BudgetSummary {
            buy_cost,
            sell_proceeds,
            required_cash,
            available_capital,
        },
        violations,
    }
}
