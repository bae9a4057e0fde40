use log::debug;
use rust_decimal::Decimal;

use crate::market::PriceMap;
use crate::portfolio::valuation::calculate_valuation;
use crate::portfolio::Portfolio;
use crate::trades::{ProposedTrade, Trade, TradeAction};

use super::simulation_model::{AppliedTrade, SimulationReport};

/// Applies a trade list to a portfolio and cash balance.
///
/// All sells execute first, in input order, then all buys, in input order, so
/// that sale proceeds are available to the buys. A sell larger than the
/// holding is capped at the shares held and noted rather than rejected. Buys
/// are applied without a sufficiency check; a negative resulting balance is
/// reported as a violation. Malformed and unpriced trades, and trades whose
/// amount would not fit in a `Decimal`, are skipped and reported. The inputs
/// are not modified.
pub fn simulate_trades(
    portfolio: &Portfolio,
    cash: Decimal,
    trades: &[ProposedTrade],
    prices: &PriceMap,
) -> SimulationReport {
    let mut notes = Vec::new();
    let mut violations = Vec::new();

    let mut sells: Vec<(Trade, Decimal)> = Vec::new();
    let mut buys: Vec<(Trade, Decimal)> = Vec::new();
    let mut gross_sells = Decimal::ZERO;
    let mut gross_buys = Decimal::ZERO;
    for (index, proposed) in trades.iter().enumerate() {
        let trade = match proposed.validate() {
            Ok(trade) => trade,
            Err(err) => {
                violations.push(format!("Skipped trade #{}: {}", index, err));
                continue;
            }
        };
        let price = match prices.resolve(&trade.ticker) {
            Ok(price) => price,
            Err(issue) => {
                violations.push(format!(
                    "Skipped trade #{} ({} {} {}): {}",
                    index, trade.action, trade.shares, trade.ticker, issue
                ));
                continue;
            }
        };
        // Admit a trade only while the gross totals and the cash projected
        // from them stay representable, so the settlement below cannot overflow.
        let admitted = trade.value_at(price).and_then(|value| match trade.action {
            TradeAction::Sell => {
                let total = gross_sells.checked_add(value)?;
                cash.checked_add(total)?;
                Some((total, gross_buys))
            }
            TradeAction::Buy => {
                let total = gross_buys.checked_add(value)?;
                cash.checked_sub(total)?;
                Some((gross_sells, total))
            }
        });
        let Some((sells_total, buys_total)) = admitted else {
            violations.push(format!(
                "Skipped trade #{} ({} {} {}): amount at {} is out of range",
                index, trade.action, trade.shares, trade.ticker, price
            ));
            continue;
        };
        gross_sells = sells_total;
        gross_buys = buys_total;

        match trade.action {
            TradeAction::Sell => sells.push((trade, price)),
            TradeAction::Buy => buys.push((trade, price)),
        }
    }

    let mut holdings = portfolio.clone();
    let mut applied_trades = Vec::with_capacity(sells.len() + buys.len());
    let mut sell_proceeds = Decimal::ZERO;
    let mut buy_cost = Decimal::ZERO;

    for (trade, price) in sells {
        let held = holdings.shares(&trade.ticker);
        if trade.shares > held {
            notes.push(format!(
                "Capped sell of {}: requested {} shares, {} held",
                trade.ticker, trade.shares, held
            ));
        }
        let shares_applied = holdings.remove(&trade.ticker, trade.shares);
        if shares_applied == 0 {
            continue;
        }
        let value = Decimal::from(shares_applied) * price;
        sell_proceeds += value;
        applied_trades.push(AppliedTrade {
            action: TradeAction::Sell,
            ticker: trade.ticker,
            shares_applied,
            price,
            value,
        });
    }

    for (trade, price) in buys {
        holdings.add(&trade.ticker, trade.shares);
        let value = Decimal::from(trade.shares) * price;
        buy_cost += value;
        applied_trades.push(AppliedTrade {
            action: TradeAction::Buy,
            ticker: trade.ticker,
            shares_applied: trade.shares,
            price,
            value,
        });
    }

    let cash_after = cash + sell_proceeds - buy_cost;
    if cash_after < Decimal::ZERO {
        violations.push(format!(
            "Cash balance would be negative after trades: {}",
            cash_after.round_dp(2)
        ));
    }

    debug!(
        "Simulated {} trades ({} applied): proceeds={}, cost={}, cash {} -> {}",
        trades.len(),
        applied_trades.len(),
        sell_proceeds,
        buy_cost,
        cash,
        cash_after
    );

    SimulationReport {
        before: calculate_valuation(portfolio, cash, prices),
        after: calculate_valuation(&holdings, cash_after, prices),
        applied_trades,
        sell_proceeds,
        buy_cost,
        notes,
        violations,
    }
}
