use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::portfolio::valuation::ValuationSnapshot;
use crate::trades::TradeAction;

/// A trade as it was actually executed by the simulator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppliedTrade {
    pub action: TradeAction,
    pub ticker: String,
    /// May be lower than the requested count for capped sells.
    pub shares_applied: u64,
    pub price: Decimal,
    /// shares_applied x price
    pub value: Decimal,
}

/// Before/after state of a simulated trade list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationReport {
    pub before: ValuationSnapshot,
    pub after: ValuationSnapshot,
    /// Sells first, then buys, each group in input order.
    pub applied_trades: Vec<AppliedTrade>,
    pub sell_proceeds: Decimal,
    pub buy_cost: Decimal,
    /// Soft adjustments, such as sells capped at the shares held.
    pub notes: Vec<String>,
    /// Skipped trades and a negative resulting cash balance.
    pub violations: Vec<String>,
}

impl SimulationReport {
    pub fn cash_delta(&self) -> Decimal {
        self.after.cash - self.before.cash
    }
}
