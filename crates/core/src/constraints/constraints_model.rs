use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Category of a constraint violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViolationKind {
    /// Malformed trade: bad action, missing ticker, non-positive or fractional shares.
    Schema,
    /// Ticker missing from the price map, or priced at zero, negative or non-finite.
    Pricing,
    /// Sell larger than the shares held.
    Oversell,
    /// Net cash needed by the trade list exceeds the available capital.
    Overdraft,
}

/// A single reason a trade list was rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(rename = "type")]
    pub kind: ViolationKind,
    pub ticker: Option<String>,
    /// Position of the offending trade in the input list; absent for
    /// aggregate violations such as an overdraft.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub trade_index: Option<usize>,
    pub detail: String,
}

/// Cash flows of a trade list, assuming every sell settles before any buy.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetSummary {
    pub buy_cost: Decimal,
    pub sell_proceeds: Decimal,
    /// buy_cost - sell_proceeds; negative when the list raises cash
    pub required_cash: Decimal,
    pub available_capital: Decimal,
}

/// Outcome of checking a trade list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConstraintReport {
    pub is_valid: bool,
    pub summary: BudgetSummary,
    pub violations: Vec<Violation>,
}

impl ConstraintReport {
    pub fn violations_of(&self, kind: ViolationKind) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.kind == kind)
    }

    pub fn has_violation(&self, kind: ViolationKind) -> bool {
        self.violations_of(kind).next().is_some()
    }
}
