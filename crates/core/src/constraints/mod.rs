//! Constraint checking of proposed trades against holdings, prices and cash.

mod constraint_checker;
mod constraints_model;

pub use constraint_checker::check_trades;
pub use constraints_model::{BudgetSummary, ConstraintReport, Violation, ViolationKind};
