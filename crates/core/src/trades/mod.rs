//! Trade records: the validated `Trade` and the untyped `ProposedTrade`
//! boundary record it is parsed from.

mod trades_model;

pub use trades_model::{ProposedTrade, Trade, TradeAction, TradeSchemaError};

#[cfg(test)]
mod trades_model_tests;
