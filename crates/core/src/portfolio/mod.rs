//! Portfolio holdings and their valuation.

mod portfolio_model;
pub mod valuation;

pub use portfolio_model::Portfolio;
