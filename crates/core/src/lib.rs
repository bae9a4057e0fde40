//! Valuedesk Core - deterministic portfolio simulation and constraint engine.
//!
//! Checks proposed trades against holdings, prices and capital, simulates
//! their effect, sizes trades heuristically from signals and drives an
//! iterative refinement loop over a pluggable proposer. Nothing here performs
//! I/O; model-backed proposers live in `valuedesk-agents`.

pub mod analysis;
pub mod constants;
pub mod constraints;
pub mod errors;
pub mod market;
pub mod portfolio;
pub mod refinement;
pub mod signals;
pub mod simulation;
pub mod sizing;
pub mod trades;

// Re-export the types most callers need
pub use constraints::check_trades;
pub use market::{FinancialSummary, PriceMap};
pub use portfolio::valuation::calculate_valuation;
pub use portfolio::Portfolio;
pub use simulation::simulate_trades;
pub use sizing::{size_trades, RiskProfile};
pub use trades::{ProposedTrade, Trade, TradeAction};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
