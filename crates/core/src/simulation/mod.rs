//! What-if simulation: applies a trade list to a portfolio and cash balance
//! and reports the valuation before and after.

mod simulation_model;
mod trade_simulator;

pub use simulation_model::{AppliedTrade, SimulationReport};
pub use trade_simulator::simulate_trades;
