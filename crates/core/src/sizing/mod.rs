//! Heuristic (non-model) trade sizing from signals and a risk profile.

mod heuristic_sizer;
mod sizing_model;

pub use heuristic_sizer::size_trades;
pub use sizing_model::RiskProfile;
