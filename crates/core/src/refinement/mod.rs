//! Iterative propose / check / simulate refinement of a trade plan.
//!
//! A [`TradeProposer`] drafts trades; every draft is run through the
//! constraint checker and the simulator and the results are fed back into the
//! next round. The final decision is taken deterministically from the history.

mod heuristic_proposer;
mod refinement_loop;
mod refinement_model;
mod refinement_traits;

pub use heuristic_proposer::HeuristicProposer;
pub use refinement_loop::RefinementLoop;
pub use refinement_model::*;
pub use refinement_traits::TradeProposer;

#[cfg(test)]
mod refinement_loop_tests;
