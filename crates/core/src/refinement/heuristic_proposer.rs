use async_trait::async_trait;

use super::refinement_model::{Proposal, ProposalContext};
use super::refinement_traits::TradeProposer;
use crate::errors::Result;
use crate::sizing::size_trades;

/// Proposes the heuristic sizing of the context's signals every round.
///
/// Feedback is ignored, so with `stop_on_repeat` the loop ends after the
/// second round.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicProposer;

impl HeuristicProposer {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl TradeProposer for HeuristicProposer {
    fn name(&self) -> &str {
        "heuristic"
    }

    async fn propose(&self, ctx: &ProposalContext) -> Result<Proposal> {
        let trades = size_trades(
            &ctx.portfolio,
            ctx.risk_profile,
            &ctx.signals,
            &ctx.prices,
            ctx.available_capital,
        );
        let notes = format!(
            "Sized {} trades from {} signals at risk profile {}",
            trades.len(),
            ctx.signals.len(),
            ctx.risk_profile
        );
        Ok(Proposal {
            notes,
            ..Proposal::from_trades(trades)
        })
    }
}
