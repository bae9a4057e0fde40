use async_trait::async_trait;

use super::refinement_model::{Proposal, ProposalContext};
use crate::errors::Result;

/// Drafts a trade plan for one refinement round.
///
/// Implementations may be deterministic (see
/// [`HeuristicProposer`](super::HeuristicProposer)) or backed by a language
/// model. A returned error is recorded on the round; the loop carries on.
#[async_trait]
pub trait TradeProposer: Send + Sync {
    /// Used in logs and in the recorded history.
    fn name(&self) -> &str;

    async fn propose(&self, ctx: &ProposalContext) -> Result<Proposal>;
}
