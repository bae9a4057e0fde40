//! A [`TradeProposer`] that asks a language model for the trade plan.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};
use serde::Deserialize;
use valuedesk_core::refinement::{Proposal, ProposalContext, TradeProposer};
use valuedesk_core::trades::ProposedTrade;

use crate::client::{complete_with_retry, ChatMessage, ChatModel, ChatRequest};
use crate::config::ModelConfig;
use crate::error::AgentError;
use crate::reply::parse_reply;

const AGENT_NAME: &str = "portfolio_manager";

const SYSTEM_PROMPT: &str = "You are a portfolio manager refining a trade plan over several rounds. \
The user message is a JSON document with the current portfolio, available capital, risk profile (1-10), \
per-ticker signals, prices and, after the first round, the constraint report and simulation of your \
previous proposal. Sells execute before buys. Never sell more shares than are held, only trade tickers \
with a positive price and keep net buy cost within available capital plus sell proceeds. \
Reply with JSON only: {\"proposed_trades\": [{\"action\": \"buy|sell\", \"ticker\": \"XXX\", \"shares\": int}], \
\"target_allocation\": {\"TICKER\": weight}, \"notes\": [\"...\"], \"errors\": [\"...\"]}";

/// Notes arrive either as a list or as a single string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ReplyNotes {
    List(Vec<String>),
    Text(String),
}

impl Default for ReplyNotes {
    fn default() -> Self {
        ReplyNotes::List(Vec::new())
    }
}

impl ReplyNotes {
    fn joined(self) -> String {
        match self {
            ReplyNotes::List(notes) => notes.join("; "),
            ReplyNotes::Text(note) => note,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ManagerReply {
    proposed_trades: Vec<ProposedTrade>,
    #[serde(default)]
    target_allocation: BTreeMap<String, f64>,
    #[serde(default)]
    notes: ReplyNotes,
    #[serde(default)]
    errors: Vec<String>,
}

impl From<ManagerReply> for Proposal {
    fn from(reply: ManagerReply) -> Self {
        Proposal {
            trades: reply.proposed_trades,
            target_allocation: reply.target_allocation,
            notes: reply.notes.joined(),
            errors: reply.errors,
        }
    }
}

/// Drafts each refinement round by sending the round's context, serialized
/// as JSON, to a chat model.
pub struct ModelTradeProposer<M: ChatModel> {
    model: Arc<M>,
    config: ModelConfig,
}

impl<M: ChatModel> ModelTradeProposer<M> {
    pub fn new(model: Arc<M>, config: ModelConfig) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    fn build_request(&self, ctx: &ProposalContext) -> Result<ChatRequest, AgentError> {
        let context = serde_json::to_string_pretty(ctx)
            .map_err(|e| AgentError::invalid_input(format!("unserializable context: {}", e)))?;
        Ok(ChatRequest::new(
            &self.config,
            vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(context)],
        ))
    }

    /// One round: request, reply, parse. Errors keep their agent detail.
    pub async fn draft(&self, ctx: &ProposalContext) -> Result<Proposal, AgentError> {
        let request = self.build_request(ctx)?;
        let raw = complete_with_retry(self.model.as_ref(), &self.config, AGENT_NAME, &request).await?;
        debug!("{} replied with {} bytes", AGENT_NAME, raw.len());

        let proposal: Proposal = parse_reply::<ManagerReply>(AGENT_NAME, &raw)?.into();
        info!(
            "Round {}: model proposed {} trades",
            ctx.iteration,
            proposal.trades.len()
        );
        Ok(proposal)
    }
}

#[async_trait]
impl<M: ChatModel> TradeProposer for ModelTradeProposer<M> {
    fn name(&self) -> &str {
        AGENT_NAME
    }

    async fn propose(&self, ctx: &ProposalContext) -> valuedesk_core::Result<Proposal> {
        Ok(self.draft(ctx).await?)
    }
}
