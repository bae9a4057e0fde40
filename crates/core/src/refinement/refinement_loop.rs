use std::sync::Arc;

use log::{debug, info, warn};
use rust_decimal::Decimal;

use super::refinement_model::{
    FinalDecision, IterationFeedback, IterationRecord, ProposalContext, RefinementConfig,
    RefinementOutcome,
};
use super::refinement_traits::TradeProposer;
use crate::constraints::check_trades;
use crate::errors::Result;
use crate::market::PriceMap;
use crate::portfolio::Portfolio;
use crate::signals::Signal;
use crate::simulation::simulate_trades;
use crate::sizing::RiskProfile;
use crate::trades::ProposedTrade;

/// Drives a [`TradeProposer`] through repeated propose, check and simulate
/// rounds against a fixed starting state.
pub struct RefinementLoop {
    proposer: Arc<dyn TradeProposer>,
    config: RefinementConfig,
}

impl RefinementLoop {
    pub fn new(proposer: Arc<dyn TradeProposer>, config: RefinementConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { proposer, config })
    }

    pub fn config(&self) -> &RefinementConfig {
        &self.config
    }

    /// Runs up to `iterations` rounds and picks the final decision.
    ///
    /// Every round starts from the same portfolio and capital; only the
    /// feedback from the previous successful round changes. A proposer error
    /// is recorded on its round and does not end the loop.
    pub async fn run(
        &self,
        portfolio: &Portfolio,
        available_capital: Decimal,
        risk_profile: RiskProfile,
        signals: &[Signal],
        prices: &PriceMap,
    ) -> RefinementOutcome {
        let mut history: Vec<IterationRecord> = Vec::new();
        let mut feedback: Option<IterationFeedback> = None;
        let mut previous_trades: Option<Vec<ProposedTrade>> = None;

        for iteration in 1..=self.config.iterations {
            let ctx = ProposalContext {
                iteration,
                portfolio: portfolio.clone(),
                available_capital,
                risk_profile,
                signals: signals.to_vec(),
                prices: prices.clone(),
                feedback: feedback.clone(),
            };

            let proposal = match self.proposer.propose(&ctx).await {
                Ok(proposal) => proposal,
                Err(e) => {
                    warn!(
                        "Proposer '{}' failed in round {}: {}",
                        self.proposer.name(),
                        iteration,
                        e
                    );
                    history.push(IterationRecord {
                        iteration,
                        proposal: None,
                        constraint_report: None,
                        simulation: None,
                        error: Some(e.to_string()),
                    });
                    continue;
                }
            };

            let constraint_report =
                check_trades(&proposal.trades, portfolio, available_capital, prices);
            let simulation = simulate_trades(portfolio, available_capital, &proposal.trades, prices);
            info!(
                "Round {}: {} trades proposed, valid={}, {} violations",
                iteration,
                proposal.trades.len(),
                constraint_report.is_valid,
                constraint_report.violations.len()
            );

            let repeated = previous_trades.as_ref() == Some(&proposal.trades);
            history.push(IterationRecord {
                iteration,
                proposal: Some(proposal.clone()),
                constraint_report: Some(constraint_report.clone()),
                simulation: Some(simulation.clone()),
                error: None,
            });
            previous_trades = Some(proposal.trades.clone());
            feedback = Some(IterationFeedback {
                iteration,
                proposal,
                constraint_report,
                simulation,
            });

            if self.config.stop_on_repeat && repeated {
                debug!("Round {} repeated the previous proposal; stopping", iteration);
                break;
            }
        }

        let final_decision = decide(&history, portfolio, available_capital);
        RefinementOutcome {
            history,
            final_decision,
        }
    }
}

/// Takes the latest round that passed every constraint. Without one, nothing
/// is traded and the starting state is expected.
fn decide(
    history: &[IterationRecord],
    portfolio: &Portfolio,
    available_capital: Decimal,
) -> FinalDecision {
    let chosen = history.iter().rev().find(|record| record.is_valid());

    let (Some(record), Some(proposal), Some(simulation)) = (
        chosen,
        chosen.and_then(|r| r.proposal.as_ref()),
        chosen.and_then(|r| r.simulation.as_ref()),
    ) else {
        info!(
            "No valid proposal in {} rounds; keeping the current portfolio",
            history.len()
        );
        return FinalDecision {
            trades: Vec::new(),
            chosen_iteration: None,
            expected_portfolio: portfolio.clone(),
            expected_cash: available_capital,
            reasoning: format!(
                "No proposal passed the constraint check in {} rounds; keeping the current portfolio",
                history.len()
            ),
        };
    };

    let trades = proposal
        .trades
        .iter()
        .filter_map(|trade| trade.validate().ok())
        .collect();
    let reasoning = if proposal.notes.trim().is_empty() {
        format!("Round {} passed every constraint", record.iteration)
    } else {
        proposal.notes.clone()
    };

    FinalDecision {
        trades,
        chosen_iteration: Some(record.iteration),
        expected_portfolio: simulation.after.portfolio.clone(),
        expected_cash: simulation.after.cash,
        reasoning,
    }
}
