use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_REFINEMENT_ITERATIONS;
use crate::constraints::ConstraintReport;
use crate::errors::{Error, Result};
use crate::market::PriceMap;
use crate::portfolio::Portfolio;
use crate::signals::Signal;
use crate::simulation::SimulationReport;
use crate::sizing::RiskProfile;
use crate::trades::{ProposedTrade, Trade};

// ==================== Configuration ====================

/// Settings for [`RefinementLoop`](super::RefinementLoop).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RefinementConfig {
    /// Maximum number of propose/check/simulate rounds
    pub iterations: usize,
    /// Stop early once a round proposes exactly the trades of the round before
    pub stop_on_repeat: bool,
}

impl Default for RefinementConfig {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_REFINEMENT_ITERATIONS,
            stop_on_repeat: true,
        }
    }
}

impl RefinementConfig {
    pub fn with_iterations(iterations: usize) -> Self {
        Self {
            iterations,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.iterations == 0 {
            return Err(Error::InvalidConfigValue(
                "refinement iterations must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

// ==================== Proposals ====================

/// A drafted trade plan.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Proposal {
    pub trades: Vec<ProposedTrade>,
    /// Intended weight per ticker (and CASH) after the trades
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub target_allocation: BTreeMap<String, f64>,
    #[serde(default)]
    pub notes: String,
    /// Problems the proposer itself reported alongside the draft
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl Proposal {
    pub fn from_trades(trades: impl IntoIterator<Item = Trade>) -> Self {
        Self {
            trades: trades.into_iter().map(ProposedTrade::from).collect(),
            ..Default::default()
        }
    }
}

/// What the previous round produced and how it was judged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationFeedback {
    pub iteration: usize,
    pub proposal: Proposal,
    pub constraint_report: ConstraintReport,
    pub simulation: SimulationReport,
}

/// Everything a proposer sees when drafting a round.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalContext {
    /// 1-based round number
    pub iteration: usize,
    pub portfolio: Portfolio,
    pub available_capital: Decimal,
    pub risk_profile: RiskProfile,
    pub signals: Vec<Signal>,
    pub prices: PriceMap,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<IterationFeedback>,
}

// ==================== History & decision ====================

/// One round of the loop. A round whose proposer failed carries only the error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IterationRecord {
    pub iteration: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proposal: Option<Proposal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint_report: Option<ConstraintReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulationReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl IterationRecord {
    pub fn is_valid(&self) -> bool {
        self.constraint_report
            .as_ref()
            .map(|report| report.is_valid)
            .unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinalDecision {
    pub trades: Vec<Trade>,
    /// Round the trades were taken from; `None` when no round was valid
    pub chosen_iteration: Option<usize>,
    pub expected_portfolio: Portfolio,
    pub expected_cash: Decimal,
    pub reasoning: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefinementOutcome {
    pub history: Vec<IterationRecord>,
    pub final_decision: FinalDecision,
}
