//! Subcommands and their JSON results.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use serde_json::Value;
use tracing::info;
use valuedesk_core::analysis::BuffettAnalysis;
use valuedesk_core::constraints::ConstraintReport;
use valuedesk_core::refinement::{HeuristicProposer, RefinementConfig, RefinementLoop};
use valuedesk_core::{
    calculate_valuation, check_trades, simulate_trades, size_trades, ProposedTrade, Trade,
};

use crate::config::{Config, OutputStyle};
use crate::scenario::Scenario;

/// Valuedesk - portfolio simulation and constraint engine.
#[derive(Parser, Debug)]
#[command(name = "valuedesk")]
#[command(version)]
#[command(about = "Check, simulate and size trades against a JSON scenario.", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Args, Debug, Clone)]
pub struct ScenarioArgs {
    /// Path to the scenario JSON file
    pub scenario: PathBuf,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check the scenario's trades against holdings, prices and capital
    Check(ScenarioArgs),

    /// Apply the scenario's trades and report before/after snapshots
    Simulate(ScenarioArgs),

    /// Value the scenario's portfolio and cash
    Value(ScenarioArgs),

    /// Size trades from the scenario's signals and risk profile
    Propose(ScenarioArgs),

    /// Run the propose/check/simulate loop with the heuristic proposer
    Refine {
        #[command(flatten)]
        input: ScenarioArgs,

        /// Maximum number of rounds (defaults to VD_REFINE_ITERATIONS or 10)
        #[arg(long)]
        iterations: Option<usize>,

        /// Run every round even when a proposal repeats
        #[arg(long)]
        no_early_stop: bool,
    },

    /// Score the scenario's financial summaries
    Analyze(ScenarioArgs),
}

impl Command {
    pub fn scenario_path(&self) -> &PathBuf {
        match self {
            Command::Check(args)
            | Command::Simulate(args)
            | Command::Value(args)
            | Command::Propose(args)
            | Command::Analyze(args) => &args.scenario,
            Command::Refine { input, .. } => &input.scenario,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ProposeOutput {
    trades: Vec<Trade>,
    constraint_report: ConstraintReport,
}

/// Runs `command` against an already loaded scenario.
pub async fn execute(command: &Command, scenario: &Scenario, config: &Config) -> Result<Value> {
    let prices = scenario.price_map();

    let output = match command {
        Command::Check(_) => {
            let report = check_trades(&scenario.trades, &scenario.portfolio, scenario.capital, &prices);
            info!(
                "Checked {} trades: valid={}",
                scenario.trades.len(),
                report.is_valid
            );
            serde_json::to_value(report)?
        }
        Command::Simulate(_) => serde_json::to_value(simulate_trades(
            &scenario.portfolio,
            scenario.capital,
            &scenario.trades,
            &prices,
        ))?,
        Command::Value(_) => serde_json::to_value(calculate_valuation(
            &scenario.portfolio,
            scenario.capital,
            &prices,
        ))?,
        Command::Propose(_) => {
            let risk = scenario.require_risk_profile()?;
            let trades = size_trades(
                &scenario.portfolio,
                risk,
                &scenario.signals,
                &prices,
                scenario.capital,
            );
            let proposed: Vec<ProposedTrade> = trades.iter().cloned().map(Into::into).collect();
            let constraint_report =
                check_trades(&proposed, &scenario.portfolio, scenario.capital, &prices);
            serde_json::to_value(ProposeOutput {
                trades,
                constraint_report,
            })?
        }
        Command::Refine {
            iterations,
            no_early_stop,
            ..
        } => {
            let risk = scenario.require_risk_profile()?;
            let refinement_config = RefinementConfig {
                iterations: iterations.unwrap_or(config.refine_iterations),
                stop_on_repeat: !no_early_stop,
            };
            let refinement = RefinementLoop::new(Arc::new(HeuristicProposer::new()), refinement_config)?;
            let outcome = refinement
                .run(
                    &scenario.portfolio,
                    scenario.capital,
                    risk,
                    &scenario.signals,
                    &prices,
                )
                .await;
            info!(
                "Refinement finished after {} rounds; chosen round {:?}",
                outcome.history.len(),
                outcome.final_decision.chosen_iteration
            );
            serde_json::to_value(outcome)?
        }
        Command::Analyze(_) => {
            let analyses: Vec<BuffettAnalysis> = scenario
                .summaries
                .iter()
                .map(BuffettAnalysis::from_summary)
                .collect();
            serde_json::to_value(analyses)?
        }
    };

    Ok(output)
}

pub fn render(output: &Value, style: OutputStyle) -> Result<String> {
    let rendered = match style {
        OutputStyle::Pretty => serde_json::to_string_pretty(output)?,
        OutputStyle::Compact => serde_json::to_string(output)?,
    };
    Ok(rendered)
}
