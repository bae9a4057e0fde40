#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use rust_decimal_macros::dec;

    use crate::errors::{Error, Result};
    use crate::market::PriceMap;
    use crate::portfolio::Portfolio;
    use crate::refinement::*;
    use crate::signals::{Signal, SignalKind};
    use crate::sizing::RiskProfile;
    use crate::trades::{ProposedTrade, Trade};

    /// Replays a fixed list of rounds; `None` fails the round.
    struct ScriptedProposer {
        script: Vec<Option<Proposal>>,
        seen: Mutex<Vec<ProposalContext>>,
    }

    impl ScriptedProposer {
        fn new(script: Vec<Option<Proposal>>) -> Arc<Self> {
            Arc::new(Self {
                script,
                seen: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl TradeProposer for ScriptedProposer {
        fn name(&self) -> &str {
            "scripted"
        }

        async fn propose(&self, ctx: &ProposalContext) -> Result<Proposal> {
            let mut seen = self.seen.lock().unwrap();
            let round = seen.len();
            seen.push(ctx.clone());
            match self.script.get(round).cloned().flatten() {
                Some(proposal) => Ok(proposal),
                None => Err(Error::Proposal(format!("no answer for round {}", round + 1))),
            }
        }
    }

    fn starting_state() -> (Portfolio, PriceMap) {
        let portfolio: Portfolio = [("AAPL", 10)].into_iter().collect();
        let prices: PriceMap = [("AAPL", 50.0), ("MSFT", 100.0)].into_iter().collect();
        (portfolio, prices)
    }

    fn proposal(trades: Vec<ProposedTrade>) -> Option<Proposal> {
        Some(Proposal {
            trades,
            ..Default::default()
        })
    }

    fn risk() -> RiskProfile {
        RiskProfile::new(5).unwrap()
    }

    #[tokio::test]
    async fn test_heuristic_proposer_stops_on_repeat() {
        let (portfolio, prices) = starting_state();
        let signals = vec![
            Signal::new("AAPL", SignalKind::Bearish, 50.0),
            Signal::new("MSFT", SignalKind::Bullish, 80.0),
        ];
        let refinement =
            RefinementLoop::new(Arc::new(HeuristicProposer::new()), RefinementConfig::default())
                .unwrap();

        let outcome = refinement
            .run(&portfolio, dec!(1000), risk(), &signals, &prices)
            .await;

        assert_eq!(outcome.history.len(), 2);
        let decision = outcome.final_decision;
        assert_eq!(decision.chosen_iteration, Some(2));
        // AAPL: 0.5 x 0.7 = 0.35 -> 3 shares; MSFT gets the whole 1000.
        assert_eq!(
            decision.trades,
            vec![Trade::sell("AAPL", 3), Trade::buy("MSFT", 10)]
        );
        assert_eq!(decision.expected_portfolio.shares("AAPL"), 7);
        assert_eq!(decision.expected_portfolio.shares("MSFT"), 10);
        assert_eq!(decision.expected_cash, dec!(150));
    }

    #[tokio::test]
    async fn test_proposer_error_is_recorded_and_loop_continues() {
        let (portfolio, prices) = starting_state();
        let proposer = ScriptedProposer::new(vec![
            None,
            proposal(vec![ProposedTrade::new("buy", "MSFT", 2)]),
        ]);
        let refinement =
            RefinementLoop::new(proposer, RefinementConfig::with_iterations(2)).unwrap();

        let outcome = refinement
            .run(&portfolio, dec!(1000), risk(), &[], &prices)
            .await;

        assert_eq!(outcome.history.len(), 2);
        assert!(outcome.history[0]
            .error
            .as_deref()
            .unwrap()
            .contains("no answer for round 1"));
        assert!(outcome.history[0].constraint_report.is_none());
        assert_eq!(outcome.final_decision.chosen_iteration, Some(2));
        assert_eq!(outcome.final_decision.expected_cash, dec!(800));
    }

    #[tokio::test]
    async fn test_no_valid_round_keeps_starting_state() {
        let (portfolio, prices) = starting_state();
        let proposer = ScriptedProposer::new(vec![
            proposal(vec![ProposedTrade::new("sell", "AAPL", 12)]),
            proposal(vec![ProposedTrade::new("buy", "MSFT", 50)]),
        ]);
        let refinement =
            RefinementLoop::new(proposer, RefinementConfig::with_iterations(2)).unwrap();

        let outcome = refinement
            .run(&portfolio, dec!(1000), risk(), &[], &prices)
            .await;

        assert!(outcome.history.iter().all(|r| !r.is_valid()));
        let decision = outcome.final_decision;
        assert!(decision.trades.is_empty());
        assert_eq!(decision.chosen_iteration, None);
        assert_eq!(decision.expected_portfolio, portfolio);
        assert_eq!(decision.expected_cash, dec!(1000));
    }

    #[tokio::test]
    async fn test_latest_valid_round_wins() {
        let (portfolio, prices) = starting_state();
        let proposer = ScriptedProposer::new(vec![
            proposal(vec![ProposedTrade::new("buy", "MSFT", 1)]),
            proposal(vec![ProposedTrade::new("buy", "MSFT", 3)]),
            proposal(vec![ProposedTrade::new("buy", "TSLA", 1)]),
        ]);
        let refinement =
            RefinementLoop::new(proposer, RefinementConfig::with_iterations(3)).unwrap();

        let outcome = refinement
            .run(&portfolio, dec!(1000), risk(), &[], &prices)
            .await;

        assert_eq!(outcome.history.len(), 3);
        assert!(!outcome.history[2].is_valid());
        assert_eq!(outcome.final_decision.chosen_iteration, Some(2));
        assert_eq!(outcome.final_decision.trades, vec![Trade::buy("MSFT", 3)]);
    }

    #[tokio::test]
    async fn test_feedback_reaches_next_round() {
        let (portfolio, prices) = starting_state();
        let proposer = ScriptedProposer::new(vec![
            proposal(vec![ProposedTrade::new("sell", "AAPL", 20)]),
            proposal(vec![ProposedTrade::new("sell", "AAPL", 10)]),
        ]);
        let refinement =
            RefinementLoop::new(proposer.clone(), RefinementConfig::with_iterations(2)).unwrap();

        refinement
            .run(&portfolio, dec!(0), risk(), &[], &prices)
            .await;

        let seen = proposer.seen.lock().unwrap();
        assert!(seen[0].feedback.is_none());
        let feedback = seen[1].feedback.as_ref().unwrap();
        assert_eq!(feedback.iteration, 1);
        assert!(!feedback.constraint_report.is_valid);
        assert_eq!(feedback.simulation.notes.len(), 1);
        assert_eq!(seen[1].iteration, 2);
    }

    #[tokio::test]
    async fn test_repeat_detection_can_be_disabled() {
        let (portfolio, prices) = starting_state();
        let config = RefinementConfig {
            iterations: 4,
            stop_on_repeat: false,
        };
        let refinement = RefinementLoop::new(Arc::new(HeuristicProposer), config).unwrap();

        let outcome = refinement
            .run(&portfolio, dec!(0), risk(), &[], &prices)
            .await;

        assert_eq!(outcome.history.len(), 4);
        assert_eq!(outcome.final_decision.chosen_iteration, Some(4));
        assert!(outcome.final_decision.trades.is_empty());
    }

    #[test]
    fn test_zero_iterations_is_rejected() {
        let result = RefinementLoop::new(
            Arc::new(HeuristicProposer),
            RefinementConfig::with_iterations(0),
        );
        assert!(matches!(result, Err(Error::InvalidConfigValue(_))));
    }

    #[test]
    fn test_config_defaults_from_partial_json() {
        let config: RefinementConfig = serde_json::from_str(r#"{"iterations": 3}"#).unwrap();
        assert_eq!(config.iterations, 3);
        assert!(config.stop_on_repeat);
    }
}
