//! Turns a deterministic [`BuffettAnalysis`] into a [`Signal`] via a model.

use std::sync::Arc;

use log::{info, warn};
use serde::Deserialize;
use valuedesk_core::analysis::BuffettAnalysis;
use valuedesk_core::constants::DEFAULT_SIGNAL_CONFIDENCE;
use valuedesk_core::market::FinancialSummary;
use valuedesk_core::signals::{Signal, SignalKind};

use crate::client::{complete_with_retry, ChatMessage, ChatModel, ChatRequest};
use crate::config::ModelConfig;
use crate::error::AgentError;
use crate::reply::parse_reply;

const AGENT_NAME: &str = "signal_analyst";

const SYSTEM_PROMPT: &str = "You are a value investor. Based strictly on the quantitative analysis \
in the user message, decide whether the stock is bullish, bearish or neutral, assign a confidence \
from 0 to 100 and give a brief reasoning. Reply with JSON only: \
{\"signal\": \"bullish|bearish|neutral\", \"confidence\": number, \"reasoning\": \"...\"}";

#[derive(Debug, Deserialize)]
struct SignalReply {
    signal: SignalKind,
    confidence: Option<f64>,
    #[serde(default)]
    reasoning: String,
}

pub struct ModelSignalAnalyst<M: ChatModel> {
    model: Arc<M>,
    config: ModelConfig,
}

impl<M: ChatModel> ModelSignalAnalyst<M> {
    pub fn new(model: Arc<M>, config: ModelConfig) -> Result<Self, AgentError> {
        config.validate()?;
        Ok(Self { model, config })
    }

    /// Scores `summary` and asks the model for a signal on its ticker.
    pub async fn analyze(&self, summary: &FinancialSummary) -> Result<Signal, AgentError> {
        let analysis = BuffettAnalysis::from_summary(summary);
        let document = serde_json::to_string_pretty(&analysis)
            .map_err(|e| AgentError::invalid_input(format!("unserializable analysis: {}", e)))?;
        let request = ChatRequest::new(
            &self.config,
            vec![
                ChatMessage::system(SYSTEM_PROMPT),
                ChatMessage::user(format!(
                    "Quantitative analysis for {}:\n{}",
                    analysis.ticker, document
                )),
            ],
        );

        let raw =
            complete_with_retry(self.model.as_ref(), &self.config, AGENT_NAME, &request).await?;
        let reply: SignalReply = parse_reply(AGENT_NAME, &raw)?;

        let signal = Signal::new(
            &analysis.ticker,
            reply.signal,
            reply.confidence.unwrap_or(DEFAULT_SIGNAL_CONFIDENCE),
        )
        .with_reasoning(reply.reasoning);
        info!(
            "{}: {:?} ({:.0}% confidence, score {}/{})",
            signal.ticker, signal.signal, signal.confidence, analysis.total_score, analysis.max_score
        );
        Ok(signal)
    }

    /// Analyzes each summary in turn. Tickers whose analysis fails are
    /// logged and left out.
    pub async fn analyze_all(&self, summaries: &[FinancialSummary]) -> Vec<Signal> {
        let mut signals = Vec::with_capacity(summaries.len());
        for summary in summaries {
            match self.analyze(summary).await {
                Ok(signal) => signals.push(signal),
                Err(e) => warn!("No signal for {}: {}", summary.ticker, e),
            }
        }
        signals
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::test_model::ScriptedModel;

    fn summary() -> FinancialSummary {
        FinancialSummary {
            return_on_equity: Some(0.3),
            gross_margin: Some(0.6),
            ..FinancialSummary::new("aapl")
        }
    }

    #[tokio::test]
    async fn test_signal_takes_ticker_from_summary() {
        let model = Arc::new(ScriptedModel::replying(
            r#"{"signal": "bullish", "confidence": 82, "reasoning": "Wide moat"}"#,
        ));
        let analyst = ModelSignalAnalyst::new(model.clone(), ModelConfig::default()).unwrap();

        let signal = analyst.analyze(&summary()).await.unwrap();

        assert_eq!(signal.ticker, "AAPL");
        assert_eq!(signal.signal, SignalKind::Bullish);
        assert_eq!(signal.confidence, 82.0);
        assert_eq!(signal.reasoning, "Wide moat");

        let requests = model.requests.lock().unwrap();
        assert!(requests[0].messages[1].content.contains("\"totalScore\""));
    }

    #[tokio::test]
    async fn test_missing_confidence_defaults() {
        let model = Arc::new(ScriptedModel::replying(r#"{"signal": "neutral"}"#));
        let analyst = ModelSignalAnalyst::new(model, ModelConfig::default()).unwrap();

        let signal = analyst.analyze(&summary()).await.unwrap();
        assert_eq!(signal.confidence, DEFAULT_SIGNAL_CONFIDENCE);
    }

    #[tokio::test]
    async fn test_unknown_signal_is_malformed() {
        let model = Arc::new(ScriptedModel::replying(r#"{"signal": "strong buy"}"#));
        let analyst = ModelSignalAnalyst::new(model, ModelConfig::default()).unwrap();

        let err = analyst.analyze(&summary()).await.unwrap_err();
        assert!(matches!(err, AgentError::MalformedReply { .. }));
    }

    #[tokio::test]
    async fn test_analyze_all_skips_failures() {
        let model = Arc::new(ScriptedModel::new(vec![
            Ok(r#"{"signal": "bearish", "confidence": 70}"#.to_string()),
            Ok("garbage".to_string()),
        ]));
        let analyst = ModelSignalAnalyst::new(model, ModelConfig::default()).unwrap();

        let signals = analyst
            .analyze_all(&[summary(), FinancialSummary::new("MSFT")])
            .await;

        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].signal, SignalKind::Bearish);
    }
}
