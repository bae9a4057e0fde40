//! Valuedesk Agents - language-model collaborators for the refinement loop.
//!
//! Nothing in this crate talks to a network. Callers supply a [`ChatModel`]
//! implementation; the crate builds the request documents, bounds every call
//! by the [`ModelConfig`] retry and timeout settings, and parses replies
//! strictly.
//!
//! # Architecture
//!
//! - `client`: the `ChatModel` seam and retry/timeout handling
//! - `config`: explicit model configuration
//! - `reply`: fenced-JSON reply parsing
//! - `proposer`: `ModelTradeProposer`, a `TradeProposer` backed by a model
//! - `analyst`: `ModelSignalAnalyst`, turning a `BuffettAnalysis` into a `Signal`

pub mod analyst;
pub mod client;
pub mod config;
pub mod error;
pub mod proposer;
pub mod reply;

pub use analyst::ModelSignalAnalyst;
pub use client::{ChatMessage, ChatModel, ChatRequest, ChatRole};
pub use config::ModelConfig;
pub use error::AgentError;
pub use proposer::ModelTradeProposer;
pub use reply::parse_reply;
