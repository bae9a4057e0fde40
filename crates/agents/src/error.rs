//! Agent error types.

use thiserror::Error;
use valuedesk_core::Error as CoreError;

/// Errors raised while talking to a model or reading its reply.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Invalid input or configuration.
    #[error("{0}")]
    InvalidInput(String),

    /// The model call itself failed.
    #[error("Model error: {0}")]
    Model(String),

    /// The model did not answer within the configured timeout.
    #[error("{agent} timed out after {seconds}s")]
    Timeout { agent: String, seconds: u64 },

    /// The reply could not be read as the expected JSON document.
    #[error("{agent} returned a malformed reply: {reason}")]
    MalformedReply {
        agent: String,
        reason: String,
        raw: String,
    },

    /// Core error from valuedesk-core.
    #[error("Core error: {0}")]
    Core(#[from] CoreError),
}

impl AgentError {
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    pub fn model(msg: impl Into<String>) -> Self {
        Self::Model(msg.into())
    }

    /// Whether another attempt at the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, AgentError::Model(_) | AgentError::Timeout { .. })
    }

    pub fn code(&self) -> &'static str {
        match self {
            AgentError::InvalidInput(_) => "INVALID_INPUT",
            AgentError::Model(_) => "MODEL_ERROR",
            AgentError::Timeout { .. } => "TIMEOUT",
            AgentError::MalformedReply { .. } => "MALFORMED_REPLY",
            AgentError::Core(_) => "CORE_ERROR",
        }
    }
}

impl From<AgentError> for CoreError {
    fn from(err: AgentError) -> Self {
        match err {
            AgentError::Core(inner) => inner,
            other => CoreError::Proposal(other.to_string()),
        }
    }
}
