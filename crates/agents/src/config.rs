use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::AgentError;

/// Settings shared by every model-backed agent. Built once and passed by
/// reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ModelConfig {
    /// Provider model id
    pub model: String,
    /// Sampling temperature (0 = deterministic)
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Extra attempts after a failed or timed-out call
    pub max_retries: u32,
    /// Per-attempt timeout in seconds
    pub timeout_secs: u64,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash".to_string(),
            temperature: 0.0,
            max_tokens: None,
            max_retries: 2,
            timeout_secs: 120,
        }
    }
}

impl ModelConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn validate(&self) -> Result<(), AgentError> {
        if self.model.trim().is_empty() {
            return Err(AgentError::invalid_input("model id must not be empty"));
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(AgentError::invalid_input(format!(
                "temperature must be between 0 and 2, got {}",
                self.temperature
            )));
        }
        if self.timeout_secs == 0 {
            return Err(AgentError::invalid_input("timeout must be at least 1 second"));
        }
        Ok(())
    }
}
