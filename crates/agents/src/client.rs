//! The seam to an external language model.

use async_trait::async_trait;
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::config::ModelConfig;
use crate::error::AgentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

/// One completion request, fully described by the caller's [`ModelConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub model: String,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub messages: Vec<ChatMessage>,
}

impl ChatRequest {
    pub fn new(config: &ModelConfig, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            messages,
        }
    }
}

/// A chat-completion backend. Implementations own transport, authentication
/// and provider quirks and return the raw text of the reply.
#[async_trait]
pub trait ChatModel: Send + Sync {
    async fn complete(&self, request: &ChatRequest) -> Result<String, AgentError>;
}

/// Sends `request`, retrying model errors and timeouts up to
/// `config.max_retries` extra times. Each attempt is bounded by
/// `config.timeout()`.
pub async fn complete_with_retry<M: ChatModel + ?Sized>(
    model: &M,
    config: &ModelConfig,
    agent: &str,
    request: &ChatRequest,
) -> Result<String, AgentError> {
    let attempts = config.max_retries.saturating_add(1);
    let mut attempt = 0;
    loop {
        attempt += 1;
        debug!("{} calling {} (attempt {}/{})", agent, config.model, attempt, attempts);

        let result = match tokio::time::timeout(config.timeout(), model.complete(request)).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout {
                agent: agent.to_string(),
                seconds: config.timeout_secs,
            }),
        };

        match result {
            Ok(reply) => return Ok(reply),
            Err(e) if e.is_retryable() && attempt < attempts => {
                warn!("{} attempt {} failed: {}; retrying", agent, attempt, e);
            }
            Err(e) => return Err(e),
        }
    }
}


#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::test_model::ScriptedModel;
    use super::*;

    struct SlowModel;

    #[async_trait]
    impl ChatModel for SlowModel {
        async fn complete(&self, _request: &ChatRequest) -> Result<String, AgentError> {
            tokio::time::sleep(Duration::from_secs(600)).await;
            Ok("{}".to_string())
        }
    }

    fn request(config: &ModelConfig) -> ChatRequest {
        ChatRequest::new(config, vec![ChatMessage::user("hello")])
    }

    #[tokio::test]
    async fn test_retries_model_errors_until_success() {
        let config = ModelConfig::default();
        let model = ScriptedModel::new(vec![
            Err(AgentError::model("503")),
            Err(AgentError::model("503")),
            Ok("done".to_string()),
        ]);

        let reply = complete_with_retry(&model, &config, "tester", &request(&config))
            .await
            .unwrap();

        assert_eq!(reply, "done");
        assert_eq!(model.calls(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_max_retries() {
        let config = ModelConfig {
            max_retries: 1,
            ..Default::default()
        };
        let model = ScriptedModel::new(vec![
            Err(AgentError::model("first")),
            Err(AgentError::model("second")),
            Ok("too late".to_string()),
        ]);

        let err = complete_with_retry(&model, &config, "tester", &request(&config))
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::Model(ref msg) if msg == "second"));
        assert_eq!(model.calls(), 2);
    }

    #[tokio::test]
    async fn test_non_retryable_errors_return_immediately() {
        let config = ModelConfig::default();
        let model = ScriptedModel::new(vec![Err(AgentError::invalid_input("bad key"))]);

        let err = complete_with_retry(&model, &config, "tester", &request(&config))
            .await
            .unwrap_err();

        assert_eq!(err.code(), "INVALID_INPUT");
        assert_eq!(model.calls(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_each_attempt_is_bounded_by_timeout() {
        let config = ModelConfig {
            max_retries: 0,
            timeout_secs: 5,
            ..Default::default()
        };

        let err = complete_with_retry(&SlowModel, &config, "tester", &request(&config))
            .await
            .unwrap_err();

        assert!(matches!(err, AgentError::Timeout { seconds: 5, .. }));
    }

    #[test]
    fn test_request_carries_config() {
        let config = ModelConfig {
            max_tokens: Some(512),
            ..ModelConfig::new("gpt-4o")
        };
        let json = serde_json::to_value(request(&config)).unwrap();
        assert_eq!(json["model"], "gpt-4o");
        assert_eq!(json["maxTokens"], 512);
        assert_eq!(json["messages"][0]["role"], "user");
    }
}
