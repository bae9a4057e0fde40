//! Strict parsing of JSON replies.

use serde::de::DeserializeOwned;

use crate::error::AgentError;

/// Removes one surrounding Markdown code fence (```` ``` ```` or ```` ```json ````)
/// and surrounding whitespace.
pub fn strip_code_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // drop the info string ("json", "JSON", ...) up to the first newline
    let body = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parses a model reply as `T`, tolerating a Markdown code fence.
///
/// Anything else that does not deserialize is a
/// [`AgentError::MalformedReply`] carrying the raw text.
pub fn parse_reply<T: DeserializeOwned>(agent: &str, raw: &str) -> Result<T, AgentError> {
    let body = strip_code_fences(raw);
    if body.is_empty() {
        return Err(AgentError::MalformedReply {
            agent: agent.to_string(),
            reason: "empty reply".to_string(),
            raw: raw.to_string(),
        });
    }
    serde_json::from_str(body).map_err(|e| AgentError::MalformedReply {
        agent: agent.to_string(),
        reason: e.to_string(),
        raw: raw.to_string(),
    })
}
