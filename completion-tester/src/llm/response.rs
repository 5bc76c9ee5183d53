use async_openai::types::CreateChatCompletionResponse;
use serde::Serialize;
use serde_json::Value;

use crate::error::{FailureReason, Result};

/// Outcome of one successful completion call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionResult {
    pub answer_text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    /// The response body exactly as the service sent it.
    pub raw_payload: Value,
}

impl CompletionResult {
    /// Extract the answer and usage from a decoded response body.
    ///
    /// `raw` is kept as-is, so fields the typed response does not model
    /// still show up in `raw_payload`.
    pub fn from_payload(raw: Value) -> Result<Self> {
        let response: CreateChatCompletionResponse = serde_json::from_value(raw.clone())
            .map_err(|error| FailureReason::Unknown(format!("Unexpected response shape: {error}")))?;

        let usage = response
            .usage
            .ok_or_else(|| FailureReason::Unknown("Response contained no usage block".to_string()))?;

        // Reasoning models can spend the whole budget thinking and return no content.
        let answer_text = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| FailureReason::Unknown("Response contained no choices".to_string()))?
            .message
            .content
            .unwrap_or_default();

        Ok(Self {
            answer_text,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
            total_tokens: usage.total_tokens,
            raw_payload: raw,
        })
    }
}
