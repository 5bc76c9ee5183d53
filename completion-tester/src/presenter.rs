//! Turns a submission outcome into what the user sees.

use std::fmt::Write as _;

use serde::Serialize;
use serde_json::Value;

use crate::error::{FailureReason, Result};
use crate::llm::CompletionResult;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnswerView {
    pub answer_text: String,
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
    pub raw_payload: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DisplayModel {
    Answer(AnswerView),
    Error { message: String },
}

impl DisplayModel {
    pub fn is_error(&self) -> bool {
        matches!(self, DisplayModel::Error { .. })
    }

    pub fn answer(&self) -> Option<&AnswerView> {
        match self {
            DisplayModel::Answer(view) => Some(view),
            DisplayModel::Error { .. } => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            DisplayModel::Error { message } => Some(message),
            DisplayModel::Answer(_) => None,
        }
    }

    /// Plain-text rendering for a terminal.
    pub fn render(&self, show_raw: bool) -> String {
        let view = match self {
            DisplayModel::Error { message } => return message.clone(),
            DisplayModel::Answer(view) => view,
        };

        let mut out = String::new();
        let _ = writeln!(out, "AI Response:");
        let _ = writeln!(out, "{}", view.answer_text);
        let _ = writeln!(out);
        let _ = writeln!(out, "Usage Information:");
        let _ = writeln!(out, "  Prompt Tokens:     {}", view.prompt_tokens);
        let _ = writeln!(out, "  Completion Tokens: {}", view.completion_tokens);
        let _ = writeln!(out, "  Total Tokens:      {}", view.total_tokens);

        if show_raw {
            let raw = serde_json::to_string_pretty(&view.raw_payload)
                .unwrap_or_else(|_| view.raw_payload.to_string());
            let _ = writeln!(out);
            let _ = writeln!(out, "Full Response JSON:");
            let _ = writeln!(out, "{raw}");
        }

        out
    }
}

impl From<CompletionResult> for AnswerView {
    fn from(result: CompletionResult) -> Self {
        Self {
            answer_text: result.answer_text,
            prompt_tokens: result.prompt_tokens,
            completion_tokens: result.completion_tokens,
            total_tokens: result.total_tokens,
            raw_payload: result.raw_payload,
        }
    }
}

pub fn present(result: Result<CompletionResult>) -> DisplayModel {
    match result {
        Ok(result) => DisplayModel::Answer(result.into()),
        Err(reason) => DisplayModel::Error {
            message: failure_message(&reason),
        },
    }
}

/// User-facing message for each failure.
pub fn failure_message(reason: &FailureReason) -> String {
    match reason {
        FailureReason::MissingCredential => "Please enter your OpenAI API key.".to_string(),
        FailureReason::MissingPrompt => "Please enter a prompt.".to_string(),
        FailureReason::InvalidParameters(message) => {
            format!("Invalid request parameters: {}", single_line(message))
        }
        FailureReason::InvalidCredential => {
            "Invalid API key. Please check your OpenAI API key.".to_string()
        }
        FailureReason::RateLimited => "Rate limit exceeded. Please try again later.".to_string(),
        FailureReason::ApiError(message) => format!("OpenAI API error: {}", single_line(message)),
        FailureReason::Unknown(message) => format!("An error occurred: {}", single_line(message)),
    }
}

fn single_line(message: &str) -> String {
    message.split_whitespace().collect::<Vec<_>>().join(" ")
}
