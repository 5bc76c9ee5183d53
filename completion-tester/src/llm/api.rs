use async_openai::{error::ApiError, types::CreateChatCompletionRequest};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::error::FailureReason;

pub const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// Failure of a single chat completion round trip.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        status: StatusCode,
        /// The `error` object, when the body carried one.
        api_error: Option<ApiError>,
        body: String,
    },

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Single chat completion round trip against a remote service.
///
/// Returns the decoded response body untouched; [`translate_error`] is the
/// only place a failure is interpreted.
#[async_trait]
pub trait CompletionTransport: Send + Sync {
    async fn create_chat_completion(
        &self,
        credential: &str,
        request: CreateChatCompletionRequest,
    ) -> std::result::Result<Value, TransportError>;
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ApiError,
}

/// Transport posting to `{base_url}/chat/completions`.
///
/// A fresh HTTP client is built for every call and sent exactly once.
#[derive(Debug, Clone)]
pub struct OpenAiTransport {
    base_url: String,
}

impl OpenAiTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionTransport for OpenAiTransport {
    async fn create_chat_completion(
        &self,
        credential: &str,
        request: CreateChatCompletionRequest,
    ) -> std::result::Result<Value, TransportError> {
        let response = reqwest::Client::new()
            .post(self.endpoint())
            .bearer_auth(credential)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let api_error = serde_json::from_slice::<ErrorEnvelope>(&bytes)
                .ok()
                .map(|envelope| envelope.error);
            return Err(TransportError::Status {
                status,
                api_error,
                body: String::from_utf8_lossy(&bytes).trim().to_string(),
            });
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Map a transport failure onto a [`FailureReason`].
///
/// The HTTP status decides first: 429 is a rate limit, 401 and 403 are
/// credential failures. Otherwise the error object's type and code are
/// consulted, and any remaining service error keeps the service's message.
pub fn translate_error(error: TransportError) -> FailureReason {
    match error {
        TransportError::Status { status, .. } if status == StatusCode::TOO_MANY_REQUESTS => {
            FailureReason::RateLimited
        }
        TransportError::Status { status, .. }
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN =>
        {
            FailureReason::InvalidCredential
        }
        TransportError::Status {
            api_error: Some(api_error),
            ..
        } => {
            if is_rate_limit_api_error(&api_error) {
                FailureReason::RateLimited
            } else if is_auth_api_error(&api_error) {
                FailureReason::InvalidCredential
            } else {
                FailureReason::ApiError(api_error.message)
            }
        }
        TransportError::Status { status, body, .. } => {
            if body.is_empty() {
                FailureReason::ApiError(status.to_string())
            } else {
                FailureReason::ApiError(body)
            }
        }
        other => FailureReason::Unknown(other.to_string()),
    }
}

fn is_rate_limit_api_error(api_error: &ApiError) -> bool {
    let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
    let code = api_error.code.clone().unwrap_or_default().to_lowercase();

    error_type.contains("rate_limit")
        || code.contains("rate_limit")
        || code == "insufficient_quota"
        || error_type == "insufficient_quota"
}

fn is_auth_api_error(api_error: &ApiError) -> bool {
    let error_type = api_error.r#type.clone().unwrap_or_default().to_lowercase();
    let code = api_error.code.clone().unwrap_or_default().to_lowercase();

    code.contains("invalid_api_key")
        || code.contains("authentication")
        || error_type.contains("authentication")
}
