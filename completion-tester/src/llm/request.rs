use std::fmt;

use async_openai::types::{
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequest,
    CreateChatCompletionRequestArgs,
};
use validator::Validate;

use crate::catalog::{ModelDescriptor, ModelFamily};
use crate::error::{FailureReason, Result};

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_TOP_P: f32 = 1.0;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 10_000;

/// Everything a single submission needs. Built fresh for every request.
#[derive(Clone, Validate)]
pub struct RequestConfig {
    pub model_id: String,
    pub credential: String,
    pub prompt_text: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 0.0, max = 1.0))]
    pub top_p: f32,
    #[validate(range(min = 1, max = 100_000))]
    pub max_output_tokens: u32,
}

impl RequestConfig {
    pub fn new(
        model_id: impl Into<String>,
        credential: impl Into<String>,
        prompt_text: impl Into<String>,
    ) -> Self {
        Self {
            model_id: model_id.into(),
            credential: credential.into(),
            prompt_text: prompt_text.into(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
        }
    }

    pub fn has_credential(&self) -> bool {
        !self.credential.trim().is_empty()
    }

    /// Whitespace is a prompt; only an empty string is missing.
    pub fn has_prompt(&self) -> bool {
        !self.prompt_text.is_empty()
    }

    /// Range checks for the numeric parameters.
    pub fn check_parameters(&self) -> Result<()> {
        // NaN slips through range comparisons
        if !self.temperature.is_finite() || !self.top_p.is_finite() {
            return Err(FailureReason::InvalidParameters(
                "temperature and top_p must be finite numbers".to_string(),
            ));
        }

        self.validate()
            .map_err(|errors| FailureReason::InvalidParameters(errors.to_string()))
    }
}

impl fmt::Debug for RequestConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestConfig")
            .field("model_id", &self.model_id)
            .field("credential", &"<redacted>")
            .field("prompt_text", &self.prompt_text)
            .field("temperature", &self.temperature)
            .field("top_p", &self.top_p)
            .field("max_output_tokens", &self.max_output_tokens)
            .finish()
    }
}

/// Map a request config onto the chat completion dialect of `descriptor`'s family.
///
/// Reasoning models get only `max_completion_tokens`. Standard models get
/// `temperature`, `top_p` and `max_tokens`, copied without adjustment.
/// The caller is expected to have rejected an empty prompt or credential.
#[allow(deprecated)]
pub fn build_request(
    config: &RequestConfig,
    descriptor: &ModelDescriptor,
) -> Result<CreateChatCompletionRequest> {
    let messages = vec![ChatCompletionRequestUserMessageArgs::default()
        .content(config.prompt_text.as_str())
        .build()
        .map_err(|error| FailureReason::InvalidParameters(format!("Invalid user prompt: {error}")))?
        .into()];

    let mut request = CreateChatCompletionRequestArgs::default();
    request.model(descriptor.id.clone()).messages(messages);

    match descriptor.family {
        ModelFamily::Reasoning => {
            request.max_completion_tokens(config.max_output_tokens);
        }
        ModelFamily::Standard => {
            request
                .temperature(config.temperature)
                .top_p(config.top_p)
                .max_tokens(config.max_output_tokens);
        }
    }

    request.build().map_err(|error| {
        FailureReason::InvalidParameters(format!("Invalid completion request: {error}"))
    })
}
