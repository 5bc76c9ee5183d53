use std::sync::Arc;

use crate::catalog::ModelDescriptor;
use crate::error::{FailureReason, Result};
use crate::llm::api::{translate_error, CompletionTransport, OpenAiTransport};
use crate::llm::request::{build_request, RequestConfig};
use crate::llm::response::CompletionResult;

/// Runs one submission: local checks, one remote call, result extraction.
#[derive(Clone)]
pub struct CompletionProvider {
    transport: Arc<dyn CompletionTransport>,
}

impl CompletionProvider {
    pub fn new(transport: Arc<dyn CompletionTransport>) -> Self {
        Self { transport }
    }

    pub fn openai(base_url: impl Into<String>) -> Self {
        Self::new(Arc::new(OpenAiTransport::new(base_url)))
    }

    pub async fn submit(
        &self,
        config: &RequestConfig,
        descriptor: &ModelDescriptor,
    ) -> Result<CompletionResult> {
        if !config.has_credential() {
            return Err(FailureReason::MissingCredential);
        }

        if !config.has_prompt() {
            return Err(FailureReason::MissingPrompt);
        }

        config.check_parameters()?;

        let request = build_request(config, descriptor)?;

        tracing::debug!(
            model = %descriptor.id,
            family = descriptor.family.as_str(),
            prompt_len = config.prompt_text.len(),
            "Sending chat completion request"
        );

        let payload = self
            .transport
            .create_chat_completion(&config.credential, request)
            .await
            .map_err(translate_error)?;

        let result = CompletionResult::from_payload(payload)?;

        tracing::debug!(
            total_tokens = result.total_tokens,
            answer_len = result.answer_text.len(),
            "Chat completion received"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_openai::types::CreateChatCompletionRequest;
    use async_trait::async_trait;
    use reqwest::StatusCode;
    use serde_json::Value;

    use crate::catalog::lookup;
    use crate::llm::api::TransportError;

    #[derive(Default)]
    struct UnavailableTransport {
        calls: AtomicUsize,
    }

    #[async_trait]
    impl CompletionTransport for UnavailableTransport {
        async fn create_chat_completion(
            &self,
            _credential: &str,
            _request: CreateChatCompletionRequest,
        ) -> std::result::Result<Value, TransportError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(TransportError::Status {
                status: StatusCode::SERVICE_UNAVAILABLE,
                api_error: None,
                body: "transport reached".to_string(),
            })
        }
    }

    fn provider() -> (CompletionProvider, Arc<UnavailableTransport>) {
        let transport = Arc::new(UnavailableTransport::default());
        (CompletionProvider::new(transport.clone()), transport)
    }

    #[tokio::test]
    async fn test_out_of_range_parameters_skip_transport() {
        let (provider, transport) = provider();
        let mut config = RequestConfig::new("gpt-4o", "sk-test", "Hello");
        config.top_p = 1.5;

        let result = provider.submit(&config, &lookup("gpt-4o").unwrap()).await;

        assert!(matches!(result, Err(FailureReason::InvalidParameters(_))));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_credential_checked_before_prompt() {
        let (provider, transport) = provider();
        let config = RequestConfig::new("gpt-4o", "", "");

        let result = provider.submit(&config, &lookup("gpt-4o").unwrap()).await;

        assert_eq!(result, Err(FailureReason::MissingCredential));
        assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_transport_error_is_translated() {
        let (provider, transport) = provider();
        let config = RequestConfig::new("o3", "sk-test", "Hello");

        let result = provider.submit(&config, &lookup("o3").unwrap()).await;

        assert_eq!(
            result,
            Err(FailureReason::ApiError("transport reached".to_string()))
        );
        assert_eq!(transport.calls.load(Ordering::SeqCst), 1);
    }
}
