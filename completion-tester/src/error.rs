use thiserror::Error;

/// Why a single submission did not produce a completion.
///
/// The first three variants are raised before any network traffic; the rest
/// come out of [`crate::llm::translate_error`] at the transport boundary.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    #[error("No API key was provided")]
    MissingCredential,

    #[error("No prompt was provided")]
    MissingPrompt,

    #[error("Invalid request parameters: {0}")]
    InvalidParameters(String),

    #[error("API key rejected by the remote service")]
    InvalidCredential,

    #[error("Remote service rate limit exceeded")]
    RateLimited,

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Unexpected error: {0}")]
    Unknown(String),
}

impl FailureReason {
    /// True for failures detected locally, before a request was sent.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            FailureReason::MissingCredential
                | FailureReason::MissingPrompt
                | FailureReason::InvalidParameters(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, FailureReason>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precondition_classification() {
        assert!(FailureReason::MissingCredential.is_precondition());
        assert!(FailureReason::MissingPrompt.is_precondition());
        assert!(FailureReason::InvalidParameters("top_p".to_string()).is_precondition());
        assert!(!FailureReason::InvalidCredential.is_precondition());
        assert!(!FailureReason::RateLimited.is_precondition());
        assert!(!FailureReason::ApiError("x".to_string()).is_precondition());
        assert!(!FailureReason::Unknown("x".to_string()).is_precondition());
    }

    #[test]
    fn test_display_carries_message() {
        let error = FailureReason::ApiError("model not found".to_string());
        assert_eq!(error.to_string(), "API error: model not found");
    }
}
