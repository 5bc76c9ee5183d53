mod api;
mod provider;
mod request;
mod response;

pub use api::{
    translate_error, CompletionTransport, OpenAiTransport, TransportError, OPENAI_BASE_URL,
};
pub use provider::CompletionProvider;
pub use request::{
    build_request, RequestConfig, DEFAULT_MAX_OUTPUT_TOKENS, DEFAULT_TEMPERATURE, DEFAULT_TOP_P,
};
pub use response::CompletionResult;
