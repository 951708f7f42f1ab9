pub mod document;
pub mod llm;
pub mod pdf;
pub mod qa;
pub mod store;

pub use document::{Document, SearchResult, SearchScope};
pub use llm::{AnthropicClient, ChatRequest, ChatResponse, LlmClient, OpenAiClient, Usage};
pub use qa::{AnswerEngine, QuestionExtractor};
pub use store::DocumentStore;

/// Initialize structured JSON logging
pub fn init_logging() {
    use tracing_subscriber::{fmt, EnvFilter};

    fmt()
        .json()
        .with_env_filter(EnvFilter::from_default_env())
        .init();
}
