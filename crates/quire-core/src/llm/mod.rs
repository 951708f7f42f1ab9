mod anthropic;
mod openai;
mod provider;
mod types;

pub use anthropic::AnthropicClient;
pub use openai::OpenAiClient;
pub use provider::LlmClient;
pub use types::{ChatRequest, ChatResponse, Usage};
