use anyhow::Result;
use async_trait::async_trait;

use super::types::{ChatRequest, ChatResponse};

/// LLM client abstraction - one completion per call, no tools, no streaming.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send a single system+user exchange and return the reply.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse>;

    /// Model name for logging.
    fn model_name(&self) -> &str;
}
