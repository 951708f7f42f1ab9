use std::sync::Arc;

use anyhow::{bail, Context, Result};
use tracing::debug;

use super::{truncate_chars, CONTEXT_LIMIT};
use crate::llm::{ChatRequest, LlmClient};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on the \
provided document context. Use only the information provided to answer the question. If the \
answer cannot be determined from the context, say so.";

const MAX_TOKENS: u32 = 1024;

/// Generates an answer to one question, grounded in a document-context window.
pub struct AnswerEngine {
    llm: Arc<dyn LlmClient>,
}

impl AnswerEngine {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn answer(&self, question: &str, context: &str, filename: &str) -> Result<String> {
        let request = ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "Context from document \"{}\":\n\n{}\n\nQuestion: {}\n\nAnswer:",
                filename,
                truncate_chars(context, CONTEXT_LIMIT),
                question
            ),
            max_tokens: MAX_TOKENS,
            temperature: 0.3,
        };

        let response = self
            .llm
            .chat(&request)
            .await
            .context("Answer generation call failed")?;

        let answer = response.text.trim().to_string();
        if answer.is_empty() {
            bail!("Model returned an empty answer");
        }

        debug!(model = self.llm.model_name(), "Generated answer");
        Ok(answer)
    }
}
