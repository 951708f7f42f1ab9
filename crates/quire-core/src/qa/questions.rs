use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use serde_json::Value;
use tracing::debug;

use super::{truncate_chars, CONTEXT_LIMIT};
use crate::llm::{ChatRequest, LlmClient};

const SYSTEM_PROMPT: &str = "You are a helpful assistant that identifies questions within documents. \
Extract all questions from the provided text as they are. Return ONLY a valid JSON array of strings \
with the questions. Do not include any explanations, formatting, or backticks. Example of valid \
response format: [\"Question 1?\", \"Question 2?\"]";

const MAX_TOKENS: u32 = 500;

/// Surfaces the questions embedded in a document's text via the LLM.
pub struct QuestionExtractor {
    llm: Arc<dyn LlmClient>,
}

impl QuestionExtractor {
    pub fn new(llm: Arc<dyn LlmClient>) -> Self {
        Self { llm }
    }

    pub async fn extract(&self, text: &str) -> Result<Vec<String>> {
        let request = ChatRequest {
            system: SYSTEM_PROMPT.to_string(),
            user: format!(
                "Extract all questions from the following text:\n\n{}",
                truncate_chars(text, CONTEXT_LIMIT)
            ),
            max_tokens: MAX_TOKENS,
            temperature: 0.3,
        };

        let response = self
            .llm
            .chat(&request)
            .await
            .context("Question extraction call failed")?;

        let questions = parse_questions(&response.text)?;
        debug!(
            model = self.llm.model_name(),
            count = questions.len(),
            "Extracted questions"
        );
        Ok(questions)
    }
}

/// Parse the model reply: a bare JSON array of strings, or an object wrapping
/// one under a "questions" key. Anything else is an error.
fn parse_questions(reply: &str) -> Result<Vec<String>> {
    let stripped = strip_code_fence(reply.trim());
    let value: Value =
        serde_json::from_str(stripped).context("Model reply is not valid JSON")?;

    let items = match &value {
        Value::Array(items) => items,
        Value::Object(map) => match map.get("questions") {
            Some(Value::Array(items)) => items,
            _ => bail!("Model reply has no questions array"),
        },
        _ => bail!("Model reply is neither an array nor an object"),
    };

    items
        .iter()
        .map(|item| {
            item.as_str()
                .map(str::to_string)
                .ok_or_else(|| anyhow!("Question entry is not a string: {}", item))
        })
        .collect()
}

/// Models sometimes wrap JSON in a Markdown fence despite the prompt.
fn strip_code_fence(reply: &str) -> &str {
    let Some(body) = reply.strip_prefix("```") else {
        return reply;
    };
    let body = body.strip_prefix("json").unwrap_or(body);
    body.trim_end()
        .strip_suffix("```")
        .unwrap_or(body)
        .trim()
}
