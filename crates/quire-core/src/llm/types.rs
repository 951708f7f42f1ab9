/// One system+user exchange sent to a provider. The service never holds a
/// conversation; every gateway call is a single shot.
#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ChatRequest {
    fn default() -> Self {
        Self {
            system: String::new(),
            user: String::new(),
            max_tokens: 1024,
            temperature: 0.3,
        }
    }
}

/// Reply from a provider.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    pub text: String,
    pub model: String,
    pub usage: Usage,
}

/// Token usage info
#[derive(Debug, Clone, Copy, Default)]
pub struct Usage {
    pub input_tokens: u32,
    pub output_tokens: u32,
}

impl Usage {
    pub fn total(&self) -> u32 {
        self.input_tokens + self.output_tokens
    }
}
