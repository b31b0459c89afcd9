use crate::application::ports::{LlmClient, LlmClientError};

/// Replies with a fixed content string regardless of the prompt.
pub struct MockLlmClient {
    reply: String,
}

impl MockLlmClient {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
        }
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new(r#"{"dates": [], "medications": [], "actions": []}"#)
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(
        &self,
        _system_prompt: &str,
        _user_prompt: &str,
    ) -> Result<String, LlmClientError> {
        Ok(self.reply.clone())
    }
}
