//! LLM proxy API.

use serde_json::Value;

use crate::client::ThinkTankClient;
use crate::error::Result;
use crate::types::{ChatMessage, LlmChatRequest};

/// LLM proxy API client.
pub struct LlmApi {
    client: ThinkTankClient,
}

impl LlmApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    /// Chat with any provider the service proxies.
    pub async fn chat(&self, request: LlmChatRequest) -> Result<Value> {
        let body = request.to_body()?;
        self.client.post("llm/chat", &body).await
    }

    /// Send a single user prompt (convenience method).
    pub async fn prompt(
        &self,
        provider: impl Into<String>,
        model: impl Into<String>,
        text: impl Into<String>,
    ) -> Result<Value> {
        self.chat(LlmChatRequest::new(
            provider,
            model,
            vec![ChatMessage::user(text)],
        ))
        .await
    }

    /// List available models.
    pub async fn models(&self) -> Result<Value> {
        self.client.get("llm/models").await
    }

    /// Get usage statistics.
    pub async fn usage(&self) -> Result<Value> {
        self.client.get("llm/usage").await
    }
}
