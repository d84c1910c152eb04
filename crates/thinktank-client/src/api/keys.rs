//! API key API.

use serde_json::Value;

use crate::client::ThinkTankClient;
use crate::error::Result;
use crate::types::GenerateKeyRequest;

/// API key API client.
pub struct KeysApi {
    client: ThinkTankClient,
}

impl KeysApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    /// Generate a new API key for an agent.
    pub async fn generate(&self, request: GenerateKeyRequest) -> Result<Value> {
        let body = request.to_body()?;
        self.client.post("api-keys/generate", &body).await
    }

    /// Generate a key for a `researcher` agent (convenience method).
    pub async fn generate_for(&self, agent_name: impl Into<String>) -> Result<Value> {
        self.generate(GenerateKeyRequest::new(agent_name)).await
    }
}
