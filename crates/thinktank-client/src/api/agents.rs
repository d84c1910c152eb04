//! Agents API.

use serde_json::Value;

use crate::client::ThinkTankClient;
use crate::error::Result;
use crate::types::{AgentUpdate, ListAgentsQuery};

/// Agents API client.
pub struct AgentsApi {
    client: ThinkTankClient,
}

impl AgentsApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    /// List agents (first 50).
    pub async fn list(&self) -> Result<Value> {
        self.list_with_query(ListAgentsQuery::default()).await
    }

    /// List agents with paging.
    pub async fn list_with_query(&self, query: ListAgentsQuery) -> Result<Value> {
        self.client.get_with_query("agents", &query).await
    }

    /// Get an agent by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.get(&format!("agents/{}", id)).await
    }

    /// Update an agent profile.
    pub async fn update(&self, id: &str, update: AgentUpdate) -> Result<Value> {
        self.client.put(&format!("agents/{}", id), &update).await
    }

    /// Delete an agent.
    pub async fn delete(&self, id: &str) -> Result<Value> {
        self.client.delete(&format!("agents/{}", id)).await
    }
}
