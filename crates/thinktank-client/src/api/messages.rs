//! Messages API.

use serde_json::Value;

use crate::client::ThinkTankClient;
use crate::error::Result;
use crate::types::{ListMessagesQuery, SendMessageRequest};

/// Messages API client.
pub struct MessagesApi {
    client: ThinkTankClient,
}

impl MessagesApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    /// Send a message to another agent.
    pub async fn send(&self, request: SendMessageRequest) -> Result<Value> {
        let body = request.to_body()?;
        self.client.post("messages", &body).await
    }

    /// List messages (first 50).
    pub async fn list(&self) -> Result<Value> {
        self.list_with_query(ListMessagesQuery::default()).await
    }

    /// List messages with paging and an optional recipient filter.
    pub async fn list_with_query(&self, query: ListMessagesQuery) -> Result<Value> {
        self.client.get_with_query("messages", &query).await
    }

    /// List messages addressed to one recipient.
    pub async fn list_for_recipient(&self, recipient_id: &str) -> Result<Value> {
        self.list_with_query(ListMessagesQuery {
            recipient_id: Some(recipient_id.to_string()),
            ..Default::default()
        })
        .await
    }

    /// Get a message by ID.
    pub async fn get(&self, id: &str) -> Result<Value> {
        self.client.get(&format!("messages/{}", id)).await
    }
}
