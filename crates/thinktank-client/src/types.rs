//! Request and query types for the ThinkTank API.
//!
//! Responses are returned as raw [`serde_json::Value`]s; only the request side
//! is typed. Request bodies that accept arbitrary additional fields carry an
//! `extra` map which is merged over the named fields when the body is
//! serialized, so an extra field with the same name as a named field wins.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Merge `extra` over the serialized form of `base`.
pub(crate) fn merge_extra<T: Serialize>(
    base: &T,
    extra: &Map<String, Value>,
) -> serde_json::Result<Value> {
    let mut value = serde_json::to_value(base)?;
    if let Value::Object(fields) = &mut value {
        for (key, extra_value) in extra {
            fields.insert(key.clone(), extra_value.clone());
        }
    }
    Ok(value)
}

// ─────────────────────────────────────────────────────────────────────────────
// API keys
// ─────────────────────────────────────────────────────────────────────────────

/// Request to generate a new API key (and register its agent).
#[derive(Debug, Clone, Serialize)]
pub struct GenerateKeyRequest {
    /// Name of the agent.
    pub agent_name: String,
    /// Agent role.
    pub role: String,
    /// Agent description.
    pub description: String,
    /// Additional fields, e.g. `codename`, `hostname`, `key_type`.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl GenerateKeyRequest {
    /// Create a request for a `researcher` agent with an empty description.
    pub fn new(agent_name: impl Into<String>) -> Self {
        Self {
            agent_name: agent_name.into(),
            role: "researcher".to_string(),
            description: String::new(),
            extra: Map::new(),
        }
    }

    /// Set the role.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Set the agent codename.
    pub fn with_codename(self, codename: impl Into<String>) -> Self {
        self.with_extra("codename", Value::String(codename.into()))
    }

    /// Set the hostname the agent runs on.
    pub fn with_hostname(self, hostname: impl Into<String>) -> Self {
        self.with_extra("hostname", Value::String(hostname.into()))
    }

    /// Set the key type.
    pub fn with_key_type(self, key_type: impl Into<String>) -> Self {
        self.with_extra("key_type", Value::String(key_type.into()))
    }

    /// Add an arbitrary field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_body(&self) -> serde_json::Result<Value> {
        merge_extra(self, &self.extra)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Agents
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters for listing agents.
#[derive(Debug, Clone, Serialize)]
pub struct ListAgentsQuery {
    /// Number of results (the service caps this at 100).
    pub limit: u32,
    /// Number of results to skip.
    pub offset: u32,
}

impl Default for ListAgentsQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
        }
    }
}

/// Fields to change on an agent profile (name, role, description, ...).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AgentUpdate {
    /// Fields sent verbatim as the request body.
    pub fields: Map<String, Value>,
}

impl AgentUpdate {
    /// Create an empty update.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a field.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Messages
// ─────────────────────────────────────────────────────────────────────────────

/// Request to send a message to another agent.
#[derive(Debug, Clone, Serialize)]
pub struct SendMessageRequest {
    /// Recipient agent ID.
    pub recipient_id: String,
    /// Message subject.
    pub subject: String,
    /// Message content.
    pub content: String,
    /// Priority (`low`, `normal`, `high`, `urgent`).
    pub priority: String,
    /// Additional metadata fields.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl SendMessageRequest {
    /// Create a `normal` priority message.
    pub fn new(
        recipient_id: impl Into<String>,
        subject: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            recipient_id: recipient_id.into(),
            subject: subject.into(),
            content: content.into(),
            priority: "normal".to_string(),
            extra: Map::new(),
        }
    }

    /// Set the priority.
    pub fn with_priority(mut self, priority: impl Into<String>) -> Self {
        self.priority = priority.into();
        self
    }

    /// Add an arbitrary field.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_body(&self) -> serde_json::Result<Value> {
        merge_extra(self, &self.extra)
    }
}

/// Query parameters for listing messages.
#[derive(Debug, Clone, Serialize)]
pub struct ListMessagesQuery {
    /// Number of results.
    pub limit: u32,
    /// Number of results to skip.
    pub offset: u32,
    /// Only messages for this recipient.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recipient_id: Option<String>,
}

impl Default for ListMessagesQuery {
    fn default() -> Self {
        Self {
            limit: 50,
            offset: 0,
            recipient_id: None,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Analytics
// ─────────────────────────────────────────────────────────────────────────────

/// Query parameters shared by the analytics endpoints.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AnalyticsQuery {
    /// Number of days to analyze (the service accepts 1-90).
    pub days: u32,
}

impl Default for AnalyticsQuery {
    fn default() -> Self {
        Self { days: 7 }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Collaboration
// ─────────────────────────────────────────────────────────────────────────────

/// Agent heartbeat.
#[derive(Debug, Clone, Serialize)]
pub struct HeartbeatRequest {
    /// Agent status (`active`, `idle`, `busy`).
    pub status: String,
    /// Additional metrics, e.g. `cpu_usage`, `memory_usage`.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl Default for HeartbeatRequest {
    fn default() -> Self {
        Self::new("active")
    }
}

impl HeartbeatRequest {
    /// Create a heartbeat with the given status.
    pub fn new(status: impl Into<String>) -> Self {
        Self {
            status: status.into(),
            extra: Map::new(),
        }
    }

    /// Add a metric.
    pub fn with_metric(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_body(&self) -> serde_json::Result<Value> {
        merge_extra(self, &self.extra)
    }
}

/// Query parameters for listing claimable tasks.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct AvailableTasksQuery {
    /// Number of results.
    pub limit: u32,
}

impl Default for AvailableTasksQuery {
    fn default() -> Self {
        Self { limit: 10 }
    }
}

/// Progress report for a claimed task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskProgressUpdate {
    /// Task status.
    pub status: String,
    /// Progress percentage (0-100).
    pub progress: u32,
    /// Progress notes.
    pub notes: String,
}

impl TaskProgressUpdate {
    /// Create an `in_progress` update with empty notes.
    pub fn new(progress: u32) -> Self {
        Self {
            status: "in_progress".to_string(),
            progress,
            notes: String::new(),
        }
    }

    /// Set the status.
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Completion report for a claimed task.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaskCompletion {
    /// Task result, any JSON value.
    pub result: Value,
    /// Confidence score (0.0-1.0).
    pub confidence: f64,
    /// Completion notes.
    pub notes: String,
}

impl TaskCompletion {
    /// Create a completion with confidence `0.95` and empty notes.
    pub fn new(result: impl Into<Value>) -> Self {
        Self {
            result: result.into(),
            confidence: 0.95,
            notes: String::new(),
        }
    }

    /// Set the confidence.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// LLM proxy
// ─────────────────────────────────────────────────────────────────────────────

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role (`system`, `user`, `assistant`).
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Create a message with an arbitrary role.
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    /// A `user` message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }

    /// A `system` message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    /// An `assistant` message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new("assistant", content)
    }
}

/// Chat completion through the LLM proxy.
#[derive(Debug, Clone, Serialize)]
pub struct LlmChatRequest {
    /// Provider name (`openai`, `google`, `anthropic`).
    pub provider: String,
    /// Model name.
    pub model: String,
    /// Conversation so far.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature (0.0-2.0).
    pub temperature: f64,
    /// Maximum tokens in the response.
    pub max_tokens: u32,
    /// Provider-specific parameters.
    #[serde(skip)]
    pub extra: Map<String, Value>,
}

impl LlmChatRequest {
    /// Create a request with temperature `0.7` and `500` max tokens.
    pub fn new(
        provider: impl Into<String>,
        model: impl Into<String>,
        messages: Vec<ChatMessage>,
    ) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            messages,
            temperature: 0.7,
            max_tokens: 500,
            extra: Map::new(),
        }
    }

    /// Set the temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set the maximum number of tokens.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Add a provider-specific parameter.
    pub fn with_extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    pub(crate) fn to_body(&self) -> serde_json::Result<Value> {
        merge_extra(self, &self.extra)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_message_body() {
        let body = SendMessageRequest::new("a1", "Hi", "Body")
            .with_priority("high")
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            json!({"recipient_id": "a1", "subject": "Hi", "content": "Body", "priority": "high"})
        );
    }

    #[test]
    fn test_send_message_wire_order() {
        let body = SendMessageRequest::new("a1", "Hi", "Body")
            .with_priority("high")
            .with_extra("thread_id", "t-9")
            .to_body()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"recipient_id":"a1","subject":"Hi","content":"Body","priority":"high","thread_id":"t-9"}"#
        );
    }

    #[test]
    fn test_extra_override_keeps_field_position() {
        let body = GenerateKeyRequest::new("Scout")
            .with_extra("role", "analyst")
            .to_body()
            .unwrap();
        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"agent_name":"Scout","role":"analyst","description":""}"#
        );
    }

    #[test]
    fn test_extra_fields_override_named_fields() {
        let body = SendMessageRequest::new("a1", "Hi", "Body")
            .with_priority("low")
            .with_extra("priority", "urgent")
            .with_extra("thread_id", "t-9")
            .to_body()
            .unwrap();
        assert_eq!(body["priority"], "urgent");
        assert_eq!(body["thread_id"], "t-9");
        assert_eq!(body.as_object().unwrap().len(), 5);
    }

    #[test]
    fn test_generate_key_defaults_and_extras() {
        let body = GenerateKeyRequest::new("Scout")
            .with_codename("owl")
            .with_key_type("agent")
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            json!({
                "agent_name": "Scout",
                "role": "researcher",
                "description": "",
                "codename": "owl",
                "key_type": "agent"
            })
        );
    }

    #[test]
    fn test_heartbeat_metrics() {
        let body = HeartbeatRequest::default()
            .with_metric("cpu_usage", 12.5)
            .with_metric("memory_usage", 40)
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            json!({"status": "active", "cpu_usage": 12.5, "memory_usage": 40})
        );
    }

    #[test]
    fn test_llm_chat_defaults() {
        let body = LlmChatRequest::new("openai", "gpt-4", vec![ChatMessage::user("hello")])
            .with_extra("top_p", 0.9)
            .to_body()
            .unwrap();
        assert_eq!(
            body,
            json!({
                "provider": "openai",
                "model": "gpt-4",
                "messages": [{"role": "user", "content": "hello"}],
                "temperature": 0.7,
                "max_tokens": 500,
                "top_p": 0.9
            })
        );
    }

    #[test]
    fn test_task_bodies() {
        let progress =
            serde_json::to_value(TaskProgressUpdate::new(40).with_notes("halfway")).unwrap();
        assert_eq!(
            progress,
            json!({"status": "in_progress", "progress": 40, "notes": "halfway"})
        );

        let completion =
            serde_json::to_value(TaskCompletion::new(json!({"answer": 42}))).unwrap();
        assert_eq!(
            completion,
            json!({"result": {"answer": 42}, "confidence": 0.95, "notes": ""})
        );
    }

    #[test]
    fn test_agent_update_is_flat() {
        let update = AgentUpdate::new().set("role", "analyst").set("active", false);
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"role": "analyst", "active": false})
        );
    }

    #[test]
    fn test_list_message_query_omits_missing_recipient() {
        let query = serde_json::to_value(ListMessagesQuery::default()).unwrap();
        assert_eq!(query, json!({"limit": 50, "offset": 0}));
    }
}
