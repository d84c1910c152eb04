//! Collaboration API: agent presence and the shared task queue.

use serde_json::{Value, json};

use crate::client::ThinkTankClient;
use crate::error::Result;
use crate::types::{AvailableTasksQuery, HeartbeatRequest, TaskCompletion, TaskProgressUpdate};

/// Collaboration API client.
pub struct CollaborationApi {
    client: ThinkTankClient,
}

impl CollaborationApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    /// Get the calling agent's status.
    pub async fn agent_status(&self) -> Result<Value> {
        self.client.get("collaboration/v2/agent/status").await
    }

    /// Send a heartbeat.
    pub async fn heartbeat(&self, request: HeartbeatRequest) -> Result<Value> {
        let body = request.to_body()?;
        self.client
            .post("collaboration/v2/agent/heartbeat", &body)
            .await
    }

    /// List tasks available for claiming.
    pub async fn available_tasks(&self, limit: u32) -> Result<Value> {
        self.client
            .get_with_query(
                "collaboration/v2/task/available/tasks",
                &AvailableTasksQuery { limit },
            )
            .await
    }

    /// Claim a task.
    pub async fn claim_task(&self, task_id: &str) -> Result<Value> {
        self.client
            .post(&format!("collaboration/v2/task/{}/claim", task_id), &json!({}))
            .await
    }

    /// Report progress on a claimed task.
    pub async fn update_progress(
        &self,
        task_id: &str,
        update: TaskProgressUpdate,
    ) -> Result<Value> {
        self.client
            .post(&format!("collaboration/v2/task/{}/update", task_id), &update)
            .await
    }

    /// Complete a claimed task.
    pub async fn complete_task(
        &self,
        task_id: &str,
        completion: TaskCompletion,
    ) -> Result<Value> {
        self.client
            .post(
                &format!("collaboration/v2/task/{}/complete", task_id),
                &completion,
            )
            .await
    }
}
