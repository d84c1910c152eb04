//! Analytics API.
//!
//! Every endpoint takes the size of the analysis window in days.

use serde_json::Value;

use crate::client::ThinkTankClient;
use crate::error::Result;
use crate::types::AnalyticsQuery;

/// Analytics API client.
pub struct AnalyticsApi {
    client: ThinkTankClient,
}

impl AnalyticsApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    async fn window(&self, path: &str, days: u32) -> Result<Value> {
        self.client
            .get_with_query(path, &AnalyticsQuery { days })
            .await
    }

    /// Dashboard summary.
    pub async fn dashboard(&self, days: u32) -> Result<Value> {
        self.window("analytics/dashboard/summary", days).await
    }

    /// Performance trends.
    pub async fn performance_trends(&self, days: u32) -> Result<Value> {
        self.window("analytics/performance/trends", days).await
    }

    /// Task velocity metrics.
    pub async fn task_velocity(&self, days: u32) -> Result<Value> {
        self.window("analytics/velocity/tasks", days).await
    }

    /// Collaboration network graph.
    pub async fn collaboration_network(&self, days: u32) -> Result<Value> {
        self.window("analytics/collaboration/network", days).await
    }

    /// Resource utilization metrics.
    pub async fn resource_utilization(&self, days: u32) -> Result<Value> {
        self.window("analytics/resources/utilization", days).await
    }
}
