//! Service status API.

use serde_json::Value;

use crate::client::ThinkTankClient;
use crate::error::Result;

/// Service status API client.
///
/// The status endpoint is public: requests carry no API key and use the
/// shorter status timeout.
pub struct StatusApi {
    client: ThinkTankClient,
}

impl StatusApi {
    pub(crate) fn new(client: ThinkTankClient) -> Self {
        Self { client }
    }

    /// Get service health (`status`, `service`, `version`, ...).
    pub async fn check(&self) -> Result<Value> {
        self.client.get_unauthenticated("status").await
    }

    /// Simple connectivity check - returns true if the service answered.
    pub async fn is_up(&self) -> bool {
        self.check().await.is_ok()
    }
}
