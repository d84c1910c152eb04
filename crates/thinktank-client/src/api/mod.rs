//! API endpoint implementations.

mod agents;
mod analytics;
mod collaboration;
mod keys;
mod llm;
mod messages;
mod status;

pub use agents::AgentsApi;
pub use analytics::AnalyticsApi;
pub use collaboration::CollaborationApi;
pub use keys::KeysApi;
pub use llm::LlmApi;
pub use messages::MessagesApi;
pub use status::StatusApi;
