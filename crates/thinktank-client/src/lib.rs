//! HTTP client SDK for the ThinkTank agent API.
//!
//! This crate provides a thin client for the ThinkTank service: every method
//! issues exactly one HTTP request and returns the decoded JSON body as a
//! [`serde_json::Value`]. There is no retry, caching or response validation.
//!
//! # Example
//!
//! ```no_run
//! use thinktank_client::{Result, SendMessageRequest, ThinkTankClient};
//!
//! # async fn example() -> Result<()> {
//! // API key from the argument or THINKTANK_API_KEY, base URL from
//! // THINKTANK_API_URL or the default
//! let client = ThinkTankClient::new(None, None)?;
//!
//! // Public status check (no API key sent)
//! let status = client.status().check().await?;
//! println!("Service: {}", status["service"]);
//!
//! // List agents and message the first one
//! let agents = client.agents().list().await?;
//! if let Some(id) = agents["agents"][0]["id"].as_str() {
//!     client
//!         .messages()
//!         .send(SendMessageRequest::new(id, "Hello", "Hi from Rust").with_priority("high"))
//!         .await?;
//! }
//!
//! // Seven-day dashboard
//! let dashboard = client.analytics().dashboard(7).await?;
//! println!("{}", dashboard["data"]["overview"]);
//! # Ok(())
//! # }
//! ```
//!
//! # API Coverage
//!
//! - **Status**: Public service health check
//! - **Keys**: Generate API keys for new agents
//! - **Agents**: List, get, update, delete agents
//! - **Messages**: Send, list, get messages
//! - **Analytics**: Dashboard, trends, velocity, collaboration network, resources
//! - **Collaboration**: Agent status, heartbeats, task claiming and completion
//! - **LLM**: Proxied chat, model list, usage

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod types;

pub use client::{API_KEY_HEADER, ClientBuilder, PublicClient, ThinkTankClient};
pub use config::{API_KEY_ENV, API_URL_ENV, ClientConfig, DEFAULT_BASE_URL};
pub use error::{Error, Result};
pub use types::*;

/// Create a client with the given API key (or `THINKTANK_API_KEY`).
pub fn create_client(api_key: Option<String>) -> Result<ThinkTankClient> {
    ThinkTankClient::new(api_key, None)
}
