//! CLI command handlers.

pub mod agents;
pub mod analytics;
pub mod demo;
pub mod keygen;
pub mod llm;
pub mod messages;
pub mod status;
pub mod tasks;

use anyhow::{Context as _, Result, bail};
use console::style;
use serde_json::{Map, Value};
use thinktank_client::{ClientBuilder, ClientConfig, PublicClient, ThinkTankClient};

/// Shared context for all commands.
#[derive(Clone)]
pub struct Context {
    /// API key (flag or THINKTANK_API_KEY).
    pub api_key: Option<String>,
    /// Base URL override (flag or THINKTANK_API_URL).
    pub api_url: Option<String>,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}

impl Context {
    fn config(&self) -> ClientConfig {
        ClientConfig {
            api_key: self.api_key.clone(),
            base_url: self.api_url.clone(),
        }
    }

    /// Build an API client from the resolved flags.
    pub fn client(&self) -> Result<ThinkTankClient> {
        let config = self.config();
        tracing::debug!(?config, "Creating ThinkTank client");
        ThinkTankClient::from_config(config)
            .context("could not create client (pass --api-key or set THINKTANK_API_KEY)")
    }

    /// Build a client for the endpoints that need no API key.
    pub fn public_client(&self) -> Result<PublicClient> {
        let config = self.config();
        tracing::debug!(?config, "Creating public ThinkTank client");
        ClientBuilder::from_config(config)
            .build_public()
            .context("could not create client")
    }

    /// Build a client for `key`, keeping the configured base URL.
    pub fn client_with_key(&self, key: &str) -> Result<ThinkTankClient> {
        ThinkTankClient::from_config(ClientConfig {
            api_key: Some(key.to_string()),
            base_url: self.api_url.clone(),
        })
        .context("could not create client for the generated key")
    }

    /// Print an API response under a heading.
    pub fn print_response(&self, heading: &str, value: &Value) -> Result<()> {
        if self.json_output {
            println!("{}", serde_json::to_string(value)?);
        } else {
            println!("{}", style(heading).bold());
            println!("{}", serde_json::to_string_pretty(value)?);
        }
        Ok(())
    }
}

/// Parse a `key=value` argument. The value is read as JSON when it parses,
/// otherwise it is kept as a string (`count=3` is a number, `name=Scout` a string).
pub fn parse_field(raw: &str) -> Result<(String, Value)> {
    let Some((key, value)) = raw.split_once('=') else {
        bail!("expected key=value, got '{}'", raw);
    };
    if key.is_empty() {
        bail!("empty key in '{}'", raw);
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::String(value.to_string()));
    Ok((key.to_string(), value))
}

/// Parse a list of `key=value` arguments into a JSON object.
pub fn parse_fields(raw: &[String]) -> Result<Map<String, Value>> {
    raw.iter().map(|f| parse_field(f)).collect()
}
