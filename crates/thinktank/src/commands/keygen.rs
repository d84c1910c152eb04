//! Keygen command - register an agent and obtain its API key.

use anyhow::Result;
use clap::Args;
use console::style;
use serde_json::Value;
use thinktank_client::GenerateKeyRequest;

use super::{Context, parse_fields};

/// Arguments for the keygen command.
#[derive(Args, Debug)]
pub struct KeygenArgs {
    /// Name of the agent
    pub agent_name: String,

    /// Agent role
    #[arg(long, default_value = "researcher")]
    pub role: String,

    /// Agent description
    #[arg(long, default_value = "")]
    pub description: String,

    /// Agent codename
    #[arg(long)]
    pub codename: Option<String>,

    /// Hostname the agent runs on
    #[arg(long)]
    pub hostname: Option<String>,

    /// Key type
    #[arg(long)]
    pub key_type: Option<String>,

    /// Extra field as key=value (repeatable)
    #[arg(long = "field", value_name = "KEY=VALUE")]
    pub fields: Vec<String>,
}

impl KeygenArgs {
    fn into_request(self) -> Result<GenerateKeyRequest> {
        let mut request = GenerateKeyRequest::new(self.agent_name)
            .with_role(self.role)
            .with_description(self.description);
        if let Some(codename) = self.codename {
            request = request.with_codename(codename);
        }
        if let Some(hostname) = self.hostname {
            request = request.with_hostname(hostname);
        }
        if let Some(key_type) = self.key_type {
            request = request.with_key_type(key_type);
        }
        for (key, value) in parse_fields(&self.fields)? {
            request = request.with_extra(key, value);
        }
        Ok(request)
    }
}

/// Run the keygen command.
pub async fn run(args: KeygenArgs, ctx: &Context) -> Result<()> {
    let request = args.into_request()?;
    // Registration works with or without an existing key.
    let result = if ctx.api_key.is_some() {
        ctx.client()?.keys().generate(request).await?
    } else {
        ctx.public_client()?.keys().generate(request).await?
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string(&result)?);
        return Ok(());
    }

    match result.get("api_key").and_then(Value::as_str) {
        Some(key) => {
            println!("{} {}", style("API key:").bold(), key);
            if let Some(agent_id) = result.get("agent_id").and_then(Value::as_str) {
                println!("{} {}", style("Agent ID:").bold(), agent_id);
            }
            println!();
            println!("Save this key, it is only shown once:");
            println!("  export THINKTANK_API_KEY='{}'", key);
        }
        None => ctx.print_response("Key generation response", &result)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_request_collects_extras() {
        let args = KeygenArgs {
            agent_name: "Scout".to_string(),
            role: "researcher".to_string(),
            description: String::new(),
            codename: Some("owl".to_string()),
            hostname: None,
            key_type: None,
            fields: vec!["tier=2".to_string()],
        };
        let request = args.into_request().unwrap();
        assert_eq!(request.agent_name, "Scout");
        assert_eq!(request.extra.get("codename"), Some(&Value::from("owl")));
        assert_eq!(request.extra.get("tier"), Some(&Value::from(2)));
        assert!(request.extra.get("hostname").is_none());
    }
}
