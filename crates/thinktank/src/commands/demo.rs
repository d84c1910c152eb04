//! Demo command - walks through the main API areas once.
//!
//! Checks service status, registers an agent when no API key is configured,
//! lists agents and messages, sends a test message to the first agent, then
//! prints the analytics dashboard and trends.

use anyhow::{Context as _, Result, bail};
use clap::Args;
use console::{Style, style};
use serde_json::Value;
use thinktank_client::{GenerateKeyRequest, ListMessagesQuery, SendMessageRequest, ThinkTankClient};

use super::Context;

/// Arguments for the demo command.
#[derive(Args, Debug)]
pub struct DemoArgs {
    /// Analytics window in days
    #[arg(long, default_value_t = 7)]
    pub days: u32,

    /// Skip sending the test message
    #[arg(long)]
    pub no_send: bool,

    /// Agent name registered when no API key is configured
    #[arg(long, default_value = "RustExampleAgent")]
    pub agent_name: String,
}

fn text<'a>(value: &'a Value, pointer: &str) -> &'a str {
    value.pointer(pointer).and_then(Value::as_str).unwrap_or("?")
}

fn number(value: &Value, pointer: &str) -> f64 {
    value.pointer(pointer).and_then(Value::as_f64).unwrap_or(0.0)
}

fn list<'a>(value: &'a Value, key: &str) -> &'a [Value] {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default()
}

/// Numbered step headings; the count shifts when key generation is skipped.
#[derive(Default)]
struct Steps(u32);

impl Steps {
    fn next(&mut self, title: &str) {
        self.0 += 1;
        println!();
        println!("{}", style(format!("{}. {}...", self.0, title)).bold());
    }
}

/// First 20 characters of a key, for display.
fn key_prefix(key: &str) -> String {
    key.chars().take(20).collect()
}

fn failed(err: &thinktank_client::Error) {
    tracing::warn!(error = %err, "Demo step failed");
    println!("   {} {}", Style::new().red().apply_to("✗"), err);
}

/// Run the demo command.
pub async fn run(args: DemoArgs, ctx: &Context) -> Result<()> {
    let public = ctx.public_client()?;
    let ok = Style::new().green().apply_to("✓");
    let rule = "=".repeat(70);
    let mut steps = Steps::default();

    println!("{}", rule);
    println!("{}", style("ThinkTank API - Example Workflow").bold());
    println!("{}", rule);

    steps.next("Checking API status");
    match public.status().check().await {
        Ok(status) => {
            println!("   Status: {}", text(&status, "/status"));
            println!("   Service: {}", text(&status, "/service"));
            println!("   Version: {}", text(&status, "/version"));
        }
        Err(e) => failed(&e),
    }

    let client = match ctx.api_key.as_deref().filter(|k| !k.is_empty()) {
        Some(key) => {
            println!();
            println!("Using existing API key: {}...", key_prefix(key));
            ctx.client()?
        }
        None => {
            steps.next("Generating API key");
            let request = GenerateKeyRequest::new(&args.agent_name)
                .with_description("Testing the Rust API client");
            let created = public
                .keys()
                .generate(request)
                .await
                .context("API key generation failed")?;
            let Some(key) = created.get("api_key").and_then(Value::as_str) else {
                bail!("API key generation response has no api_key: {}", created);
            };

            println!("   {} API Key: {}", ok, key);
            println!("   Agent ID: {}", text(&created, "/agent_id"));
            println!();
            println!("   Save this key for future use:");
            println!("   export THINKTANK_API_KEY='{}'", key);
            ctx.client_with_key(key)?
        }
    };

    steps.next("Listing agents");
    let agents = match client.agents().list().await {
        Ok(result) => {
            let agents = list(&result, "agents").to_vec();
            println!("   Found {} agents:", agents.len());
            for agent in agents.iter().take(5) {
                println!("   - {} ({})", text(agent, "/name"), text(agent, "/role"));
            }
            agents
        }
        Err(e) => {
            failed(&e);
            Vec::new()
        }
    };

    steps.next("Getting messages");
    let query = ListMessagesQuery {
        limit: 10,
        ..Default::default()
    };
    match client.messages().list_with_query(query).await {
        Ok(result) => {
            let messages = list(&result, "messages");
            println!("   Found {} messages:", messages.len());
            for msg in messages.iter().take(3) {
                println!(
                    "   - {} (from {})",
                    text(msg, "/subject"),
                    text(msg, "/sender_name")
                );
            }
        }
        Err(e) => failed(&e),
    }

    steps.next("Sending test message");
    match agents.first() {
        Some(_) if args.no_send => println!("   Skipped (--no-send)"),
        Some(recipient) => send_test_message(&client, recipient, &ok).await,
        None => println!("   Skipped (no agents to message)"),
    }

    steps.next("Getting analytics dashboard");
    match client.analytics().dashboard(args.days).await {
        Ok(dashboard) => {
            let overview = "/data/overview";
            println!(
                "   Active Agents: {}",
                number(&dashboard, &format!("{}/active_agents", overview))
            );
            println!(
                "   Total Tasks: {}",
                number(&dashboard, &format!("{}/total_tasks", overview))
            );
            println!(
                "   Tasks Completed: {}",
                number(&dashboard, &format!("{}/tasks_completed", overview))
            );
            println!(
                "   Total Messages: {}",
                number(&dashboard, &format!("{}/total_messages", overview))
            );
        }
        Err(e) => failed(&e),
    }

    steps.next("Getting performance trends");
    match client.analytics().performance_trends(args.days).await {
        Ok(trends) => {
            println!(
                "   Task Completion Rate: {:.1}%",
                number(&trends, "/data/task_trends/completion_rate") * 100.0
            );
            println!(
                "   Average Response Time: {:.2}s",
                number(&trends, "/data/task_trends/avg_response_time")
            );
        }
        Err(e) => failed(&e),
    }

    println!();
    println!("{}", rule);
    println!("{} Example complete", ok);
    println!("{}", rule);

    Ok(())
}

async fn send_test_message(
    client: &ThinkTankClient,
    recipient: &Value,
    ok: &console::StyledObject<&str>,
) {
    let Some(id) = recipient.get("id").and_then(Value::as_str) else {
        println!("   Skipped (first agent has no id)");
        return;
    };

    let request = SendMessageRequest::new(
        id,
        "Hello from Rust!",
        "This is a test message from the ThinkTank CLI demo.",
    );
    match client.messages().send(request).await {
        Ok(_) => println!("   {} Message sent to {}", ok, text(recipient, "/name")),
        Err(e) => failed(&e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_helpers_tolerate_missing_fields() {
        let value = json!({"data": {"overview": {"active_agents": 4}}, "agents": [{"id": "a"}]});
        assert_eq!(number(&value, "/data/overview/active_agents"), 4.0);
        assert_eq!(number(&value, "/data/overview/total_tasks"), 0.0);
        assert_eq!(text(&value, "/agents/0/id"), "a");
        assert_eq!(text(&value, "/agents/0/name"), "?");
        assert_eq!(list(&value, "agents").len(), 1);
        assert!(list(&value, "messages").is_empty());
    }

    #[test]
    fn test_key_prefix_shows_at_most_twenty_chars() {
        assert_eq!(key_prefix("tt_0123456789abcdefghijkl"), "tt_0123456789abcdefg");
        assert_eq!(key_prefix("short"), "short");
    }
}
