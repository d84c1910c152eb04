//! Agent management commands.
//!
//! - `thinktank agents list` - List agents
//! - `thinktank agents get <id>` - Show one agent
//! - `thinktank agents update <id> --set key=value` - Update profile fields
//! - `thinktank agents delete <id>` - Delete an agent

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use serde_json::Value;
use thinktank_client::{AgentUpdate, ListAgentsQuery};

use super::{Context, parse_fields};

/// Agent management commands.
#[derive(Args, Debug)]
pub struct AgentsArgs {
    #[command(subcommand)]
    pub command: AgentsCommand,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommand {
    /// List agents
    List {
        /// Number of results (max 100)
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Skip N results
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },

    /// Show details for an agent
    Get {
        /// Agent ID
        id: String,
    },

    /// Update agent profile fields
    Update {
        /// Agent ID
        id: String,

        /// Field to set as key=value (repeatable)
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        fields: Vec<String>,
    },

    /// Delete an agent
    Delete {
        /// Agent ID
        id: String,
    },
}

/// Run the agents command.
pub async fn run(args: AgentsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let agents = client.agents();

    match args.command {
        AgentsCommand::List { limit, offset } => {
            let result = agents
                .list_with_query(ListAgentsQuery { limit, offset })
                .await?;
            if ctx.json_output {
                ctx.print_response("Agents", &result)?;
            } else {
                print_agent_table(&result);
            }
        }
        AgentsCommand::Get { id } => {
            let result = agents.get(&id).await?;
            ctx.print_response(&format!("Agent {}", id), &result)?;
        }
        AgentsCommand::Update { id, fields } => {
            let fields = parse_fields(&fields)?;
            if fields.is_empty() {
                bail!("nothing to update");
            }
            let result = agents.update(&id, AgentUpdate { fields }).await?;
            ctx.print_response(&format!("Updated agent {}", id), &result)?;
        }
        AgentsCommand::Delete { id } => {
            let result = agents.delete(&id).await?;
            ctx.print_response(&format!("Deleted agent {}", id), &result)?;
        }
    }

    Ok(())
}

/// Print the agent list as a table.
fn print_agent_table(result: &Value) {
    let list = result
        .get("agents")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or_default();

    if list.is_empty() {
        println!("No agents found.");
        return;
    }

    println!("  {:<38} {:<24} ROLE", "ID", "NAME");
    println!("  {}", "-".repeat(75));
    for agent in list {
        let text = |key: &str| {
            agent
                .get(key)
                .map(|v| v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string()))
                .unwrap_or_default()
        };
        println!("  {:<38} {:<24} {}", text("id"), text("name"), text("role"));
    }
    println!();
    println!("{} agent(s)", list.len());
}
