//! Tasks command - agent presence and the shared task queue.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;
use thinktank_client::{HeartbeatRequest, TaskCompletion, TaskProgressUpdate};

use super::{Context, parse_fields};

/// Arguments for the tasks command.
#[derive(Args, Debug)]
pub struct TasksArgs {
    #[command(subcommand)]
    pub command: Option<TasksCommand>,
}

#[derive(Subcommand, Debug)]
pub enum TasksCommand {
    /// List tasks available for claiming (default)
    Available {
        /// Number of results
        #[arg(long, default_value_t = 10)]
        limit: u32,
    },

    /// Show this agent's collaboration status
    Status,

    /// Send a heartbeat
    Heartbeat {
        /// Agent status (active, idle, busy)
        #[arg(default_value = "active")]
        status: String,

        /// Metric as key=value (repeatable)
        #[arg(long = "metric", value_name = "KEY=VALUE")]
        metrics: Vec<String>,
    },

    /// Claim a task
    Claim {
        /// Task ID
        id: String,
    },

    /// Report progress on a claimed task
    Progress {
        /// Task ID
        id: String,

        /// Progress percentage (0-100)
        progress: u32,

        /// Task status
        #[arg(long, default_value = "in_progress")]
        status: String,

        /// Progress notes
        #[arg(long, default_value = "")]
        notes: String,
    },

    /// Complete a claimed task
    Complete {
        /// Task ID
        id: String,

        /// Result (JSON, or plain text)
        result: String,

        /// Confidence score (0.0-1.0)
        #[arg(long, default_value_t = 0.95)]
        confidence: f64,

        /// Completion notes
        #[arg(long, default_value = "")]
        notes: String,
    },
}

/// Run the tasks command.
pub async fn run(args: TasksArgs, ctx: &Context) -> Result<()> {
    let cmd = args
        .command
        .unwrap_or(TasksCommand::Available { limit: 10 });

    let client = ctx.client()?;
    let collab = client.collaboration();

    match cmd {
        TasksCommand::Available { limit } => {
            let result = collab.available_tasks(limit).await?;
            ctx.print_response("Available tasks", &result)?;
        }
        TasksCommand::Status => {
            let result = collab.agent_status().await?;
            ctx.print_response("Agent status", &result)?;
        }
        TasksCommand::Heartbeat { status, metrics } => {
            let mut request = HeartbeatRequest::new(status);
            for (key, value) in parse_fields(&metrics)? {
                request = request.with_metric(key, value);
            }
            let result = collab.heartbeat(request).await?;
            ctx.print_response("Heartbeat", &result)?;
        }
        TasksCommand::Claim { id } => {
            let result = collab.claim_task(&id).await?;
            ctx.print_response(&format!("Claimed task {}", id), &result)?;
        }
        TasksCommand::Progress {
            id,
            progress,
            status,
            notes,
        } => {
            let update = TaskProgressUpdate::new(progress)
                .with_status(status)
                .with_notes(notes);
            let result = collab.update_progress(&id, update).await?;
            ctx.print_response(&format!("Task {} at {}%", id, progress), &result)?;
        }
        TasksCommand::Complete {
            id,
            result,
            confidence,
            notes,
        } => {
            let completion = TaskCompletion::new(parse_result(&result))
                .with_confidence(confidence)
                .with_notes(notes);
            let response = collab.complete_task(&id, completion).await?;
            ctx.print_response(&format!("Completed task {}", id), &response)?;
        }
    }

    if ctx.verbose {
        eprintln!("\nAPI: {}", client.base_url());
    }

    Ok(())
}

/// A task result is any JSON value; anything that is not JSON is sent as text.
fn parse_result(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}
