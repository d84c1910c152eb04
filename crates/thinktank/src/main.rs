//! ThinkTank - command-line client for the ThinkTank agent API
//!
//! Main entry point for the ThinkTank CLI.

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use commands::{agents, analytics, demo, keygen, llm, messages, status, tasks};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// ThinkTank - command-line client for the ThinkTank agent API
#[derive(Parser)]
#[command(name = "thinktank")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output raw JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// API key sent as x-api-key
    #[arg(long, global = true, env = "THINKTANK_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// API base URL (default: https://paparazzime.cloud/api)
    #[arg(long, global = true, env = "THINKTANK_API_URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show service status
    Status(status::StatusArgs),

    /// Generate a new API key for an agent
    Keygen(keygen::KeygenArgs),

    /// Agent management
    Agents(agents::AgentsArgs),

    /// Send and read messages
    Messages(messages::MessagesArgs),

    /// Analytics reports
    Analytics(analytics::AnalyticsArgs),

    /// Agent presence and the shared task queue
    Tasks(tasks::TasksArgs),

    /// LLM proxy
    Llm(llm::LlmArgs),

    /// Run the example workflow end to end
    Demo(demo::DemoArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Console logging on stderr; RUST_LOG overrides the defaults
    let default_filter = if cli.verbose {
        "thinktank=debug,thinktank_client=debug,info"
    } else {
        "thinktank=info,thinktank_client=info,warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    // Create context for commands
    let ctx = commands::Context {
        api_key: cli.api_key,
        api_url: cli.api_url,
        json_output: cli.json,
        verbose: cli.verbose,
    };

    // Dispatch to command handlers
    match cli.command {
        Commands::Status(args) => status::run(args, &ctx).await,
        Commands::Keygen(args) => keygen::run(args, &ctx).await,
        Commands::Agents(args) => agents::run(args, &ctx).await,
        Commands::Messages(args) => messages::run(args, &ctx).await,
        Commands::Analytics(args) => analytics::run(args, &ctx).await,
        Commands::Tasks(args) => tasks::run(args, &ctx).await,
        Commands::Llm(args) => llm::run(args, &ctx).await,
        Commands::Demo(args) => demo::run(args, &ctx).await,
    }
}
