//! Analytics commands.

use anyhow::Result;
use clap::{Args, Subcommand};

use super::Context;

/// Analytics commands.
#[derive(Args, Debug)]
pub struct AnalyticsArgs {
    /// Number of days to analyze (1-90)
    #[arg(long, default_value_t = 7, global = true)]
    pub days: u32,

    #[command(subcommand)]
    pub report: Report,
}

#[derive(Subcommand, Debug, Clone, Copy)]
pub enum Report {
    /// Dashboard summary
    Dashboard,
    /// Performance trends
    Trends,
    /// Task velocity
    Velocity,
    /// Collaboration network graph
    Network,
    /// Resource utilization
    Resources,
}

/// Run the analytics command.
pub async fn run(args: AnalyticsArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let analytics = client.analytics();
    let days = args.days;

    let (title, result) = match args.report {
        Report::Dashboard => ("Dashboard summary", analytics.dashboard(days).await?),
        Report::Trends => ("Performance trends", analytics.performance_trends(days).await?),
        Report::Velocity => ("Task velocity", analytics.task_velocity(days).await?),
        Report::Network => (
            "Collaboration network",
            analytics.collaboration_network(days).await?,
        ),
        Report::Resources => (
            "Resource utilization",
            analytics.resource_utilization(days).await?,
        ),
    };

    ctx.print_response(&format!("{} ({} days)", title, days), &result)
}
