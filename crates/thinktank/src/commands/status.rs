//! Status command - shows service health.

use anyhow::{Result, bail};
use clap::Args;
use console::{Style, style};
use serde_json::{Value, json};

use super::Context;

/// Arguments for the status command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the full status payload
    #[arg(short, long)]
    pub detailed: bool,
}

fn field<'a>(value: &'a Value, key: &str) -> &'a str {
    value.get(key).and_then(Value::as_str).unwrap_or("unknown")
}

/// Run the status command.
pub async fn run(args: StatusArgs, ctx: &Context) -> Result<()> {
    let client = ctx.public_client()?;
    let base_url = client.base_url().to_string();

    match client.status().check().await {
        Ok(status) => {
            if ctx.json_output {
                println!("{}", serde_json::to_string_pretty(&status)?);
            } else {
                let green = Style::new().green();
                let dim = Style::new().dim();

                println!();
                println!("{}", style("ThinkTank Service Status").bold());
                println!("{}", dim.apply_to("─".repeat(40)));
                println!();
                println!(
                    "  {} {}",
                    dim.apply_to("Status:"),
                    green.apply_to(format!("● {}", field(&status, "status")))
                );
                println!("  {} {}", dim.apply_to("Service:"), field(&status, "service"));
                println!("  {} {}", dim.apply_to("Version:"), field(&status, "version"));
                println!("  {} {}", dim.apply_to("API:"), base_url);

                if args.detailed {
                    println!();
                    println!("{}", dim.apply_to("─".repeat(40)));
                    println!();
                    println!("{}", serde_json::to_string_pretty(&status)?);
                }

                println!();
            }
        }
        Err(e) => {
            if ctx.json_output {
                let output = json!({
                    "reachable": false,
                    "api_url": base_url,
                    "error": e.to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            } else {
                let red = Style::new().red();
                let dim = Style::new().dim();

                println!();
                println!("{}", style("ThinkTank Service Status").bold());
                println!("{}", dim.apply_to("─".repeat(40)));
                println!();
                println!(
                    "  {} {}",
                    dim.apply_to("Status:"),
                    red.apply_to("● unreachable")
                );
                println!("  {} {}", dim.apply_to("API:"), base_url);

                if ctx.verbose {
                    println!();
                    println!("  {} {}", dim.apply_to("Error:"), e);
                }

                println!();
                bail!("ThinkTank API at {} is unreachable", base_url);
            }
        }
    }

    Ok(())
}
