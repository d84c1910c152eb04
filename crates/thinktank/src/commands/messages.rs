//! Messaging commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use thinktank_client::{ListMessagesQuery, SendMessageRequest};

use super::{Context, parse_fields};

/// Messaging commands.
#[derive(Args, Debug)]
pub struct MessagesArgs {
    #[command(subcommand)]
    pub command: MessagesCommand,
}

#[derive(Subcommand, Debug)]
pub enum MessagesCommand {
    /// List messages
    List {
        /// Number of results
        #[arg(long, default_value_t = 50)]
        limit: u32,

        /// Skip N results
        #[arg(long, default_value_t = 0)]
        offset: u32,

        /// Only messages for this recipient
        #[arg(long)]
        recipient: Option<String>,
    },

    /// Show a message
    Get {
        /// Message ID
        id: String,
    },

    /// Send a message to another agent
    Send {
        /// Recipient agent ID
        recipient: String,

        /// Message subject
        subject: String,

        /// Message content
        content: String,

        /// Priority (low, normal, high, urgent)
        #[arg(long, default_value = "normal")]
        priority: String,

        /// Extra metadata as key=value (repeatable)
        #[arg(long = "meta", value_name = "KEY=VALUE")]
        metadata: Vec<String>,
    },
}

/// Run the messages command.
pub async fn run(args: MessagesArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let messages = client.messages();

    match args.command {
        MessagesCommand::List {
            limit,
            offset,
            recipient,
        } => {
            let result = messages
                .list_with_query(ListMessagesQuery {
                    limit,
                    offset,
                    recipient_id: recipient,
                })
                .await?;
            ctx.print_response("Messages", &result)?;
        }
        MessagesCommand::Get { id } => {
            let result = messages.get(&id).await?;
            ctx.print_response(&format!("Message {}", id), &result)?;
        }
        MessagesCommand::Send {
            recipient,
            subject,
            content,
            priority,
            metadata,
        } => {
            let mut request =
                SendMessageRequest::new(recipient, subject, content).with_priority(priority);
            for (key, value) in parse_fields(&metadata)? {
                request = request.with_extra(key, value);
            }
            let result = messages.send(request).await?;
            ctx.print_response("Message sent", &result)?;
        }
    }

    Ok(())
}
