//! LLM proxy commands.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde_json::Value;
use thinktank_client::{ChatMessage, LlmChatRequest};

use super::{Context, parse_fields};

/// LLM proxy commands.
#[derive(Args, Debug)]
pub struct LlmArgs {
    #[command(subcommand)]
    pub command: LlmCommand,
}

#[derive(Subcommand, Debug)]
pub enum LlmCommand {
    /// Send a prompt through the proxy
    Chat {
        /// Provider (openai, google, anthropic)
        provider: String,

        /// Model name
        model: String,

        /// User prompt
        prompt: String,

        /// System prompt
        #[arg(long)]
        system: Option<String>,

        /// Sampling temperature (0.0-2.0)
        #[arg(long, default_value_t = 0.7)]
        temperature: f64,

        /// Maximum tokens in the response
        #[arg(long, default_value_t = 500)]
        max_tokens: u32,

        /// Provider-specific parameter as key=value (repeatable)
        #[arg(long = "param", value_name = "KEY=VALUE")]
        params: Vec<String>,
    },

    /// List available models
    Models,

    /// Show usage statistics
    Usage,
}

/// Run the llm command.
pub async fn run(args: LlmArgs, ctx: &Context) -> Result<()> {
    let client = ctx.client()?;
    let llm = client.llm();

    match args.command {
        LlmCommand::Chat {
            provider,
            model,
            prompt,
            system,
            temperature,
            max_tokens,
            params,
        } => {
            let mut messages = Vec::new();
            if let Some(system) = system {
                messages.push(ChatMessage::system(system));
            }
            messages.push(ChatMessage::user(prompt));

            let mut request = LlmChatRequest::new(provider, model, messages)
                .with_temperature(temperature)
                .with_max_tokens(max_tokens);
            for (key, value) in parse_fields(&params)? {
                request = request.with_extra(key, value);
            }

            let result = llm.chat(request).await?;
            match reply_text(&result) {
                Some(text) if !ctx.json_output => println!("{}", text),
                _ => ctx.print_response("LLM response", &result)?,
            }
        }
        LlmCommand::Models => {
            let result = llm.models().await?;
            ctx.print_response("Models", &result)?;
        }
        LlmCommand::Usage => {
            let result = llm.usage().await?;
            ctx.print_response("LLM usage", &result)?;
        }
    }

    Ok(())
}

/// Pull the reply text out of the common response shapes.
fn reply_text(result: &Value) -> Option<&str> {
    result
        .get("response")
        .or_else(|| result.get("content"))
        .or_else(|| result.pointer("/choices/0/message/content"))
        .and_then(Value::as_str)
}
