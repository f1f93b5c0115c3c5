//! Read commands

use clap::Subcommand;
use okcpu_crypto::to_checksum_address;
use okcpu_sdk::{channels, ChannelEntry};

use super::{client, reader, resolve_token};
use crate::{
    config::Config,
    output::{render_entry, Output},
    CliError,
};

/// Read subcommands
#[derive(Debug, Subcommand)]
pub enum ReadCommand {
    /// Show your computer: owner, username, page, network activity
    Status,
    /// Read the main message board
    Board {
        /// How many recent messages to fetch
        #[arg(long, default_value = "10")]
        count: u64,
    },
    /// Read a named channel
    Channel {
        /// Channel name (board, gm, ok, suggest, announcement, ...)
        name: String,
        /// How many recent messages to fetch
        #[arg(long, default_value = "10")]
        count: u64,
    },
    /// Read your email inbox
    Emails {
        /// How many recent messages to fetch
        #[arg(long, default_value = "10")]
        count: u64,
    },
    /// Print a computer's HTML page
    Page {
        /// Token id (defaults to your configured token)
        token: Option<u64>,
    },
    /// Look up a computer's username
    Username {
        /// Token id (defaults to your configured token)
        token: Option<u64>,
    },
    /// Look up the wallet that owns a computer
    Owner {
        /// Token id (defaults to your configured token)
        token: Option<u64>,
    },
    /// Show per-channel message counts
    Stats,
}

impl ReadCommand {
    pub async fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            ReadCommand::Status => status(config, json).await,
            ReadCommand::Board { count } => channel_page(config, "board", count, json).await,
            ReadCommand::Channel { name, count } => {
                channel_page(config, &name, count, json).await
            }
            ReadCommand::Emails { count } => emails(config, count, json).await,
            ReadCommand::Page { token } => page(config, token, json).await,
            ReadCommand::Username { token } => username(config, token, json).await,
            ReadCommand::Owner { token } => owner(config, token, json).await,
            ReadCommand::Stats => stats(config, json).await,
        }
    }
}

async fn status(config: &Config, json: bool) -> Result<(), CliError> {
    let token = resolve_token(config)?;
    let client = client(config, token);

    let owner = client.owner().await.map_err(|e| CliError::Sdk(e.to_string()))?;
    let username = client
        .read_username()
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;
    let has_page = client
        .has_data("page")
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;
    let stats = client.network_stats().await;

    let owner_hex = to_checksum_address(&owner);
    let shown_name = if username.is_empty() {
        "(not set)".to_string()
    } else {
        username.clone()
    };

    Output::new(json)
        .field_u64("token", token)
        .field("owner", &owner_hex)
        .field("username", &username)
        .field_value("has_page", serde_json::Value::Bool(has_page))
        .field_u64("network_total", stats.total())
        .message(&format!(
            "OKCPU #{}\nOwner:    {}\nUsername: {}\nPage:     {}\nNetwork:  {} messages",
            token,
            owner_hex,
            shown_name,
            if has_page { "set" } else { "(none)" },
            stats.total()
        ))
        .print();

    Ok(())
}

async fn channel_page(
    config: &Config,
    channel: &str,
    count: u64,
    json: bool,
) -> Result<(), CliError> {
    let client = reader(config);
    let entries = client
        .read_channel(channel, count)
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;
    print_entries(channel, &entries, json)
}

async fn emails(config: &Config, count: u64, json: bool) -> Result<(), CliError> {
    let token = resolve_token(config)?;
    let client = client(config, token);
    let entries = client
        .read_emails(count)
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;
    print_entries(&channels::email_channel(token), &entries, json)
}

fn print_entries(channel: &str, entries: &[ChannelEntry], json: bool) -> Result<(), CliError> {
    let rendered = if entries.is_empty() {
        format!("No messages in '{}'", channel)
    } else {
        entries
            .iter()
            .map(render_entry)
            .collect::<Vec<_>>()
            .join("\n\n")
    };

    Output::new(json)
        .field("channel", channel)
        .field_u64("count", entries.len() as u64)
        .field_value("messages", serde_json::to_value(entries)?)
        .message(&rendered)
        .print();

    Ok(())
}

async fn page(config: &Config, token: Option<u64>, json: bool) -> Result<(), CliError> {
    let token = match token {
        Some(t) => t,
        None => resolve_token(config)?,
    };
    let client = reader(config);
    let html = client
        .page_of(token)
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;

    let rendered = if html.is_empty() {
        format!("OKCPU #{} has no page", token)
    } else {
        html.clone()
    };

    Output::new(json)
        .field_u64("token", token)
        .field("page", &html)
        .message(&rendered)
        .print();

    Ok(())
}

async fn username(config: &Config, token: Option<u64>, json: bool) -> Result<(), CliError> {
    let token = match token {
        Some(t) => t,
        None => resolve_token(config)?,
    };
    let client = reader(config);
    let name = client
        .username_of(token)
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;

    let rendered = if name.is_empty() {
        format!("OKCPU #{} has no username", token)
    } else {
        format!("OKCPU #{} is {}", token, name)
    };

    Output::new(json)
        .field_u64("token", token)
        .field("username", &name)
        .message(&rendered)
        .print();

    Ok(())
}

async fn owner(config: &Config, token: Option<u64>, json: bool) -> Result<(), CliError> {
    let token = match token {
        Some(t) => t,
        None => resolve_token(config)?,
    };
    let client = reader(config);
    let owner = client
        .owner_of(token)
        .await
        .map_err(|e| CliError::Sdk(e.to_string()))?;
    let owner_hex = to_checksum_address(&owner);

    Output::new(json)
        .field_u64("token", token)
        .field("owner", &owner_hex)
        .message(&format!("OKCPU #{} is owned by {}", token, owner_hex))
        .print();

    Ok(())
}

async fn stats(config: &Config, json: bool) -> Result<(), CliError> {
    let client = reader(config);
    let stats = client.network_stats().await;

    let mut lines: Vec<String> = stats
        .iter()
        .map(|(name, count)| format!("{:>14}: {}", name, count))
        .collect();
    lines.push(format!("{:>14}: {}", "total", stats.total()));

    Output::new(json)
        .field_value("channels", serde_json::to_value(&stats)?)
        .field_u64("total", stats.total())
        .message(&lines.join("\n"))
        .print();

    Ok(())
}
