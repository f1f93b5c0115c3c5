//! Write commands
//!
//! Every write is pure: it builds calldata locally and prints an
//! unsigned transaction descriptor for an external signer. Nothing
//! here touches the network or any key material.

use std::path::PathBuf;

use clap::Subcommand;
use okcpu_sdk::TxDescriptor;

use super::{client, resolve_token};
use crate::{config::Config, output::Output, CliError};

/// Write subcommands
#[derive(Debug, Subcommand)]
pub enum WriteCommand {
    /// Post a message to a channel
    Post {
        /// Channel name
        channel: String,
        /// Message text
        text: String,
    },
    /// Set your HTML page from a file
    SetPage {
        /// Path to an HTML file (at most 65536 bytes)
        file: PathBuf,
    },
    /// Set your username (at most 16 characters)
    SetUsername {
        /// New username
        name: String,
    },
    /// Send an email to another computer
    Email {
        /// Recipient token id
        to: u64,
        /// Message text
        text: String,
    },
    /// Store a string under a custom key
    Store {
        /// Key name
        key: String,
        /// Value to store
        value: String,
    },
    /// Remove a stored key
    Remove {
        /// Key name
        key: String,
    },
}

impl WriteCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        let token = resolve_token(config)?;
        let client = client(config, token);

        let descriptor = match self {
            WriteCommand::Post { channel, text } => client.post_message(&channel, &text),
            WriteCommand::SetPage { file } => {
                let html = std::fs::read_to_string(&file)?;
                client
                    .set_page(&html)
                    .map_err(|e| CliError::Sdk(e.to_string()))?
            }
            WriteCommand::SetUsername { name } => client
                .set_username(&name)
                .map_err(|e| CliError::Sdk(e.to_string()))?,
            WriteCommand::Email { to, text } => client.send_email(to, &text),
            WriteCommand::Store { key, value } => client
                .store_data(&key, &value)
                .map_err(|e| CliError::Sdk(e.to_string()))?,
            WriteCommand::Remove { key } => client.remove_data(&key),
        };

        print_descriptor(&descriptor, json)
    }
}

fn print_descriptor(descriptor: &TxDescriptor, json: bool) -> Result<(), CliError> {
    let value = serde_json::to_value(descriptor)?;
    let pretty = serde_json::to_string_pretty(&value)?;

    Output::new(json)
        .field_value("descriptor", value)
        .message(&format!(
            "Unsigned transaction (sign and broadcast with your wallet):\n{}",
            pretty
        ))
        .print();

    Ok(())
}
