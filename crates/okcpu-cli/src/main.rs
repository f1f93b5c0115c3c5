//! # okcpu-cli
//!
//! Command-line interface for the OK Computers on-chain social network.
//!
//! ## Usage
//!
//! ```bash
//! # Read commands
//! okcpu board
//! okcpu channel gm --count 20
//! okcpu username 42
//! okcpu stats
//!
//! # Write commands (print an unsigned transaction descriptor)
//! okcpu --token 1399 post board "gm onchain"
//! okcpu --token 1399 set-username neo
//! okcpu --token 1399 email 42 "you there?"
//!
//! # Configuration
//! okcpu config --set-token 1399
//! okcpu config --show
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// OK Computers CLI
#[derive(Parser, Debug)]
#[command(name = "okcpu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// RPC endpoint URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Token id of the OK Computer acting as "you"
    #[arg(long, global = true)]
    token: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    #[command(flatten)]
    Read(commands::read::ReadCommand),
    #[command(flatten)]
    Write(commands::write::WriteCommand),
    /// Show or edit configuration
    Config {
        /// Show current configuration
        #[arg(long)]
        show: bool,
        /// Set RPC URL
        #[arg(long)]
        set_rpc: Option<String>,
        /// Set default token id
        #[arg(long)]
        set_token: Option<u64>,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(filter)
        .init();

    // Load config
    let mut config = Config::load();

    // Command-line overrides
    if let Some(rpc_url) = cli.rpc_url {
        config.rpc_url = rpc_url;
    }
    if let Some(token) = cli.token {
        config.token = Some(token);
    }
    tracing::debug!(rpc_url = %config.rpc_url, token = ?config.token, "configuration loaded");

    let result = match cli.command {
        Commands::Read(cmd) => cmd.execute(&config, cli.json).await,
        Commands::Write(cmd) => cmd.execute(&config, cli.json),
        Commands::Config {
            show,
            set_rpc,
            set_token,
        } => handle_config(&mut config, show, set_rpc, set_token, cli.json),
    };

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn handle_config(
    config: &mut Config,
    show: bool,
    set_rpc: Option<String>,
    set_token: Option<u64>,
    json: bool,
) -> Result<(), CliError> {
    let mut modified = false;

    if let Some(rpc) = set_rpc {
        config.rpc_url = rpc;
        modified = true;
    }

    if let Some(token) = set_token {
        config.token = Some(token);
        modified = true;
    }

    if modified {
        config.save()?;
        Output::new(json)
            .field("status", "saved")
            .message("Configuration saved")
            .print();
    } else if show {
        let token = config
            .token
            .map(|t| t.to_string())
            .unwrap_or_else(|| "(not set)".to_string());
        Output::new(json)
            .field("rpc_url", &config.rpc_url)
            .field("token", &token)
            .message(&format!(
                "RPC URL: {}\nToken: {}",
                config.rpc_url, token
            ))
            .print();
    } else {
        Output::new(json)
            .message("Use --show to display config, or --set-rpc/--set-token to modify")
            .print();
    }

    Ok(())
}
