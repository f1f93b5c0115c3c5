//! # okcpu-sdk
//!
//! Read/write client for OK Computers, the onchain social network on
//! Base.
//!
//! ## Features
//!
//! - **OkComputer**: client bound to one token; reads channels, pages,
//!   usernames, and ownership via `eth_call`
//! - **Write builders**: pure functions producing unsigned call
//!   descriptors; signing, gas, and broadcast stay with the caller
//! - **Channels**: keccak-based channel addressing, including the
//!   per-token email convention
//! - **ABI**: encoding and decoding for the contract's call surface
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use okcpu_sdk::OkComputer;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Act as OK Computer #1399 against the public Base endpoint
//!     let computer = OkComputer::new(1399);
//!
//!     // Read the last 5 board posts
//!     for entry in computer.read_board(5).await? {
//!         match entry.message() {
//!             Some(message) => println!("#{}: {}", message.token_id, message.text),
//!             None => println!("slot {} unavailable", entry.index()),
//!         }
//!     }
//!
//!     // Build an unsigned post; hand the JSON to your signer
//!     let descriptor = computer.post_message("board", "gm from rust");
//!     println!("{}", serde_json::to_string(&descriptor)?);
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod abi;
pub mod channels;
mod client;
mod error;
pub mod selectors;
mod transport;
mod types;

// Re-export main types
pub use client::{
    OkComputer, CHAIN_ID, DEFAULT_RPC_URL, MAX_PAGE_BYTES, MAX_USERNAME_CHARS, NFT_CONTRACT,
    STORAGE_CONTRACT,
};
pub use error::SdkError;
pub use transport::MockTransport;

/// Re-export Transport trait for custom implementations
pub use transport::Transport;
pub use types::{ChannelEntry, Message, NetworkStats, TxDescriptor};

#[cfg(feature = "http")]
pub use transport::HttpTransport;

// Re-export primitives for convenience
pub use okcpu_primitives::{Address, TokenId, H256, U256};
