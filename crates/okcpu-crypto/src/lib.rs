//! # okcpu-crypto
//!
//! Hashing for the OK Computers client.
//!
//! - Keccak-256 (channel keys, function selectors)
//! - EIP-55 checksum address rendering

#![warn(missing_docs)]
#![warn(clippy::all)]

mod checksum;
mod hash;

pub use checksum::to_checksum_address;
pub use hash::keccak256;
