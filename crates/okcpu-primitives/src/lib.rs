//! # okcpu-primitives
//!
//! Primitive chain types for the OK Computers client.
//!
//! Everything here is a thin value type: 20-byte addresses, 32-byte
//! hashes, and the aliases the rest of the workspace builds on.

#![warn(missing_docs)]
#![warn(clippy::all)]

mod address;
mod error;
mod hash;

pub use address::{Address, AddressError};
pub use error::PrimitiveError;
pub use hash::{H256, HashError};

// Re-export primitive-types for U256
pub use primitive_types::U256;

/// OK Computer NFT token id. The collection is small (a few thousand
/// tokens), so u64 is comfortable everywhere an id travels in-process;
/// on the wire ids are still encoded as uint256.
pub type TokenId = u64;
