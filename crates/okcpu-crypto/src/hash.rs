//! Keccak-256 hashing

use okcpu_primitives::H256;
use sha3::{Digest, Keccak256};

/// Compute the Keccak-256 hash of the input data.
///
/// This is the packed form: the raw bytes go straight into the sponge
/// with no ABI length prefix or padding, matching Solidity's
/// `keccak256(abi.encodePacked(...))`. Channel keys and function
/// selectors are both built on it.
pub fn keccak256(data: &[u8]) -> H256 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    H256::from_bytes(result.into())
}
