//! SDK error types

use thiserror::Error;

/// Error type for every fallible client operation
#[derive(Debug, Error)]
pub enum SdkError {
    /// Input rejected before any encoding or network activity
    #[error("Validation error: {0}")]
    Validation(String),

    /// Malformed or truncated ABI return data
    #[error("ABI decoding error: {0}")]
    Decode(String),

    /// Error reported by the RPC node or by the contract (reverts
    /// surface here)
    #[error("RPC error: {code} - {message}")]
    Rpc {
        /// Error code
        code: i64,
        /// Error message
        message: String,
    },

    /// Network-level transport failure
    #[error("Transport error: {0}")]
    Transport(String),

    /// Invalid hex string in an RPC response
    #[error("Invalid hex: {0}")]
    InvalidHex(String),
}

impl From<hex::FromHexError> for SdkError {
    fn from(e: hex::FromHexError) -> Self {
        SdkError::InvalidHex(e.to_string())
    }
}
