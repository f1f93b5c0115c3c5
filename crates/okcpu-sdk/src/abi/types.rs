//! ABI type definitions

use okcpu_primitives::{Address, H256, U256};

/// Solidity ABI value, as passed to `encode` or returned by `decode`.
///
/// Only the types the OK Computers contracts actually use are modeled;
/// there is no dynamic `bytes`, no arrays, no signed integers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Address (20 bytes, left-padded to a word)
    Address(Address),
    /// Unsigned integer, uint256 on the wire
    Uint(U256),
    /// Boolean
    Bool(bool),
    /// Fixed-size bytes, right-padded to a word (channel keys are bytes32)
    FixedBytes(Vec<u8>),
    /// Dynamic UTF-8 string
    String(String),
    /// Tuple (struct), e.g. the stored message record
    Tuple(Vec<Token>),
}

/// Solidity parameter types understood by this codec
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamType {
    /// Address
    Address,
    /// Unsigned integer with bit size (8, 16, ..., 256)
    Uint(usize),
    /// Boolean
    Bool,
    /// Fixed-size bytes (size 1-32)
    FixedBytes(usize),
    /// UTF-8 string
    String,
    /// Tuple
    Tuple(Vec<ParamType>),
}

impl ParamType {
    /// Whether the encoded form lives in the tail, behind an offset word.
    /// A tuple is dynamic as soon as any field is.
    pub fn is_dynamic(&self) -> bool {
        match self {
            ParamType::String => true,
            ParamType::Tuple(types) => types.iter().any(|t| t.is_dynamic()),
            _ => false,
        }
    }
}

impl Token {
    /// Create a uint256 token
    pub fn uint256(value: U256) -> Self {
        Token::Uint(value)
    }

    /// Create a bytes32 token from a hash
    pub fn bytes32(data: H256) -> Self {
        Token::FixedBytes(data.as_bytes().to_vec())
    }

    /// Create a string token
    pub fn string(s: impl Into<String>) -> Self {
        Token::String(s.into())
    }

    /// Get the type of this token
    pub fn type_of(&self) -> ParamType {
        match self {
            Token::Address(_) => ParamType::Address,
            Token::Uint(_) => ParamType::Uint(256),
            Token::Bool(_) => ParamType::Bool,
            Token::FixedBytes(b) => ParamType::FixedBytes(b.len()),
            Token::String(_) => ParamType::String,
            Token::Tuple(tokens) => ParamType::Tuple(tokens.iter().map(|t| t.type_of()).collect()),
        }
    }
}
