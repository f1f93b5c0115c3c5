//! ABI encoding and decoding for the OK Computers contracts
//!
//! This module provides:
//! - Encoding of function calls (selector + head/tail argument frame)
//! - Decoding of function return values, including the dynamic message
//!   tuple that `getMessage` returns
//!
//! # Example
//!
//! ```rust
//! use okcpu_sdk::abi::{decode, encode_function_call, ParamType, Token};
//! use okcpu_sdk::U256;
//!
//! // Encode an ownerOf(uint256) call
//! let data = encode_function_call([0x63, 0x52, 0x21, 0x1e], &[Token::Uint(U256::from(1399))]);
//! assert_eq!(data.len(), 36);
//!
//! // Decode a count response
//! let return_data = [0u8; 32];
//! let count = decode(&[ParamType::Uint(256)], &return_data).unwrap();
//! ```

mod decode;
mod encode;
mod types;

pub use decode::decode;
pub use encode::{encode, encode_function_call};
pub use types::{ParamType, Token};
