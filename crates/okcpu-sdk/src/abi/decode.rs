//! ABI decoding
//!
//! Return data from `eth_call` is untrusted input. Every offset and
//! length word is range-checked against its frame before use, so a
//! truncated or hostile buffer decodes to a `Decode` error rather than
//! a panic or an out-of-bounds read.

use okcpu_primitives::{Address, U256};

use super::types::{ParamType, Token};
use crate::SdkError;

/// Decode ABI-encoded return data into typed tokens
pub fn decode(types: &[ParamType], data: &[u8]) -> Result<Vec<Token>, SdkError> {
    let mut offset = 0;
    let mut tokens = Vec::with_capacity(types.len());

    for param_type in types {
        let (token, consumed) = decode_token(param_type, data, offset)?;
        tokens.push(token);
        offset += consumed;
    }

    Ok(tokens)
}

/// Decode one token whose head sits at `offset` within `frame`.
///
/// `frame` is the enclosing encoded block: per the ABI spec, offsets
/// stored in dynamic heads count from the start of the frame they occur
/// in, not from the start of the whole buffer. A dynamic tuple therefore
/// recurses with its own sub-frame.
fn decode_token(
    param_type: &ParamType,
    frame: &[u8],
    offset: usize,
) -> Result<(Token, usize), SdkError> {
    match param_type {
        ParamType::Address => {
            let word = word_at(frame, offset)?;
            let mut addr_bytes = [0u8; 20];
            addr_bytes.copy_from_slice(&word[12..32]);
            Ok((Token::Address(Address::from_bytes(addr_bytes)), 32))
        }
        ParamType::Uint(_) => {
            let word = word_at(frame, offset)?;
            Ok((Token::Uint(U256::from_big_endian(word)), 32))
        }
        ParamType::Bool => {
            let word = word_at(frame, offset)?;
            Ok((Token::Bool(word[31] != 0), 32))
        }
        ParamType::FixedBytes(size) => {
            let word = word_at(frame, offset)?;
            let len = (*size).min(32);
            Ok((Token::FixedBytes(word[..len].to_vec()), 32))
        }
        ParamType::String => {
            let data_offset = index_at(frame, offset)?;
            let s = decode_str(frame, data_offset)?;
            Ok((Token::String(s), 32))
        }
        ParamType::Tuple(types) if param_type.is_dynamic() => {
            let data_offset = index_at(frame, offset)?;
            let inner_frame = &frame[data_offset..];

            let mut tokens = Vec::with_capacity(types.len());
            let mut inner_offset = 0;
            for inner_type in types {
                let (token, consumed) = decode_token(inner_type, inner_frame, inner_offset)?;
                tokens.push(token);
                inner_offset += consumed;
            }

            Ok((Token::Tuple(tokens), 32))
        }
        ParamType::Tuple(types) => {
            // Static tuple: fields are inlined in the current frame
            let mut tokens = Vec::with_capacity(types.len());
            let mut inner_offset = offset;
            for inner_type in types {
                let (token, consumed) = decode_token(inner_type, frame, inner_offset)?;
                tokens.push(token);
                inner_offset += consumed;
            }

            Ok((Token::Tuple(tokens), inner_offset - offset))
        }
    }
}

/// Decode a string whose length word sits at `at` within `frame`
fn decode_str(frame: &[u8], at: usize) -> Result<String, SdkError> {
    let len = index_at(frame, at)?;
    let start = at + 32;
    if frame.len() < start + len {
        return Err(SdkError::Decode(format!(
            "string payload runs past the buffer: need {} bytes, have {}",
            start + len,
            frame.len()
        )));
    }
    let s = std::str::from_utf8(&frame[start..start + len])
        .map_err(|e| SdkError::Decode(format!("invalid UTF-8 in string: {}", e)))?;
    Ok(s.to_owned())
}

/// Borrow the 32-byte word at `offset`
fn word_at(frame: &[u8], offset: usize) -> Result<&[u8], SdkError> {
    if frame.len() < offset + 32 {
        return Err(SdkError::Decode(format!(
            "insufficient return data: need {} bytes, have {}",
            offset + 32,
            frame.len()
        )));
    }
    Ok(&frame[offset..offset + 32])
}

/// Read the word at `offset` as an offset or length. Anything larger
/// than the frame itself is rejected before narrowing to usize, so a
/// hostile word cannot wrap or panic.
fn index_at(frame: &[u8], offset: usize) -> Result<usize, SdkError> {
    let value = U256::from_big_endian(word_at(frame, offset)?);
    if value > U256::from(frame.len()) {
        return Err(SdkError::Decode(format!(
            "offset or length {} outside {}-byte frame",
            value,
            frame.len()
        )));
    }
    Ok(value.as_usize())
}
