//! ABI encoding

use okcpu_primitives::U256;

use super::types::{ParamType, Token};

/// Encode tokens according to the Solidity ABI specification
pub fn encode(tokens: &[Token]) -> Vec<u8> {
    encode_params(tokens)
}

/// Encode a function call (selector + params)
pub fn encode_function_call(selector: [u8; 4], tokens: &[Token]) -> Vec<u8> {
    let mut result = selector.to_vec();
    result.extend(encode(tokens));
    result
}

/// Encode a parameter list as one head/tail frame. Dynamic values leave
/// an offset word in the head; the offset counts bytes from the start of
/// this frame, not from the start of the whole buffer.
fn encode_params(tokens: &[Token]) -> Vec<u8> {
    let head_size: usize = tokens.iter().map(|t| head_length(&t.type_of())).sum();

    let mut head = Vec::new();
    let mut tail = Vec::new();

    for token in tokens {
        if token.type_of().is_dynamic() {
            let offset = head_size + tail.len();
            head.extend(encode_u256(&U256::from(offset)));
            tail.extend(encode_token(token));
        } else {
            head.extend(encode_token(token));
        }
    }

    head.extend(tail);
    head
}

/// Head size for a type: one word, except static tuples which inline
fn head_length(param_type: &ParamType) -> usize {
    match param_type {
        ParamType::Tuple(types) if !param_type.is_dynamic() => {
            types.iter().map(head_length).sum()
        }
        _ => 32,
    }
}

/// Encode a single token (without its head offset word)
fn encode_token(token: &Token) -> Vec<u8> {
    match token {
        Token::Address(addr) => {
            let mut buf = [0u8; 32];
            buf[12..32].copy_from_slice(addr.as_bytes());
            buf.to_vec()
        }
        Token::Uint(value) => encode_u256(value),
        Token::Bool(b) => {
            let mut buf = [0u8; 32];
            buf[31] = u8::from(*b);
            buf.to_vec()
        }
        Token::FixedBytes(data) => {
            let mut buf = [0u8; 32];
            let len = data.len().min(32);
            buf[..len].copy_from_slice(&data[..len]);
            buf.to_vec()
        }
        Token::String(s) => encode_str_bytes(s.as_bytes()),
        // A tuple is its own frame, so offsets inside it restart at zero
        Token::Tuple(tokens) => encode_params(tokens),
    }
}

/// Encode a U256 as a 32-byte big-endian word
fn encode_u256(value: &U256) -> Vec<u8> {
    let mut bytes = [0u8; 32];
    value.to_big_endian(&mut bytes);
    bytes.to_vec()
}

/// Encode string payload bytes: length word, then data zero-padded to a
/// word boundary
fn encode_str_bytes(data: &[u8]) -> Vec<u8> {
    let mut result = encode_u256(&U256::from(data.len()));

    let padded_len = data.len().div_ceil(32) * 32;
    let mut padded = vec![0u8; padded_len];
    padded[..data.len()].copy_from_slice(data);
    result.extend(padded);

    result
}
