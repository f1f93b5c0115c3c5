//! EIP-55 address checksumming

use crate::hash::keccak256;
use okcpu_primitives::Address;

/// Render an address in EIP-55 mixed-case checksum form.
///
/// The 40 lowercase hex digits are hashed as ASCII; digit `i` is
/// uppercased when nibble `i` of that hash is 8 or more. Wallets and
/// explorers verify this casing, so every address that leaves the
/// client goes through here.
pub fn to_checksum_address(address: &Address) -> String {
    let hex_addr = hex::encode(address.as_bytes());
    let digest = keccak256(hex_addr.as_bytes());

    let mut out = String::with_capacity(42);
    out.push_str("0x");
    for (i, c) in hex_addr.chars().enumerate() {
        let nibble = if i % 2 == 0 {
            digest.as_bytes()[i / 2] >> 4
        } else {
            digest.as_bytes()[i / 2] & 0x0f
        };
        if nibble >= 8 {
            out.push(c.to_ascii_uppercase());
        } else {
            out.push(c);
        }
    }
    out
}
