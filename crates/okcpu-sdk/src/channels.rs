//! Channel addressing
//!
//! A channel is a logical message stream (or keyed string slot) in the
//! storage contract, addressed by the keccak-256 hash of its name. The
//! contract itself has no notion of channel names; the flat keccak
//! keyspace is the whole namespace, and these helpers are the only
//! place names turn into keys.

use okcpu_crypto::keccak256;
use okcpu_primitives::{H256, TokenId};

/// Well-known public channels and what they hold
pub const CHANNELS: [(&str, &str); 7] = [
    ("board", "Main message board - public posts visible to all"),
    ("gm", "Good morning channel - daily GM posts"),
    ("ok", "OK channel - short affirmations"),
    ("suggest", "Suggestions channel - feature requests and ideas"),
    ("page", "Webpage storage - HTML for {tokenId}.okcomputers.eth.limo"),
    ("username", "Display name storage"),
    ("announcement", "Global announcements (read-only for most)"),
];

/// Message channels aggregated by network stats. `page` and `username`
/// are keyed string slots, not message streams, so they are excluded.
pub const STATS_CHANNELS: [&str; 5] = ["board", "gm", "ok", "suggest", "announcement"];

/// Storage key for a channel name.
///
/// The raw UTF-8 bytes are hashed directly, with no ABI length prefix
/// or padding, matching `keccak256(abi.encodePacked(name))` on the
/// contract side. Names are case-sensitive: "board" and "Board" are
/// different channels.
pub fn channel_key(name: &str) -> H256 {
    keccak256(name.as_bytes())
}

/// Name of the direct-message channel for a recipient token.
///
/// This is a naming convention, not a contract-enforced namespace:
/// both sides derive the same name, and nothing stops a third party
/// from posting into it.
pub fn email_channel(token_id: TokenId) -> String {
    format!("email_{token_id}")
}
