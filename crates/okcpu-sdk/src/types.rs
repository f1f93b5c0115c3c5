//! SDK types

use bytes::Bytes;
use okcpu_crypto::to_checksum_address;
use okcpu_primitives::{Address, U256};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::Serialize;

/// One message decoded from the storage contract.
///
/// The wire record is the 6-field tuple
/// `(bytes32 key, uint256 tokenId, uint256 timestamp, address sender,
/// uint256 metadata, string text)`; the channel key is implied by the
/// query, so the client keeps the channel-local index instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    /// Zero-based index within the channel
    pub index: u64,
    /// Token that posted the message
    pub token_id: U256,
    /// Unix seconds, stamped by the contract at inclusion time
    pub timestamp: U256,
    /// Wallet that sent the transaction
    pub sender: Address,
    /// Application-defined metadata word, 0 for plain posts
    pub metadata: U256,
    /// Message text
    pub text: String,
}

impl Message {
    /// Timestamp as unix seconds, saturating at `u64::MAX`. Contract
    /// timestamps are block times and always fit; the clamp only guards
    /// against a hostile record.
    pub fn unix_time(&self) -> u64 {
        if self.timestamp > U256::from(u64::MAX) {
            u64::MAX
        } else {
            self.timestamp.low_u64()
        }
    }
}

// U256 fields serialize as decimal strings so token ids and timestamps
// survive JSON number precision limits; the sender goes out checksummed.
impl Serialize for Message {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("Message", 6)?;
        s.serialize_field("index", &self.index)?;
        s.serialize_field("token_id", &self.token_id.to_string())?;
        s.serialize_field("timestamp", &self.timestamp.to_string())?;
        s.serialize_field("sender", &to_checksum_address(&self.sender))?;
        s.serialize_field("metadata", &self.metadata.to_string())?;
        s.serialize_field("text", &self.text)?;
        s.end()
    }
}

/// One slot of a channel page.
///
/// A page is returned in full even when individual slots fail to fetch
/// or decode: failing slots are kept as placeholders so the caller can
/// still see which indices they cover.
#[derive(Debug, Clone)]
pub enum ChannelEntry {
    /// Successfully decoded message
    Message(Message),
    /// Slot that could not be fetched or decoded
    Failed {
        /// Index the slot covers
        index: u64,
        /// What went wrong, as reported by the failing layer
        error: String,
    },
}

impl ChannelEntry {
    /// Channel-local index this entry covers
    pub fn index(&self) -> u64 {
        match self {
            ChannelEntry::Message(message) => message.index,
            ChannelEntry::Failed { index, .. } => *index,
        }
    }

    /// The decoded message, if this slot succeeded
    pub fn message(&self) -> Option<&Message> {
        match self {
            ChannelEntry::Message(message) => Some(message),
            ChannelEntry::Failed { .. } => None,
        }
    }

    /// Whether this slot failed
    pub fn is_failed(&self) -> bool {
        matches!(self, ChannelEntry::Failed { .. })
    }
}

impl Serialize for ChannelEntry {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            ChannelEntry::Message(message) => message.serialize(serializer),
            ChannelEntry::Failed { index, error } => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("index", index)?;
                map.serialize_entry("error", error)?;
                map.end()
            }
        }
    }
}

/// Message counts for the fixed public channels, in stats order.
///
/// Always complete: a channel whose count lookup failed is reported as
/// 0 rather than dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NetworkStats {
    counts: Vec<(&'static str, u64)>,
}

impl NetworkStats {
    pub(crate) fn push(&mut self, channel: &'static str, count: u64) {
        self.counts.push((channel, count));
    }

    /// Count for one channel, if it is a stats channel
    pub fn get(&self, channel: &str) -> Option<u64> {
        self.counts
            .iter()
            .find(|(name, _)| *name == channel)
            .map(|(_, count)| *count)
    }

    /// Iterate channels in stats order
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, u64)> + '_ {
        self.counts.iter().copied()
    }

    /// Number of channels reported
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether any channel is reported
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all channel counts
    pub fn total(&self) -> u64 {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}

impl Serialize for NetworkStats {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (channel, count) in &self.counts {
            map.serialize_entry(channel, count)?;
        }
        map.end()
    }
}

/// Unsigned call descriptor, ready to hand to an external signer.
///
/// The client never signs, estimates gas, or broadcasts; a descriptor
/// is the entire output of a write operation. It serializes to the
/// exact shape the relay expects:
/// `{"to": "0x..", "data": "0x..", "value": "0", "chainId": 8453}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxDescriptor {
    /// Contract to call
    pub to: Address,
    /// ABI-encoded calldata
    pub data: Bytes,
    /// Chain the call is valid on
    pub chain_id: u64,
}

impl TxDescriptor {
    /// Calldata as 0x-prefixed hex
    pub fn data_hex(&self) -> String {
        format!("0x{}", hex::encode(&self.data))
    }
}

impl Serialize for TxDescriptor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut s = serializer.serialize_struct("TxDescriptor", 4)?;
        s.serialize_field("to", &to_checksum_address(&self.to))?;
        s.serialize_field("data", &self.data_hex())?;
        // No operation ever moves native value
        s.serialize_field("value", "0")?;
        s.serialize_field("chainId", &self.chain_id)?;
        s.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_message() -> Message {
        Message {
            index: 41,
            token_id: U256::from(1399),
            timestamp: U256::from(1_738_600_000u64),
            sender: Address::from_hex("0x5aaeb6053f3e94c9b9a09f33669435e7ef1beaed").unwrap(),
            metadata: U256::zero(),
            text: "gm".to_string(),
        }
    }

    #[test]
    fn test_message_serialize_shape() {
        let json = serde_json::to_value(sample_message()).unwrap();
        assert_eq!(json["index"], 41);
        assert_eq!(json["token_id"], "1399");
        assert_eq!(json["timestamp"], "1738600000");
        assert_eq!(json["sender"], "0x5aAeb6053F3E94C9b9A09f33669435E7Ef1BeAed");
        assert_eq!(json["metadata"], "0");
        assert_eq!(json["text"], "gm");
    }

    #[test]
    fn test_message_unix_time() {
        assert_eq!(sample_message().unix_time(), 1_738_600_000);

        let mut hostile = sample_message();
        hostile.timestamp = U256::MAX;
        assert_eq!(hostile.unix_time(), u64::MAX);
    }

    #[test]
    fn test_channel_entry_accessors() {
        let ok = ChannelEntry::Message(sample_message());
        assert_eq!(ok.index(), 41);
        assert!(!ok.is_failed());
        assert!(ok.message().is_some());

        let failed = ChannelEntry::Failed {
            index: 7,
            error: "RPC error: 3 - execution reverted".to_string(),
        };
        assert_eq!(failed.index(), 7);
        assert!(failed.is_failed());
        assert!(failed.message().is_none());
    }

    #[test]
    fn test_channel_entry_failed_serialize() {
        let failed = ChannelEntry::Failed {
            index: 7,
            error: "boom".to_string(),
        };
        let json = serde_json::to_value(&failed).unwrap();
        assert_eq!(json, serde_json::json!({"index": 7, "error": "boom"}));
    }

    #[test]
    fn test_network_stats_order_and_total() {
        let mut stats = NetworkStats::default();
        stats.push("board", 120);
        stats.push("gm", 15);
        stats.push("ok", 0);

        let order: Vec<&str> = stats.iter().map(|(name, _)| name).collect();
        assert_eq!(order, vec!["board", "gm", "ok"]);
        assert_eq!(stats.get("gm"), Some(15));
        assert_eq!(stats.get("page"), None);
        assert_eq!(stats.total(), 135);
        assert_eq!(stats.len(), 3);
        assert!(!stats.is_empty());
    }

    #[test]
    fn test_network_stats_serialize() {
        let mut stats = NetworkStats::default();
        stats.push("board", 2);
        stats.push("gm", 0);
        let json = serde_json::to_value(&stats).unwrap();
        assert_eq!(json, serde_json::json!({"board": 2, "gm": 0}));
    }

    #[test]
    fn test_descriptor_serialize_exact_shape() {
        let descriptor = TxDescriptor {
            to: Address::from_hex("0x04d7c8b512d5455e20df1e808f12cad1e3d766e5").unwrap(),
            data: Bytes::from(vec![0x3b, 0x80, 0xa7, 0x4a]),
            chain_id: 8453,
        };

        // Field order is part of the wire shape
        let json = serde_json::to_string(&descriptor).unwrap();
        assert_eq!(
            json,
            "{\"to\":\"0x04D7C8b512D5455e20df1E808f12caD1e3d766E5\",\
             \"data\":\"0x3b80a74a\",\"value\":\"0\",\"chainId\":8453}"
        );
    }

    #[test]
    fn test_descriptor_data_hex() {
        let descriptor = TxDescriptor {
            to: Address::ZERO,
            data: Bytes::from(vec![0xde, 0xb8, 0xa4, 0x61, 0x00]),
            chain_id: 8453,
        };
        assert_eq!(descriptor.data_hex(), "0xdeb8a46100");
    }
}
