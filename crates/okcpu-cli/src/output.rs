//! Output formatting

use chrono::{TimeZone, Utc};
use okcpu_sdk::ChannelEntry;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Output builder for formatted CLI output
pub struct Output {
    json_mode: bool,
    fields: HashMap<String, Value>,
    message: Option<String>,
}

impl Output {
    /// Create a new output builder
    pub fn new(json_mode: bool) -> Self {
        Self {
            json_mode,
            fields: HashMap::new(),
            message: None,
        }
    }

    /// Add a string field to the output
    pub fn field(mut self, key: &str, value: &str) -> Self {
        self.fields.insert(key.to_string(), Value::String(value.to_string()));
        self
    }

    /// Add a u64 field to the output
    pub fn field_u64(mut self, key: &str, value: u64) -> Self {
        self.fields.insert(key.to_string(), Value::Number(value.into()));
        self
    }

    /// Add a JSON value field to the output
    pub fn field_value(mut self, key: &str, value: Value) -> Self {
        self.fields.insert(key.to_string(), value);
        self
    }

    /// Set the human-readable message
    pub fn message(mut self, msg: &str) -> Self {
        self.message = Some(msg.to_string());
        self
    }

    /// Print the output
    pub fn print(self) {
        if self.json_mode {
            let json = json!(self.fields);
            println!("{}", serde_json::to_string_pretty(&json).unwrap_or_default());
        } else if let Some(msg) = self.message {
            println!("{}", msg);
        }
    }
}

/// Render one channel entry for human output.
///
/// Messages print a header line with the posting computer and the UTC
/// time, then the text. Failed slots keep their position visible.
pub fn render_entry(entry: &ChannelEntry) -> String {
    match entry {
        ChannelEntry::Message(message) => format!(
            "OKCPU #{} | {}\n{}",
            message.token_id,
            render_timestamp(message.unix_time()),
            message.text
        ),
        ChannelEntry::Failed { index, error } => format!("[#{}] Error: {}", index, error),
    }
}

fn render_timestamp(secs: u64) -> String {
    i64::try_from(secs)
        .ok()
        .and_then(|s| Utc.timestamp_opt(s, 0).single())
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| format!("t={}", secs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use okcpu_sdk::{Address, Message, U256};

    fn message(token_id: u64, timestamp: u64, text: &str) -> ChannelEntry {
        ChannelEntry::Message(Message {
            index: 0,
            token_id: U256::from(token_id),
            timestamp: U256::from(timestamp),
            sender: Address::default(),
            metadata: U256::zero(),
            text: text.to_string(),
        })
    }

    #[test]
    fn test_render_message() {
        let rendered = render_entry(&message(77, 1_738_600_000, "gm onchain"));
        assert_eq!(rendered, "OKCPU #77 | 2025-02-03 16:26:40 UTC\ngm onchain");
    }

    #[test]
    fn test_render_failed_slot() {
        let entry = ChannelEntry::Failed {
            index: 3,
            error: "RPC error: 3 - execution reverted".to_string(),
        };
        assert_eq!(
            render_entry(&entry),
            "[#3] Error: RPC error: 3 - execution reverted"
        );
    }

    #[test]
    fn test_render_timestamp_out_of_range() {
        // Timestamps past i64 range fall back to the raw number
        assert_eq!(render_timestamp(u64::MAX), format!("t={}", u64::MAX));
    }
}
