//! OkComputer client: reads via `eth_call`, writes as unsigned
//! descriptors

use bytes::Bytes;
use futures::future::join_all;
use okcpu_primitives::{Address, TokenId, U256};
use tracing::{debug, warn};

use crate::abi::{self, ParamType, Token};
use crate::channels::{channel_key, email_channel, STATS_CHANNELS};
use crate::selectors::{Func, SelectorTable};
use crate::transport::Transport;
use crate::types::{ChannelEntry, Message, NetworkStats, TxDescriptor};
use crate::SdkError;

#[cfg(feature = "http")]
use crate::transport::HttpTransport;

/// OK Computers NFT contract on Base (ERC-721; `ownerOf` lives here).
/// `0xCE2830932889C7fB5e5206287C43554E673DCc88`
pub const NFT_CONTRACT: Address = Address::from_bytes([
    0xce, 0x28, 0x30, 0x93, 0x28, 0x89, 0xc7, 0xfb, 0x5e, 0x52, 0x06, 0x28, 0x7c, 0x43, 0x55,
    0x4e, 0x67, 0x3d, 0xcc, 0x88,
]);

/// Message and keyed-string storage contract on Base; every operation
/// except `ownerOf` targets this address.
/// `0x04D7C8b512D5455e20df1E808f12caD1e3d766E5`
pub const STORAGE_CONTRACT: Address = Address::from_bytes([
    0x04, 0xd7, 0xc8, 0xb5, 0x12, 0xd5, 0x45, 0x5e, 0x20, 0xdf, 0x1e, 0x80, 0x8f, 0x12, 0xca,
    0xd1, 0xe3, 0xd7, 0x66, 0xe5,
]);

/// Base mainnet chain id; every descriptor pins it
pub const CHAIN_ID: u64 = 8453;

/// Public Base RPC endpoint used when no URL is configured
pub const DEFAULT_RPC_URL: &str = "https://mainnet.base.org";

/// Hard cap on stored page and data payloads, in bytes
pub const MAX_PAGE_BYTES: usize = 65_536;

/// Hard cap on usernames, in characters (not bytes)
pub const MAX_USERNAME_CHARS: usize = 16;

/// Client bound to one OK Computer token.
///
/// Reads go through the injected [`Transport`]; writes never touch the
/// network and return [`TxDescriptor`]s for an external signer.
pub struct OkComputer {
    token_id: TokenId,
    selectors: SelectorTable,
    transport: Box<dyn Transport>,
}

impl OkComputer {
    /// Create a client against the default public Base endpoint
    #[cfg(feature = "http")]
    pub fn new(token_id: TokenId) -> Self {
        Self::with_url(token_id, DEFAULT_RPC_URL)
    }

    /// Create a client against a custom RPC endpoint
    #[cfg(feature = "http")]
    pub fn with_url(token_id: TokenId, url: &str) -> Self {
        Self::with_transport(token_id, HttpTransport::new(url))
    }

    /// Create a client with a custom transport (tests use a mock here)
    pub fn with_transport(token_id: TokenId, transport: impl Transport + 'static) -> Self {
        Self {
            token_id,
            selectors: SelectorTable::new(),
            transport: Box::new(transport),
        }
    }

    /// Token this client acts as
    pub fn token_id(&self) -> TokenId {
        self.token_id
    }

    // ==================== Plumbing ====================

    async fn eth_call(&self, to: &Address, data: Vec<u8>) -> Result<Vec<u8>, SdkError> {
        debug!(to = %to, calldata_len = data.len(), "eth_call");
        let result = self.transport.call(to, &data).await?;
        parse_hex_bytes(&result)
    }

    async fn call_decoded(
        &self,
        to: &Address,
        func: Func,
        args: &[Token],
        outputs: &[ParamType],
    ) -> Result<Vec<Token>, SdkError> {
        let data = abi::encode_function_call(self.selectors.get(func), args);
        let raw = self.eth_call(to, data).await?;
        abi::decode(outputs, &raw)
    }

    // ==================== Reads ====================

    /// Owner wallet of this client's token
    pub async fn owner(&self) -> Result<Address, SdkError> {
        self.owner_of(self.token_id).await
    }

    /// Owner wallet of an arbitrary token
    pub async fn owner_of(&self, token_id: TokenId) -> Result<Address, SdkError> {
        let tokens = self
            .call_decoded(
                &NFT_CONTRACT,
                Func::OwnerOf,
                &[Token::Uint(U256::from(token_id))],
                &[ParamType::Address],
            )
            .await?;
        expect_address(tokens)
    }

    /// Number of messages ever posted to a channel
    pub async fn message_count(&self, channel: &str) -> Result<u64, SdkError> {
        let tokens = self
            .call_decoded(
                &STORAGE_CONTRACT,
                Func::GetMessageCount,
                &[Token::bytes32(channel_key(channel))],
                &[ParamType::Uint(256)],
            )
            .await?;
        to_u64(expect_uint(tokens)?)
    }

    /// One message by channel-local index. Out-of-range indices revert
    /// on the contract and surface as [`SdkError::Rpc`].
    pub async fn message_at(&self, channel: &str, index: u64) -> Result<Message, SdkError> {
        let tokens = self
            .call_decoded(
                &STORAGE_CONTRACT,
                Func::GetMessage,
                &[
                    Token::bytes32(channel_key(channel)),
                    Token::Uint(U256::from(index)),
                ],
                &[message_param_type()],
            )
            .await?;
        into_message(tokens, index)
    }

    /// Last `count` messages of a channel, oldest first.
    ///
    /// Message fetches run concurrently. A slot that fails to fetch or
    /// decode becomes a [`ChannelEntry::Failed`] placeholder instead of
    /// poisoning the page, so the result always covers the full window.
    /// Only the initial count lookup can fail the whole call.
    pub async fn read_channel(
        &self,
        channel: &str,
        count: u64,
    ) -> Result<Vec<ChannelEntry>, SdkError> {
        let total = self.message_count(channel).await?;
        let start = total.saturating_sub(count);

        let fetches = (start..total)
            .map(|index| async move { (index, self.message_at(channel, index).await) });

        let mut page = Vec::with_capacity((total - start) as usize);
        for (index, result) in join_all(fetches).await {
            match result {
                Ok(message) => page.push(ChannelEntry::Message(message)),
                Err(error) => {
                    warn!(channel, index, %error, "message slot failed");
                    page.push(ChannelEntry::Failed {
                        index,
                        error: error.to_string(),
                    });
                }
            }
        }
        Ok(page)
    }

    /// Last `count` posts on the main board
    pub async fn read_board(&self, count: u64) -> Result<Vec<ChannelEntry>, SdkError> {
        self.read_channel("board", count).await
    }

    /// Last `count` posts on the gm channel
    pub async fn read_gm(&self, count: u64) -> Result<Vec<ChannelEntry>, SdkError> {
        self.read_channel("gm", count).await
    }

    /// Last `count` emails addressed to this client's token
    pub async fn read_emails(&self, count: u64) -> Result<Vec<ChannelEntry>, SdkError> {
        let channel = email_channel(self.token_id);
        self.read_channel(&channel, count).await
    }

    /// Keyed string slot for a token; unset slots read back as ""
    pub async fn string_record(&self, channel: &str, token_id: TokenId) -> Result<String, SdkError> {
        let tokens = self
            .call_decoded(
                &STORAGE_CONTRACT,
                Func::GetStringOrDefault,
                &[
                    Token::Uint(U256::from(token_id)),
                    Token::bytes32(channel_key(channel)),
                    Token::string(""),
                ],
                &[ParamType::String],
            )
            .await?;
        expect_string(tokens)
    }

    /// Stored page HTML of this client's token
    pub async fn read_page(&self) -> Result<String, SdkError> {
        self.page_of(self.token_id).await
    }

    /// Stored page HTML of an arbitrary token
    pub async fn page_of(&self, token_id: TokenId) -> Result<String, SdkError> {
        self.string_record("page", token_id).await
    }

    /// Display name of this client's token
    pub async fn read_username(&self) -> Result<String, SdkError> {
        self.username_of(self.token_id).await
    }

    /// Display name of an arbitrary token
    pub async fn username_of(&self, token_id: TokenId) -> Result<String, SdkError> {
        self.string_record("username", token_id).await
    }

    /// Whether this client's token has data under a key
    pub async fn has_data(&self, key_name: &str) -> Result<bool, SdkError> {
        let tokens = self
            .call_decoded(
                &STORAGE_CONTRACT,
                Func::HasData,
                &[
                    Token::Uint(U256::from(self.token_id)),
                    Token::bytes32(channel_key(key_name)),
                ],
                &[ParamType::Bool],
            )
            .await?;
        expect_bool(tokens)
    }

    /// Message counts across the public channels.
    ///
    /// Always returns a complete map: a channel whose lookup fails is
    /// reported as 0, so one flaky call cannot hide the rest.
    pub async fn network_stats(&self) -> NetworkStats {
        let mut stats = NetworkStats::default();
        for channel in STATS_CHANNELS {
            let count = match self.message_count(channel).await {
                Ok(count) => count,
                Err(error) => {
                    warn!(channel, %error, "stats lookup failed, reporting 0");
                    0
                }
            };
            stats.push(channel, count);
        }
        stats
    }

    // ==================== Writes ====================

    fn descriptor(&self, data: Vec<u8>) -> TxDescriptor {
        TxDescriptor {
            to: STORAGE_CONTRACT,
            data: Bytes::from(data),
            chain_id: CHAIN_ID,
        }
    }

    fn store_string(&self, channel: &str, value: &str) -> TxDescriptor {
        let data = abi::encode_function_call(
            self.selectors.get(Func::StoreString),
            &[
                Token::Uint(U256::from(self.token_id)),
                Token::bytes32(channel_key(channel)),
                Token::string(value),
            ],
        );
        self.descriptor(data)
    }

    /// Build a descriptor posting `text` to a channel.
    ///
    /// The trailing argument word is the timestamp override; 0 tells
    /// the contract to stamp block time.
    pub fn post_message(&self, channel: &str, text: &str) -> TxDescriptor {
        let data = abi::encode_function_call(
            self.selectors.get(Func::SubmitMessage),
            &[
                Token::Uint(U256::from(self.token_id)),
                Token::bytes32(channel_key(channel)),
                Token::string(text),
                Token::Uint(U256::zero()),
            ],
        );
        self.descriptor(data)
    }

    /// Build a descriptor replacing this token's page HTML.
    /// Rejects payloads over [`MAX_PAGE_BYTES`] before encoding.
    pub fn set_page(&self, html: &str) -> Result<TxDescriptor, SdkError> {
        if html.len() > MAX_PAGE_BYTES {
            return Err(SdkError::Validation(format!(
                "page HTML is {} bytes, limit is {}",
                html.len(),
                MAX_PAGE_BYTES
            )));
        }
        Ok(self.store_string("page", html))
    }

    /// Build a descriptor setting this token's display name.
    /// The limit counts characters, not bytes, so multibyte names get
    /// the full [`MAX_USERNAME_CHARS`].
    pub fn set_username(&self, name: &str) -> Result<TxDescriptor, SdkError> {
        let chars = name.chars().count();
        if chars > MAX_USERNAME_CHARS {
            return Err(SdkError::Validation(format!(
                "username is {} characters, limit is {}",
                chars, MAX_USERNAME_CHARS
            )));
        }
        Ok(self.store_string("username", name))
    }

    /// Build a descriptor sending a direct message to another token,
    /// by posting into that token's email channel
    pub fn send_email(&self, to_token: TokenId, text: &str) -> TxDescriptor {
        self.post_message(&email_channel(to_token), text)
    }

    /// Build a descriptor storing a free-form string under a custom key
    pub fn store_data(&self, key_name: &str, value: &str) -> Result<TxDescriptor, SdkError> {
        if value.len() > MAX_PAGE_BYTES {
            return Err(SdkError::Validation(format!(
                "data for key '{}' is {} bytes, limit is {}",
                key_name,
                value.len(),
                MAX_PAGE_BYTES
            )));
        }
        Ok(self.store_string(key_name, value))
    }

    /// Build a descriptor clearing this token's slot under a key
    pub fn remove_data(&self, key_name: &str) -> TxDescriptor {
        let data = abi::encode_function_call(
            self.selectors.get(Func::RemoveData),
            &[
                Token::Uint(U256::from(self.token_id)),
                Token::bytes32(channel_key(key_name)),
            ],
        );
        self.descriptor(data)
    }
}

/// Wire layout of the stored message record
fn message_param_type() -> ParamType {
    ParamType::Tuple(vec![
        ParamType::FixedBytes(32),
        ParamType::Uint(256),
        ParamType::Uint(256),
        ParamType::Address,
        ParamType::Uint(256),
        ParamType::String,
    ])
}

/// Build a [`Message`] from a decoded record, attaching the index the
/// caller queried. The key field is dropped; it is implied by the query.
fn into_message(tokens: Vec<Token>, index: u64) -> Result<Message, SdkError> {
    let fields = match tokens.into_iter().next() {
        Some(Token::Tuple(fields)) => fields,
        other => {
            return Err(SdkError::Decode(format!(
                "expected message tuple, got {:?}",
                other
            )))
        }
    };

    let mut it = fields.into_iter();
    match (
        it.next(),
        it.next(),
        it.next(),
        it.next(),
        it.next(),
        it.next(),
    ) {
        (
            Some(Token::FixedBytes(_key)),
            Some(Token::Uint(token_id)),
            Some(Token::Uint(timestamp)),
            Some(Token::Address(sender)),
            Some(Token::Uint(metadata)),
            Some(Token::String(text)),
        ) => Ok(Message {
            index,
            token_id,
            timestamp,
            sender,
            metadata,
            text,
        }),
        _ => Err(SdkError::Decode(
            "unexpected message tuple shape".to_string(),
        )),
    }
}

fn expect_address(tokens: Vec<Token>) -> Result<Address, SdkError> {
    match tokens.as_slice() {
        [Token::Address(addr)] => Ok(*addr),
        other => Err(SdkError::Decode(format!(
            "expected one address, got {:?}",
            other
        ))),
    }
}

fn expect_uint(tokens: Vec<Token>) -> Result<U256, SdkError> {
    match tokens.as_slice() {
        [Token::Uint(value)] => Ok(*value),
        other => Err(SdkError::Decode(format!(
            "expected one uint, got {:?}",
            other
        ))),
    }
}

fn expect_bool(tokens: Vec<Token>) -> Result<bool, SdkError> {
    match tokens.as_slice() {
        [Token::Bool(value)] => Ok(*value),
        other => Err(SdkError::Decode(format!(
            "expected one bool, got {:?}",
            other
        ))),
    }
}

fn expect_string(tokens: Vec<Token>) -> Result<String, SdkError> {
    let mut it = tokens.into_iter();
    match (it.next(), it.next()) {
        (Some(Token::String(s)), None) => Ok(s),
        (other, _) => Err(SdkError::Decode(format!(
            "expected one string, got {:?}",
            other
        ))),
    }
}

/// Narrow a count word to u64; contract counts always fit, anything
/// larger is treated as malformed return data
fn to_u64(value: U256) -> Result<u64, SdkError> {
    if value > U256::from(u64::MAX) {
        return Err(SdkError::Decode(format!("count {} exceeds u64", value)));
    }
    Ok(value.low_u64())
}

fn parse_hex_bytes(s: &str) -> Result<Vec<u8>, SdkError> {
    let s = s.strip_prefix("0x").unwrap_or(s);
    if s.is_empty() {
        return Ok(Vec::new());
    }
    Ok(hex::decode(s)?)
}
