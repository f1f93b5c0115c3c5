//! Transport layer for contract reads
//!
//! Every read the client performs is a single `eth_call`, so the trait
//! boundary is exactly that: contract address plus calldata in, raw hex
//! result out. Writes never touch a transport; they only produce
//! descriptors.

use async_trait::async_trait;
use okcpu_primitives::Address;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::SdkError;

/// Read-only contract call transport (object-safe)
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute an `eth_call` against `to` with the given calldata and
    /// return the node's hex `result` string
    async fn call(&self, to: &Address, data: &[u8]) -> Result<String, SdkError>;
}

/// Mock transport for testing, keyed by exact calldata.
///
/// Unprimed calls answer with a revert, which is also what a real node
/// reports for an out-of-range message index.
pub struct MockTransport {
    responses: Arc<Mutex<HashMap<String, Result<String, (i64, String)>>>>,
}

impl MockTransport {
    /// Create an empty mock transport
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn key(to: &Address, data: &[u8]) -> String {
        format!("{}:0x{}", to.to_hex(), hex::encode(data))
    }

    /// Prime a successful response for one exact calldata
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned (only possible if another thread
    /// panicked while holding the lock).
    pub fn set_response(&self, to: &Address, data: &[u8], result: &str) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(Self::key(to, data), Ok(result.to_string()));
    }

    /// Prime an RPC error for one exact calldata
    ///
    /// # Panics
    ///
    /// Panics if the mutex is poisoned.
    pub fn set_error(&self, to: &Address, data: &[u8], code: i64, message: &str) {
        self.responses
            .lock()
            .expect("MockTransport mutex poisoned")
            .insert(Self::key(to, data), Err((code, message.to_string())));
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn call(&self, to: &Address, data: &[u8]) -> Result<String, SdkError> {
        let primed = self
            .responses
            .lock()
            .map_err(|_| SdkError::Transport("MockTransport mutex poisoned".to_string()))?
            .get(&Self::key(to, data))
            .cloned();

        match primed {
            Some(Ok(result)) => Ok(result),
            Some(Err((code, message))) => Err(SdkError::Rpc { code, message }),
            None => Err(SdkError::Rpc {
                code: 3,
                message: "execution reverted".to_string(),
            }),
        }
    }
}

/// HTTP transport speaking JSON-RPC to a Base node
#[cfg(feature = "http")]
pub struct HttpTransport {
    client: reqwest::Client,
    url: String,
    request_id: std::sync::atomic::AtomicU64,
}

#[cfg(feature = "http")]
impl HttpTransport {
    /// Per-request timeout; Base public endpoints can be slow under load
    const REQUEST_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(15);

    /// Create a new HTTP transport against an RPC endpoint URL
    pub fn new(url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            url: url.to_string(),
            request_id: std::sync::atomic::AtomicU64::new(1),
        }
    }

    fn next_id(&self) -> u64 {
        self.request_id
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst)
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl Transport for HttpTransport {
    async fn call(&self, to: &Address, data: &[u8]) -> Result<String, SdkError> {
        let request = serde_json::json!({
            "jsonrpc": "2.0",
            "id": self.next_id(),
            "method": "eth_call",
            "params": [
                {
                    "to": to.to_hex(),
                    "data": format!("0x{}", hex::encode(data)),
                },
                "latest",
            ],
        });

        let response = self
            .client
            .post(&self.url)
            .timeout(Self::REQUEST_TIMEOUT)
            .json(&request)
            .send()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        let response: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| SdkError::Transport(e.to_string()))?;

        if let Some(error) = response.error {
            return Err(SdkError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| SdkError::Rpc {
            code: -32603,
            message: "No result in response".to_string(),
        })
    }
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcResponse {
    result: Option<String>,
    error: Option<JsonRpcError>,
}

#[cfg(feature = "http")]
#[derive(serde::Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> Address {
        Address::from_hex("0x04d7c8b512d5455e20df1e808f12cad1e3d766e5").unwrap()
    }

    #[tokio::test]
    async fn test_mock_transport_primed_response() {
        let transport = MockTransport::new();
        let calldata = [0xa7, 0x81, 0xa5, 0x55];
        transport.set_response(&storage(), &calldata, "0x0000");

        let result = transport.call(&storage(), &calldata).await.unwrap();
        assert_eq!(result, "0x0000");
    }

    #[tokio::test]
    async fn test_mock_transport_unprimed_reverts() {
        let transport = MockTransport::new();
        let result = transport.call(&storage(), &[0x00]).await;
        match result {
            Err(SdkError::Rpc { code: 3, .. }) => {}
            other => panic!("Expected revert, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_mock_transport_keyed_by_contract() {
        let transport = MockTransport::new();
        let nft = Address::from_hex("0xce2830932889c7fb5e5206287c43554e673dcc88").unwrap();
        let calldata = [0x63, 0x52, 0x21, 0x1e];
        transport.set_response(&nft, &calldata, "0x01");

        // Same calldata against a different contract stays unprimed
        assert!(transport.call(&nft, &calldata).await.is_ok());
        assert!(transport.call(&storage(), &calldata).await.is_err());
    }

    #[tokio::test]
    async fn test_mock_transport_primed_error() {
        let transport = MockTransport::new();
        let calldata = [0xde, 0xb8, 0xa4, 0x61];
        transport.set_error(&storage(), &calldata, -32000, "header not found");

        match transport.call(&storage(), &calldata).await {
            Err(SdkError::Rpc { code, message }) => {
                assert_eq!(code, -32000);
                assert_eq!(message, "header not found");
            }
            other => panic!("Expected Rpc error, got {:?}", other),
        }
    }
}
