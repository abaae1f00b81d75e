//! Minimal Ethereum JSON-RPC client.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::errors::LedgerError;

#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    result: Option<Value>,
    error: Option<JsonRpcError>,
}

#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

pub struct RpcClient {
    client: Client,
    url: String,
    next_id: AtomicU64,
}

impl RpcClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            url: url.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub async fn call(&self, method: &str, params: Value) -> Result<Value, LedgerError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let payload = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params,
            "id": id
        });
        debug!("JSON-RPC {} (id {}) -> {}", method, id, self.url);

        let response = self
            .client
            .post(&self.url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| LedgerError::Transport(format!("{}: {}", method, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LedgerError::Transport(format!(
                "{}: HTTP {}",
                method,
                status.as_u16()
            )));
        }

        let body: JsonRpcResponse = response
            .json()
            .await
            .map_err(|e| LedgerError::MalformedResponse(format!("{}: {}", method, e)))?;

        if let Some(err) = body.error {
            return Err(LedgerError::Rpc {
                code: err.code,
                message: err.message,
            });
        }

        body.result
            .ok_or_else(|| LedgerError::MalformedResponse(format!("{}: no result", method)))
    }

    pub async fn chain_id(&self) -> Result<u64, LedgerError> {
        let value = self.call("eth_chainId", json!([])).await?;
        to_u64(parse_quantity(&value)?)
    }

    /// Nonce for the next transaction, counting ones still in the mempool.
    pub async fn transaction_count(&self, address: &str) -> Result<u64, LedgerError> {
        let value = self
            .call("eth_getTransactionCount", json!([address, "pending"]))
            .await?;
        to_u64(parse_quantity(&value)?)
    }

    pub async fn gas_price(&self) -> Result<u128, LedgerError> {
        let value = self.call("eth_gasPrice", json!([])).await?;
        parse_quantity(&value)
    }

    /// Returns the transaction hash reported by the node.
    pub async fn send_raw_transaction(&self, raw_hex: &str) -> Result<String, LedgerError> {
        let value = self
            .call("eth_sendRawTransaction", json!([raw_hex]))
            .await?;
        value.as_str().map(str::to_string).ok_or_else(|| {
            LedgerError::MalformedResponse(format!("expected tx hash string, got {}", value))
        })
    }
}

/// Parses a hex `QUANTITY` such as `"0x1a"`.
pub fn parse_quantity(value: &Value) -> Result<u128, LedgerError> {
    let text = value
        .as_str()
        .ok_or_else(|| LedgerError::MalformedResponse(format!("expected hex string, got {}", value)))?;
    let digits = text
        .strip_prefix("0x")
        .ok_or_else(|| LedgerError::MalformedResponse(format!("missing 0x prefix: {}", text)))?;
    if digits.is_empty() {
        return Err(LedgerError::MalformedResponse(format!("empty quantity: {}", text)));
    }
    u128::from_str_radix(digits, 16)
        .map_err(|e| LedgerError::MalformedResponse(format!("{}: {}", text, e)))
}

fn to_u64(value: u128) -> Result<u64, LedgerError> {
    u64::try_from(value)
        .map_err(|_| LedgerError::MalformedResponse(format!("quantity {} out of range", value)))
}
