//! JSON-RPC transport for the ledger node, plus the confirmation-depth wait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use artchain_types::U256;

use crate::wire::TxReceipt;
use crate::LedgerError;

/// Default timeout for a single RPC round trip.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

/// Default connection timeout.
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to wait for transaction finality and how deep "final" is.
///
/// A submission that is broadcast but not yet `depth` blocks deep is never
/// reported as committed; exceeding `timeout` surfaces as
/// [`LedgerError::ConfirmationTimeout`], a distinct error from plain
/// unavailability.
#[derive(Clone, Copy, Debug)]
pub struct ConfirmationPolicy {
    /// Number of confirmations (1 = mined in the current head block).
    pub depth: u64,
    /// Upper bound on the whole wait.
    pub timeout: Duration,
    /// Receipt polling cadence.
    pub poll_interval: Duration,
}

impl Default for ConfirmationPolicy {
    fn default() -> Self {
        Self {
            depth: 1,
            timeout: Duration::from_secs(90),
            poll_interval: Duration::from_secs(2),
        }
    }
}

#[derive(Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct RpcResponse<R> {
    result: Option<R>,
    error: Option<RpcErrorObject>,
}

#[derive(Deserialize)]
struct RpcErrorObject {
    #[allow(dead_code)]
    code: i64,
    message: String,
}

/// JSON-RPC 2.0 client over a pooled reqwest connection.
pub struct JsonRpcClient {
    http: reqwest::Client,
    endpoint: String,
    next_id: AtomicU64,
}

impl JsonRpcClient {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self::with_timeout(endpoint, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Self {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .connect_timeout(DEFAULT_CONNECT_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            endpoint: endpoint.into(),
            next_id: AtomicU64::new(1),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Perform one JSON-RPC call.
    ///
    /// Transport failures classify as [`LedgerError::Unavailable`]; an error
    /// object from the node classifies through
    /// [`LedgerError::from_rejection`] so revert reasons keep their meaning.
    pub async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Value,
    ) -> Result<R, LedgerError> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: self.next_id.fetch_add(1, Ordering::Relaxed),
            method,
            params,
        };

        let response = self
            .http
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LedgerError::Unavailable(format!("request timed out: {e}"))
                } else if e.is_connect() {
                    LedgerError::Unavailable(format!("connection failed: {e}"))
                } else {
                    LedgerError::Unavailable(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            return Err(LedgerError::Unavailable(format!(
                "HTTP status {}",
                response.status()
            )));
        }

        let envelope: RpcResponse<Value> = response.json().await.map_err(|e| {
            LedgerError::InvalidResponse(format!("failed to parse RPC response: {e}"))
        })?;

        if let Some(err) = envelope.error {
            return Err(LedgerError::from_rejection(err.message));
        }

        // A null result is legitimate (pending receipt, unknown record), so
        // deserialize through Value rather than requiring presence.
        serde_json::from_value(envelope.result.unwrap_or(Value::Null))
            .map_err(|e| LedgerError::InvalidResponse(format!("unexpected result shape: {e}")))
    }

    /// Fetch a transaction receipt; `None` while the transaction is pending.
    pub async fn get_receipt(&self, tx_hash: &str) -> Result<Option<TxReceipt>, LedgerError> {
        self.call("art_getTransactionReceipt", serde_json::json!([tx_hash]))
            .await
    }

    /// Current head block number.
    pub async fn block_number(&self) -> Result<U256, LedgerError> {
        self.call("art_blockNumber", serde_json::json!([])).await
    }

    /// Block until `tx_hash` is `policy.depth` blocks deep, the transaction
    /// reverts, or the policy timeout elapses.
    pub async fn wait_for_confirmation(
        &self,
        tx_hash: &str,
        policy: &ConfirmationPolicy,
    ) -> Result<TxReceipt, LedgerError> {
        let started = Instant::now();
        loop {
            if let Some(receipt) = self.get_receipt(tx_hash).await? {
                if !receipt.succeeded() {
                    let reason = receipt
                        .revert_reason
                        .clone()
                        .unwrap_or_else(|| "transaction reverted".into());
                    return Err(LedgerError::from_rejection(reason));
                }

                let head = self.block_number().await?;
                let confirmations = head.saturating_sub(receipt.block_number) + U256::one();
                if confirmations >= U256::from(policy.depth) {
                    return Ok(receipt);
                }
            }

            if started.elapsed() >= policy.timeout {
                tracing::warn!(tx_hash, "transaction confirmation timed out");
                return Err(LedgerError::ConfirmationTimeout {
                    tx_hash: tx_hash.to_string(),
                    waited_secs: started.elapsed().as_secs(),
                });
            }

            tokio::time::sleep(policy.poll_interval).await;
        }
    }
}
