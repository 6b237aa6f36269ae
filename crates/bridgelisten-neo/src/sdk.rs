//! Height Source: block and application-log access over the node's JSON-RPC.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use bridgelisten_core::config::RpcConfig;
use bridgelisten_core::error::ListenError;
use bridgelisten_rpc::{HttpClientConfig, HttpRpcClient, RetryConfig, RpcTransport};

use crate::model::{ApplicationLog, Block};

/// Trait for fetching Neo chain data.
#[async_trait]
pub trait NeoClient: Send + Sync {
    /// Height of the newest block.
    async fn get_latest_height(&self) -> Result<u64, ListenError>;

    async fn get_block_by_index(&self, height: u64) -> Result<Block, ListenError>;

    async fn get_application_log(&self, txid: &str) -> Result<ApplicationLog, ListenError>;
}

/// `NeoClient` over any JSON-RPC transport.
pub struct NeoSdk<T> {
    transport: T,
    next_id: AtomicU64,
}

impl<T: RpcTransport> NeoSdk<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            next_id: AtomicU64::new(1),
        }
    }

    async fn call<R: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<R, ListenError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.transport
            .call(id, method, params)
            .await
            .map_err(|e| ListenError::Rpc(format!("{method}: {e}")))
    }
}

impl NeoSdk<HttpRpcClient> {
    /// HTTP client for `url` tuned by `[neo.rpc]`.
    pub fn http(url: &str, rpc: &RpcConfig) -> Result<Self, ListenError> {
        let config = HttpClientConfig {
            retry: RetryConfig {
                max_retries: rpc.max_retries,
                initial_backoff: Duration::from_millis(rpc.initial_backoff_ms),
                ..Default::default()
            },
            request_timeout: Duration::from_secs(rpc.request_timeout_secs),
        };
        let client = HttpRpcClient::new(url, config).map_err(|e| ListenError::Rpc(e.to_string()))?;
        Ok(Self::new(client))
    }
}

#[async_trait]
impl<T: RpcTransport> NeoClient for NeoSdk<T> {
    async fn get_latest_height(&self) -> Result<u64, ListenError> {
        let count: u64 = self.call("getblockcount", vec![]).await?;
        Ok(count.saturating_sub(1))
    }

    async fn get_block_by_index(&self, height: u64) -> Result<Block, ListenError> {
        let raw: Value = self.call("getblock", vec![json!(height), json!(1)]).await?;
        if raw.is_null() {
            return Err(ListenError::BlockNotFound { height });
        }
        Ok(serde_json::from_value(raw)?)
    }

    async fn get_application_log(&self, txid: &str) -> Result<ApplicationLog, ListenError> {
        self.call("getapplicationlog", vec![json!(txid)]).await
    }
}
