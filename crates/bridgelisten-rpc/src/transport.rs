//! The seam between node clients and the wire.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};

/// Something that can carry a JSON-RPC request to a node.
///
/// Implementors provide [`send`](RpcTransport::send); typed calls go through
/// [`call`](RpcTransport::call).
#[async_trait]
pub trait RpcTransport: Send + Sync {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError>;

    /// Endpoint this transport talks to, for logs.
    fn url(&self) -> &str;

    /// Invoke `method` and decode its result into `R`.
    async fn call<R: DeserializeOwned>(
        &self,
        id: u64,
        method: &str,
        params: Vec<Value>,
    ) -> Result<R, TransportError>
    where
        Self: Sized,
    {
        let resp = self.send(JsonRpcRequest::new(id, method, params)).await?;
        let result = resp.into_result().map_err(TransportError::Node)?;
        Ok(serde_json::from_value(result)?)
    }
}
