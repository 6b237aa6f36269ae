//! bridgelisten-rpc: JSON-RPC over HTTP for node clients.
//!
//! Node clients are written against [`RpcTransport`]; [`HttpRpcClient`] is the
//! production implementation, retrying transient failures per [`RetryConfig`].

pub mod client;
pub mod error;
pub mod request;
pub mod retry;
pub mod transport;

pub use client::{HttpClientConfig, HttpRpcClient};
pub use error::TransportError;
pub use request::{JsonRpcRequest, JsonRpcResponse, NodeError};
pub use retry::RetryConfig;
pub use transport::RpcTransport;
