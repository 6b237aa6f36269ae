//! `reqwest` transport for a single node endpoint.
//!
//! Connection failures, timeouts, 5xx and 429 replies are retried with
//! doubling backoff. A JSON-RPC error from the node is final.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::TransportError;
use crate::request::{JsonRpcRequest, JsonRpcResponse};
use crate::retry::RetryConfig;
use crate::transport::RpcTransport;

#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    pub retry: RetryConfig,
    /// Whole-request deadline, connect included.
    pub request_timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            retry: RetryConfig::default(),
            request_timeout: Duration::from_secs(30),
        }
    }
}

pub struct HttpRpcClient {
    url: String,
    http: reqwest::Client,
    config: HttpClientConfig,
}

impl HttpRpcClient {
    pub fn new(url: impl Into<String>, config: HttpClientConfig) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| TransportError::Connect(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url: url.into(),
            http,
            config,
        })
    }

    fn classify(&self, e: reqwest::Error) -> TransportError {
        if e.is_timeout() {
            TransportError::Timeout {
                ms: self.config.request_timeout.as_millis() as u64,
            }
        } else {
            TransportError::Connect(e.to_string())
        }
    }

    async fn post(&self, req: &JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let resp = self
            .http
            .post(&self.url)
            .json(req)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TransportError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body = resp.bytes().await.map_err(|e| self.classify(e))?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl RpcTransport for HttpRpcClient {
    async fn send(&self, req: JsonRpcRequest) -> Result<JsonRpcResponse, TransportError> {
        let mut delays = self.config.retry.delays();
        let mut attempt = 1u32;
        loop {
            let err = match self.post(&req).await {
                Err(e) if e.is_retryable() => e,
                other => return other,
            };
            let Some(delay) = delays.next() else {
                tracing::error!(url = %self.url, method = %req.method, attempt, error = %err, "giving up");
                return Err(err);
            };
            tracing::warn!(
                url = %self.url,
                method = %req.method,
                attempt,
                delay_ms = delay.as_millis() as u64,
                error = %err,
                "request failed, retrying"
            );
            tokio::time::sleep(delay).await;
            attempt += 1;
        }
    }

    fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn quick(max_retries: u32) -> HttpClientConfig {
        HttpClientConfig {
            retry: RetryConfig {
                max_retries,
                initial_backoff: Duration::from_millis(1),
                max_backoff: Duration::from_millis(5),
            },
            request_timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn posts_request_and_parses_result() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"method":"getblockcount","params":[]}"#.into(),
            ))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"jsonrpc":"2.0","id":1,"result":120}"#)
            .create_async()
            .await;

        let client = HttpRpcClient::new(server.url(), quick(0)).unwrap();
        let count: u64 = client.call(1, "getblockcount", vec![]).await.unwrap();
        assert_eq!(count, 120);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn retries_server_errors() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(502)
            .with_body("bad gateway")
            .expect(3)
            .create_async()
            .await;

        let client = HttpRpcClient::new(server.url(), quick(2)).unwrap();
        let err = client
            .send(JsonRpcRequest::new(1, "getblockcount", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Status { status: 502, .. }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_errors_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(404)
            .expect(1)
            .create_async()
            .await;

        let client = HttpRpcClient::new(server.url(), quick(3)).unwrap();
        let err = client
            .send(JsonRpcRequest::new(1, "getblockcount", vec![]))
            .await
            .unwrap_err();
        assert!(!err.is_retryable());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn node_error_not_retried() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body(r#"{"jsonrpc":"2.0","id":1,"error":{"code":-100,"message":"Unknown block"}}"#)
            .expect(1)
            .create_async()
            .await;

        let client = HttpRpcClient::new(server.url(), quick(3)).unwrap();
        let err = client
            .call::<Value>(1, "getblock", vec![Value::from(1u64), Value::from(1)])
            .await
            .unwrap_err();
        assert!(err.is_node_error());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn garbage_body_is_decode_error() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/")
            .with_status(200)
            .with_body("<html>")
            .create_async()
            .await;

        let client = HttpRpcClient::new(server.url(), quick(3)).unwrap();
        let err = client
            .send(JsonRpcRequest::new(1, "getblockcount", vec![]))
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::Decode(_)));
    }
}
