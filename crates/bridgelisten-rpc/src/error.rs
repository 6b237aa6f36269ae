//! Transport errors.

use thiserror::Error;

use crate::request::NodeError;

#[derive(Debug, Error)]
pub enum TransportError {
    /// The request never got a response (DNS, refused, reset).
    #[error("connection error: {0}")]
    Connect(String),

    #[error("unexpected HTTP status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("request timed out after {ms}ms")]
    Timeout { ms: u64 },

    /// The node answered with a JSON-RPC error object.
    #[error("node error: {0}")]
    Node(NodeError),

    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl TransportError {
    /// Worth sending the same request again.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Timeout { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 429,
            Self::Node(_) | Self::Decode(_) => false,
        }
    }

    pub fn is_node_error(&self) -> bool {
        matches!(self, Self::Node(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_classification() {
        assert!(TransportError::Connect("connection reset".into()).is_retryable());
        assert!(TransportError::Timeout { ms: 30_000 }.is_retryable());
        assert!(TransportError::Status { status: 502, body: String::new() }.is_retryable());
        assert!(TransportError::Status { status: 429, body: String::new() }.is_retryable());
        assert!(!TransportError::Status { status: 404, body: String::new() }.is_retryable());

        let node = TransportError::Node(NodeError {
            code: -100,
            message: "Unknown block".into(),
            data: None,
        });
        assert!(!node.is_retryable());
        assert!(node.is_node_error());
        assert_eq!(node.to_string(), "node error: Unknown block (code -100)");
    }
}
