//! Error types for the listener pipeline.

use thiserror::Error;

/// Errors surfaced to the caller of a listener.
///
/// Only block-level failures reach this type; malformed notifications and
/// per-transaction log fetch failures are absorbed by the extractor.
#[derive(Debug, Error)]
pub enum ListenError {
    #[error("RPC error: {0}")]
    Rpc(String),

    #[error("Block {height} not found")]
    BlockNotFound { height: u64 },

    #[error("response status code: {status}")]
    HttpStatus { status: u16 },

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl ListenError {
    /// Returns `true` if retrying the same call may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Rpc(_) | Self::Http(_) | Self::HttpStatus { .. } | Self::BlockNotFound { .. }
        )
    }
}

impl From<serde_json::Error> for ListenError {
    fn from(e: serde_json::Error) -> Self {
        Self::Decode(e.to_string())
    }
}
