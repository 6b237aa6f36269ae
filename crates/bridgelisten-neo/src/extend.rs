//! Height reported by an auxiliary explorer endpoint.

use std::time::Duration;

use serde::Deserialize;

use bridgelisten_core::error::ListenError;

use crate::model::loose_string;

#[derive(Debug, Deserialize)]
struct ExtendHeight {
    #[serde(deserialize_with = "loose_string")]
    last_block_height: String,
}

/// One GET per query, no retries; the caller decides what to do on error.
pub struct ExtendHeightClient {
    url: String,
    http: reqwest::Client,
}

impl ExtendHeightClient {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, ListenError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ListenError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            url: url.into(),
            http,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetch `last_block_height` from the endpoint.
    pub async fn latest_height(&self) -> Result<u64, ListenError> {
        let resp = self
            .http
            .get(&self.url)
            .header("Accepts", "application/json")
            .send()
            .await
            .map_err(|e| ListenError::Http(e.to_string()))?;

        let status = resp.status();
        if status != reqwest::StatusCode::OK {
            return Err(ListenError::HttpStatus {
                status: status.as_u16(),
            });
        }

        let body = resp
            .bytes()
            .await
            .map_err(|e| ListenError::Http(e.to_string()))?;
        let height: ExtendHeight = serde_json::from_slice(&body)?;
        height
            .last_block_height
            .trim()
            .parse::<u64>()
            .map_err(|e| {
                ListenError::Decode(format!(
                    "last_block_height {:?}: {e}",
                    height.last_block_height
                ))
            })
    }
}
