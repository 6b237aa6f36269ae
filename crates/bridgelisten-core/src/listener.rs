//! The `ChainListen` trait: what the polling controller drives per chain.

use async_trait::async_trait;

use crate::error::ListenError;
use crate::types::BlockRecords;

/// A listener for one chain's bridge contracts.
///
/// Implementations hold only immutable configuration, so calling
/// [`handle_new_block`](ChainListen::handle_new_block) twice for the same
/// height over the same chain data yields identical records. Height
/// advancement (monotonic, gap-free) is the caller's job.
#[async_trait]
pub trait ChainListen: Send + Sync {
    /// Latest height reported by the chain's own node.
    async fn latest_height(&self) -> Result<u64, ListenError>;

    /// Latest height reported by the auxiliary explorer endpoint.
    async fn extend_latest_height(&self) -> Result<u64, ListenError>;

    /// Extract all bridge records from the block at `height`.
    async fn handle_new_block(&self, height: u64) -> Result<BlockRecords, ListenError>;

    /// How many blocks behind the head the controller re-scans.
    fn backward_block_number(&self) -> u64;

    /// Polling interval in seconds.
    fn listen_slot(&self) -> u64;

    fn chain_id(&self) -> u64;

    fn chain_name(&self) -> &str;
}
