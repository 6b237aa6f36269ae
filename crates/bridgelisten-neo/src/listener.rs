//! The Neo listener: per-block extraction of bridge records.
//!
//! For each invocation transaction in a block, every notification of every
//! execution is classified:
//!
//! - wrapper contract, `CrossChainLockEvent` → [`WrapperTransaction`]
//! - proxy contract, `CrossChainLockEvent` → [`SrcTransaction`], with the
//!   transfer taken from the first valid `Lock`/`LockEvent` of the same execution
//! - proxy contract, `CrossChainUnlockEvent` → [`DstTransaction`], with the
//!   transfer taken from the first valid `Unlock`/`UnlockEvent`
//!
//! Malformed notifications are skipped; only the block fetch can fail the call.

use std::time::Duration;

use async_trait::async_trait;

use bridgelisten_core::config::NeoListenConfig;
use bridgelisten_core::error::ListenError;
use bridgelisten_core::listener::ChainListen;
use bridgelisten_core::types::{
    BlockRecords, DstTransaction, DstTransfer, SrcTransaction, SrcTransfer, TxState,
    WrapperTransaction,
};
use bridgelisten_rpc::HttpRpcClient;

use crate::address::{hash_to_address, hex_string_reverse, strip_hex_prefix};
use crate::amount::decode_amount;
use crate::extend::ExtendHeightClient;
use crate::model::{Execution, StackItem};
use crate::notification::{
    CrossChainLock, CrossChainUnlock, Lock, NeoMethod, ParsedNotification, Unlock,
};
use crate::sdk::{NeoClient, NeoSdk};

/// Length of a hex-encoded 20-byte destination address.
const DST_USER_HEX_LEN: usize = 40;

/// Per-transaction values shared by every record it produces.
struct TxContext<'a> {
    hash: &'a str,
    time: u64,
    height: u64,
}

/// Listener for one Neo chain's wrapper and proxy contracts.
pub struct NeoChainListen<C> {
    config: NeoListenConfig,
    client: C,
    extend: ExtendHeightClient,
}

impl NeoChainListen<NeoSdk<HttpRpcClient>> {
    /// Build the HTTP-backed listener described by `config`.
    pub fn from_config(config: NeoListenConfig) -> Result<Self, ListenError> {
        let config = config.validate()?;
        let client = NeoSdk::http(&config.rest_url, &config.rpc)?;
        let extend = ExtendHeightClient::new(
            config.extend_node_url.clone(),
            Duration::from_secs(config.rpc.request_timeout_secs),
        )?;
        Ok(Self::new(config, client, extend))
    }
}

impl<C: NeoClient> NeoChainListen<C> {
    /// `config` is expected to be validated (normalized contract hashes).
    pub fn new(config: NeoListenConfig, client: C, extend: ExtendHeightClient) -> Self {
        Self {
            config,
            client,
            extend,
        }
    }

    pub fn config(&self) -> &NeoListenConfig {
        &self.config
    }

    /// Extract all bridge records from the block at `height`.
    pub async fn handle_new_block(&self, height: u64) -> Result<BlockRecords, ListenError> {
        let block = self.client.get_block_by_index(height).await?;
        let mut records = BlockRecords::default();

        for tx in &block.tx {
            if !tx.is_invocation() {
                continue;
            }
            let app_log = match self.client.get_application_log(&tx.txid).await {
                Ok(log) => log,
                Err(e) => {
                    tracing::warn!(
                        chain = %self.config.chain_name,
                        height,
                        tx_hash = %tx.txid,
                        error = %e,
                        "application log unavailable, skipping transaction"
                    );
                    continue;
                }
            };
            let ctx = TxContext {
                hash: strip_hex_prefix(&tx.txid),
                time: block.time,
                height,
            };
            for execution in &app_log.executions {
                self.extract_execution(&ctx, execution, &mut records);
            }
        }

        tracing::debug!(
            chain = %self.config.chain_name,
            height,
            txs = block.tx.len(),
            wrapper = records.wrapper_transactions.len(),
            src = records.src_transactions.len(),
            dst = records.dst_transactions.len(),
            "block handled"
        );
        Ok(records)
    }

    fn extract_execution(&self, ctx: &TxContext<'_>, execution: &Execution, records: &mut BlockRecords) {
        for notification in &execution.notifications {
            let Some(parsed) = ParsedNotification::classify(notification) else {
                continue;
            };
            if parsed.contract == self.config.wrapper_contract {
                if let Some(tx) = self.wrapper_transaction(ctx, &parsed) {
                    records.wrapper_transactions.push(tx);
                }
            } else if parsed.contract == self.config.proxy_contract {
                match &parsed.method {
                    NeoMethod::CrossChainLock => {
                        if let Some(tx) = self.src_transaction(ctx, execution, &parsed) {
                            records.src_transactions.push(tx);
                        }
                    }
                    NeoMethod::CrossChainUnlock => {
                        if let Some(tx) = self.dst_transaction(ctx, execution, &parsed) {
                            records.dst_transactions.push(tx);
                        }
                    }
                    other => {
                        tracing::warn!(tx_hash = ctx.hash, method = %other, "ignore method");
                    }
                }
            }
        }
    }

    fn wrapper_transaction(
        &self,
        ctx: &TxContext<'_>,
        parsed: &ParsedNotification<'_>,
    ) -> Option<WrapperTransaction> {
        if parsed.method != NeoMethod::CrossChainLock {
            return None;
        }
        tracing::info!(chain = %self.config.chain_name, tx_hash = ctx.hash, "wrapper lock");
        let Some(lock) = parsed.as_wrapper_lock() else {
            tracing::debug!(tx_hash = ctx.hash, fields = parsed.len(), "short wrapper lock, skipped");
            return None;
        };
        // One field stands in for both chain ids and the fee.
        let value = parse_u64(lock.chain_and_fee);
        Some(WrapperTransaction {
            hash: ctx.hash.to_string(),
            user: lock.user.value.clone(),
            src_chain_id: value,
            dst_chain_id: value,
            fee_token_hash: lock.user.value.clone(),
            fee_amount: value,
        })
    }

    fn src_transaction(
        &self,
        ctx: &TxContext<'_>,
        execution: &Execution,
        parsed: &ParsedNotification<'_>,
    ) -> Option<SrcTransaction> {
        tracing::info!(chain = %self.config.chain_name, tx_hash = ctx.hash, "from chain");
        let Some(outer) = parsed.as_cross_chain_lock() else {
            tracing::debug!(tx_hash = ctx.hash, fields = parsed.len(), "short cross-chain lock, skipped");
            return None;
        };

        // First valid lock in emission order; none leaves the transfer empty.
        let transfer = execution
            .notifications
            .iter()
            .filter_map(ParsedNotification::classify)
            .filter_map(|n| n.as_lock())
            .find_map(|lock| self.src_transfer(ctx, &outer, &lock))
            .unwrap_or_default();

        Some(SrcTransaction {
            chain_id: self.config.chain_id,
            hash: ctx.hash.to_string(),
            state: TxState::Pending,
            fee: gas_fee(&execution.gas_consumed),
            time: ctx.time,
            height: ctx.height,
            user: transfer.from.clone(),
            dst_chain_id: parse_i64_wrapping(outer.to_chain_id),
            contract: outer.to_contract.value.clone(),
            key: outer.key.value.clone(),
            param: outer.param.value.clone(),
            src_transfer: transfer,
        })
    }

    fn src_transfer(
        &self,
        ctx: &TxContext<'_>,
        outer: &CrossChainLock<'_>,
        lock: &Lock<'_>,
    ) -> Option<SrcTransfer> {
        if lock.to_user.value.len() != DST_USER_HEX_LEN {
            tracing::debug!(
                tx_hash = ctx.hash,
                len = lock.to_user.value.len(),
                "lock destination user is not a 20-byte address, skipped"
            );
            return None;
        }
        let chain_id = self.config.chain_id;
        let dst_chain_id = parse_u32(lock.to_chain_id);
        Some(SrcTransfer {
            tx_hash: ctx.hash.to_string(),
            from: hash_to_address(chain_id, &lock.from.value),
            to: hash_to_address(chain_id, &outer.to_contract.value),
            asset: hex_string_reverse(&lock.asset.value),
            amount: decode_amount(lock.amount),
            dst_chain_id,
            dst_user: hash_to_address(dst_chain_id, &lock.to_user.value),
            dst_asset: lock.to_asset.value.clone(),
        })
    }

    fn dst_transaction(
        &self,
        ctx: &TxContext<'_>,
        execution: &Execution,
        parsed: &ParsedNotification<'_>,
    ) -> Option<DstTransaction> {
        tracing::info!(chain = %self.config.chain_name, tx_hash = ctx.hash, "to chain");
        let Some(outer) = parsed.as_cross_chain_unlock() else {
            tracing::debug!(tx_hash = ctx.hash, fields = parsed.len(), "short cross-chain unlock, skipped");
            return None;
        };

        let transfer = execution
            .notifications
            .iter()
            .filter_map(ParsedNotification::classify)
            .find_map(|n| n.as_unlock().map(|unlock| self.dst_transfer(ctx, &outer, &unlock)))
            .unwrap_or_default();

        Some(DstTransaction {
            chain_id: self.config.chain_id,
            hash: ctx.hash.to_string(),
            state: TxState::Pending,
            fee: gas_fee(&execution.gas_consumed),
            time: ctx.time,
            height: ctx.height,
            src_chain_id: parse_u32(outer.from_chain_id),
            contract: hex_string_reverse(&outer.to_contract.value),
            poly_hash: hex_string_reverse(&outer.poly_tx_hash.value),
            dst_transfer: transfer,
        })
    }

    fn dst_transfer(
        &self,
        ctx: &TxContext<'_>,
        outer: &CrossChainUnlock<'_>,
        unlock: &Unlock<'_>,
    ) -> DstTransfer {
        let chain_id = self.config.chain_id;
        DstTransfer {
            tx_hash: ctx.hash.to_string(),
            from: hash_to_address(chain_id, &outer.to_contract.value),
            to: hash_to_address(chain_id, &unlock.to.value),
            asset: hex_string_reverse(&unlock.asset.value),
            amount: decode_amount(unlock.amount),
        }
    }
}

#[async_trait]
impl<C: NeoClient> ChainListen for NeoChainListen<C> {
    async fn latest_height(&self) -> Result<u64, ListenError> {
        self.client.get_latest_height().await
    }

    async fn extend_latest_height(&self) -> Result<u64, ListenError> {
        self.extend.latest_height().await
    }

    async fn handle_new_block(&self, height: u64) -> Result<BlockRecords, ListenError> {
        NeoChainListen::handle_new_block(self, height).await
    }

    fn backward_block_number(&self) -> u64 {
        self.config.backward_block_number
    }

    fn listen_slot(&self) -> u64 {
        self.config.listen_slot
    }

    fn chain_id(&self) -> u64 {
        self.config.chain_id
    }

    fn chain_name(&self) -> &str {
        &self.config.chain_name
    }
}

/// Gas consumed is decimal GAS; the fee keeps only its integer part.
fn gas_fee(gas_consumed: &str) -> u64 {
    gas_consumed.trim().parse::<f64>().map(|gas| gas as u64).unwrap_or(0)
}

fn parse_u64(item: &StackItem) -> u64 {
    item.value.trim().parse().unwrap_or(0)
}

/// Signed 64-bit text reinterpreted as unsigned; `-1` becomes `u64::MAX`.
fn parse_i64_wrapping(item: &StackItem) -> u64 {
    item.value.trim().parse::<i64>().map(|v| v as u64).unwrap_or(0)
}

fn parse_u32(item: &StackItem) -> u64 {
    item.value.trim().parse::<u32>().map(u64::from).unwrap_or(0)
}
