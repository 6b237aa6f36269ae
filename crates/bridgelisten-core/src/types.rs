//! Records produced per block and handed to the persistence layer.

use serde::{Deserialize, Serialize};

// ─── TxState ──────────────────────────────────────────────────────────────────

/// Lifecycle state of a cross-chain transaction, stored as its numeric code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum TxState {
    Finished,
    /// Freshly observed on a chain; every extracted record starts here.
    #[default]
    Pending,
    SourceDone,
    SourceConfirmed,
    PolyConfirmed,
    DestinationDone,
}

impl From<TxState> for u8 {
    fn from(s: TxState) -> u8 {
        match s {
            TxState::Finished => 0,
            TxState::Pending => 1,
            TxState::SourceDone => 2,
            TxState::SourceConfirmed => 3,
            TxState::PolyConfirmed => 4,
            TxState::DestinationDone => 5,
        }
    }
}

impl TryFrom<u8> for TxState {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Ok(match code {
            0 => Self::Finished,
            1 => Self::Pending,
            2 => Self::SourceDone,
            3 => Self::SourceConfirmed,
            4 => Self::PolyConfirmed,
            5 => Self::DestinationDone,
            other => return Err(format!("unknown transaction state {other}")),
        })
    }
}

// ─── Wrapper ──────────────────────────────────────────────────────────────────

/// A fee-paying lock observed on the wrapper contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WrapperTransaction {
    /// Transaction hash without the `0x` prefix.
    pub hash: String,
    pub user: String,
    pub src_chain_id: u64,
    pub dst_chain_id: u64,
    pub fee_token_hash: String,
    pub fee_amount: u64,
}

// ─── Source side ──────────────────────────────────────────────────────────────

/// Asset movement that accompanies a source-chain lock.
///
/// Left at its default value when no matching lock notification is found.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcTransfer {
    pub tx_hash: String,
    pub from: String,
    pub to: String,
    pub asset: String,
    pub amount: u64,
    pub dst_chain_id: u64,
    pub dst_user: String,
    pub dst_asset: String,
}

/// A cross-chain lock observed on the source chain's proxy contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SrcTransaction {
    pub chain_id: u64,
    pub hash: String,
    pub state: TxState,
    pub fee: u64,
    pub time: u64,
    pub height: u64,
    pub user: String,
    pub dst_chain_id: u64,
    pub contract: String,
    pub key: String,
    pub param: String,
    pub src_transfer: SrcTransfer,
}

// ─── Relay ────────────────────────────────────────────────────────────────────

/// A relay-chain transaction linking a source and a destination transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolyTransaction {
    pub hash: String,
    pub chain_id: u64,
    pub state: TxState,
    pub time: u64,
    pub fee: u64,
    pub height: u64,
    pub src_chain_id: u64,
    pub src_hash: String,
    pub dst_chain_id: u64,
}

// ─── Destination side ─────────────────────────────────────────────────────────

/// Asset movement that accompanies a destination-chain unlock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstTransfer {
    pub tx_hash: String,
    pub from: String,
    pub to: String,
    pub asset: String,
    pub amount: u64,
}

/// A cross-chain unlock observed on the destination chain's proxy contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DstTransaction {
    pub chain_id: u64,
    pub hash: String,
    pub state: TxState,
    pub fee: u64,
    pub time: u64,
    pub height: u64,
    pub src_chain_id: u64,
    pub contract: String,
    pub poly_hash: String,
    pub dst_transfer: DstTransfer,
}

// ─── BlockRecords ─────────────────────────────────────────────────────────────

/// Everything extracted from one block, in notification order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecords {
    pub wrapper_transactions: Vec<WrapperTransaction>,
    pub src_transactions: Vec<SrcTransaction>,
    pub poly_transactions: Vec<PolyTransaction>,
    pub dst_transactions: Vec<DstTransaction>,
}

impl BlockRecords {
    /// Total number of records across all four sequences.
    pub fn len(&self) -> usize {
        self.wrapper_transactions.len()
            + self.src_transactions.len()
            + self.poly_transactions.len()
            + self.dst_transactions.len()
    }

    /// Returns `true` if the block produced no records at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn state_serializes_as_code() {
        let tx = SrcTransaction {
            hash: "ab".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&tx).unwrap();
        assert_eq!(json["state"], 1);
        assert_eq!(json["src_transfer"]["amount"], 0);
    }

    #[test]
    fn state_rejects_unknown_code() {
        let err = serde_json::from_str::<TxState>("9").unwrap_err();
        assert!(err.to_string().contains("unknown transaction state 9"));
        assert_eq!(serde_json::from_str::<TxState>("4").unwrap(), TxState::PolyConfirmed);
    }

    #[test]
    fn block_records_len() {
        let mut records = BlockRecords::default();
        assert!(records.is_empty());
        records.wrapper_transactions.push(WrapperTransaction::default());
        records.dst_transactions.push(DstTransaction::default());
        assert_eq!(records.len(), 2);
        assert!(!records.is_empty());
    }
}
