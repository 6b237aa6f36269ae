//! bridgelisten-core: shared records and contracts for cross-chain bridge listeners.
//!
//! # Architecture
//!
//! ```text
//! Height Source → ChainListen::handle_new_block(height)
//!                      └── BlockRecords
//!                            ├── WrapperTransaction  (fee payments on the wrapper contract)
//!                            ├── SrcTransaction      (+ SrcTransfer, source-chain lock)
//!                            ├── PolyTransaction     (relay chain, filled elsewhere)
//!                            └── DstTransaction      (+ DstTransfer, destination-chain unlock)
//! ```

pub mod config;
pub mod error;
pub mod listener;
pub mod types;

pub use config::{ListenConfig, LogConfig, NeoListenConfig, RpcConfig};
pub use error::ListenError;
pub use listener::ChainListen;
pub use types::{
    BlockRecords, DstTransaction, DstTransfer, PolyTransaction, SrcTransaction, SrcTransfer,
    TxState, WrapperTransaction,
};
