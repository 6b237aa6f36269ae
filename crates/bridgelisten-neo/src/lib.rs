//! bridgelisten-neo: Neo block fetcher and bridge event extractor.
//!
//! Per block: fetch the block, fetch each invocation transaction's
//! application log, classify every notification by method name and emitting
//! contract, correlate proxy lock/unlock events with their same-execution
//! transfer sub-events, and assemble [`BlockRecords`](bridgelisten_core::BlockRecords).

pub mod address;
pub mod amount;
pub mod extend;
pub mod listener;
pub mod model;
pub mod notification;
pub mod sdk;

pub use extend::ExtendHeightClient;
pub use listener::NeoChainListen;
pub use model::{ApplicationLog, Block, Execution, Notification, StackItem, Transaction};
pub use notification::{NeoMethod, ParsedNotification};
pub use sdk::{NeoClient, NeoSdk};
