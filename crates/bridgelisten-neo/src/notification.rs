//! Notification classification and typed per-method views.
//!
//! A notification's first field is its method name (hex-encoded UTF-8); the
//! rest are positional. Each recognized method gets a view that can only be
//! built when the notification carries enough fields, so the extractor never
//! indexes out of bounds.

use bridgelisten_core::config::normalize_hash;

use crate::model::{Notification, StackItem};

pub const CROSS_CHAIN_LOCK_EVENT: &str = "CrossChainLockEvent";
pub const CROSS_CHAIN_UNLOCK_EVENT: &str = "CrossChainUnlockEvent";
pub const LOCK: &str = "Lock";
pub const LOCK_EVENT: &str = "LockEvent";
pub const UNLOCK: &str = "Unlock";
pub const UNLOCK_EVENT: &str = "UnlockEvent";

/// Recognized method identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NeoMethod {
    CrossChainLock,
    CrossChainUnlock,
    /// `Lock` or `LockEvent`.
    Lock,
    /// `Unlock` or `UnlockEvent`.
    Unlock,
    Other(String),
}

impl NeoMethod {
    pub fn from_name(name: &str) -> Self {
        match name {
            CROSS_CHAIN_LOCK_EVENT => Self::CrossChainLock,
            CROSS_CHAIN_UNLOCK_EVENT => Self::CrossChainUnlock,
            LOCK | LOCK_EVENT => Self::Lock,
            UNLOCK | UNLOCK_EVENT => Self::Unlock,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::CrossChainLock => CROSS_CHAIN_LOCK_EVENT,
            Self::CrossChainUnlock => CROSS_CHAIN_UNLOCK_EVENT,
            Self::Lock => LOCK,
            Self::Unlock => UNLOCK,
            Self::Other(name) => name,
        }
    }
}

impl std::fmt::Display for NeoMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Decode a hex method field to text. Undecodable hex yields `""`.
pub fn parse_method(value: &str) -> String {
    hex::decode(value)
        .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
        .unwrap_or_default()
}

/// A notification with its method decoded and its contract normalized.
#[derive(Debug, Clone)]
pub struct ParsedNotification<'a> {
    /// Emitting contract as bare lowercase hex.
    pub contract: String,
    pub method: NeoMethod,
    fields: &'a [StackItem],
}

impl<'a> ParsedNotification<'a> {
    /// Classify `notification`; `None` when it has no fields at all.
    pub fn classify(notification: &'a Notification) -> Option<Self> {
        let first = notification.fields.first()?;
        Some(Self {
            contract: normalize_hash(&notification.contract),
            method: NeoMethod::from_name(&parse_method(&first.value)),
            fields: &notification.fields,
        })
    }

    /// Field at `index` (0 is the method name).
    pub fn field(&self, index: usize) -> Option<&'a StackItem> {
        self.fields.get(index)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn as_cross_chain_lock(&self) -> Option<CrossChainLock<'a>> {
        (self.method == NeoMethod::CrossChainLock)
            .then(|| CrossChainLock::from_fields(self.fields))
            .flatten()
    }

    pub fn as_cross_chain_unlock(&self) -> Option<CrossChainUnlock<'a>> {
        (self.method == NeoMethod::CrossChainUnlock)
            .then(|| CrossChainUnlock::from_fields(self.fields))
            .flatten()
    }

    pub fn as_lock(&self) -> Option<Lock<'a>> {
        (self.method == NeoMethod::Lock)
            .then(|| Lock::from_fields(self.fields))
            .flatten()
    }

    pub fn as_unlock(&self) -> Option<Unlock<'a>> {
        (self.method == NeoMethod::Unlock)
            .then(|| Unlock::from_fields(self.fields))
            .flatten()
    }

    pub fn as_wrapper_lock(&self) -> Option<WrapperLock<'a>> {
        (self.method == NeoMethod::CrossChainLock)
            .then(|| WrapperLock::from_fields(self.fields))
            .flatten()
    }
}

/// Proxy-side `CrossChainLockEvent`.
#[derive(Debug, Clone, Copy)]
pub struct CrossChainLock<'a> {
    pub to_contract: &'a StackItem,
    pub to_chain_id: &'a StackItem,
    pub key: &'a StackItem,
    pub param: &'a StackItem,
}

impl<'a> CrossChainLock<'a> {
    pub const MIN_FIELDS: usize = 6;

    fn from_fields(f: &'a [StackItem]) -> Option<Self> {
        (f.len() >= Self::MIN_FIELDS).then(|| Self {
            to_contract: &f[2],
            to_chain_id: &f[3],
            key: &f[4],
            param: &f[5],
        })
    }
}

/// Proxy-side `CrossChainUnlockEvent`.
#[derive(Debug, Clone, Copy)]
pub struct CrossChainUnlock<'a> {
    pub from_chain_id: &'a StackItem,
    pub to_contract: &'a StackItem,
    pub poly_tx_hash: &'a StackItem,
}

impl<'a> CrossChainUnlock<'a> {
    pub const MIN_FIELDS: usize = 4;

    fn from_fields(f: &'a [StackItem]) -> Option<Self> {
        (f.len() >= Self::MIN_FIELDS).then(|| Self {
            from_chain_id: &f[1],
            to_contract: &f[2],
            poly_tx_hash: &f[3],
        })
    }
}

/// `Lock` / `LockEvent` transfer sub-event.
#[derive(Debug, Clone, Copy)]
pub struct Lock<'a> {
    pub asset: &'a StackItem,
    pub from: &'a StackItem,
    pub to_chain_id: &'a StackItem,
    pub to_asset: &'a StackItem,
    pub to_user: &'a StackItem,
    pub amount: &'a StackItem,
}

impl<'a> Lock<'a> {
    pub const MIN_FIELDS: usize = 7;

    fn from_fields(f: &'a [StackItem]) -> Option<Self> {
        (f.len() >= Self::MIN_FIELDS).then(|| Self {
            asset: &f[1],
            from: &f[2],
            to_chain_id: &f[3],
            to_asset: &f[4],
            to_user: &f[5],
            amount: &f[6],
        })
    }
}

/// `Unlock` / `UnlockEvent` transfer sub-event.
#[derive(Debug, Clone, Copy)]
pub struct Unlock<'a> {
    pub asset: &'a StackItem,
    pub to: &'a StackItem,
    pub amount: &'a StackItem,
}

impl<'a> Unlock<'a> {
    pub const MIN_FIELDS: usize = 4;

    fn from_fields(f: &'a [StackItem]) -> Option<Self> {
        (f.len() >= Self::MIN_FIELDS).then(|| Self {
            asset: &f[1],
            to: &f[2],
            amount: &f[3],
        })
    }
}

/// Wrapper-side `CrossChainLockEvent`.
#[derive(Debug, Clone, Copy)]
pub struct WrapperLock<'a> {
    /// Field 3, read as source chain, destination chain and fee amount alike.
    pub chain_and_fee: &'a StackItem,
    /// Field 4, read as both the user and the fee token.
    pub user: &'a StackItem,
}

impl<'a> WrapperLock<'a> {
    pub const MIN_FIELDS: usize = 6;

    fn from_fields(f: &'a [StackItem]) -> Option<Self> {
        (f.len() >= Self::MIN_FIELDS).then(|| Self {
            chain_and_fee: &f[3],
            user: &f[4],
        })
    }
}
