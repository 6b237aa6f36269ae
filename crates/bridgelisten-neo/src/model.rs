//! Node data as returned by `getblock` (verbose) and `getapplicationlog`.
//!
//! Notification payloads are loosely typed: item values may arrive as
//! strings, numbers, booleans or null, and `state` may be missing. All of it
//! is normalized here so the extractor only ever sees text fields.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Transaction type tag of contract invocations.
pub const INVOCATION_TRANSACTION: &str = "InvocationTransaction";

/// A verbose block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Block {
    #[serde(default)]
    pub hash: String,
    pub index: u64,
    /// Unix timestamp (seconds).
    pub time: u64,
    #[serde(default)]
    pub tx: Vec<Transaction>,
}

/// A transaction summary inside a verbose block.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transaction {
    /// `0x`-prefixed transaction id.
    pub txid: String,
    #[serde(rename = "type", default)]
    pub tx_type: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub sys_fee: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub net_fee: String,
}

impl Transaction {
    /// Only invocation transactions can emit contract notifications.
    pub fn is_invocation(&self) -> bool {
        self.tx_type == INVOCATION_TRANSACTION
    }
}

/// Result of `getapplicationlog`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ApplicationLog {
    #[serde(default)]
    pub txid: String,
    #[serde(default)]
    pub executions: Vec<Execution>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Execution {
    #[serde(default)]
    pub trigger: String,
    #[serde(default)]
    pub contract: String,
    #[serde(default)]
    pub vmstate: String,
    /// Decimal GAS amount, e.g. `"2.855"`.
    #[serde(default, deserialize_with = "loose_string")]
    pub gas_consumed: String,
    #[serde(default)]
    pub notifications: Vec<Notification>,
}

/// A contract notification. `fields` is the flattened `state.value` array.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Notification {
    #[serde(default)]
    pub contract: String,
    #[serde(rename = "state", default, deserialize_with = "state_fields")]
    pub fields: Vec<StackItem>,
}

/// One typed item of a notification's state array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StackItem {
    #[serde(rename = "type", default)]
    pub item_type: String,
    #[serde(default, deserialize_with = "loose_string")]
    pub value: String,
}

impl StackItem {
    pub fn new(item_type: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            item_type: item_type.into(),
            value: value.into(),
        }
    }

    /// `true` for items whose value is decimal text.
    pub fn is_integer(&self) -> bool {
        self.item_type == "Integer"
    }
}

/// Accept any JSON scalar as text; `null` becomes empty.
pub(crate) fn loose_string<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(match Value::deserialize(d)? {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        other => other.to_string(),
    })
}

fn state_fields<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<StackItem>, D::Error> {
    let items = match Value::deserialize(d)? {
        Value::Object(mut state) => match state.remove("value") {
            Some(Value::Array(items)) => items,
            _ => return Ok(Vec::new()),
        },
        _ => return Ok(Vec::new()),
    };
    // Non-object items still occupy their position.
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}
