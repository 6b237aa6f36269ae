//! Hex and chain-scoped address helpers.

use sha2::{Digest, Sha256};

pub const ETHEREUM_CROSSCHAIN_ID: u64 = 2;
pub const ONT_CROSSCHAIN_ID: u64 = 3;
pub const NEO_CROSSCHAIN_ID: u64 = 4;
pub const BSC_CROSSCHAIN_ID: u64 = 6;
pub const HECO_CROSSCHAIN_ID: u64 = 7;
pub const OK_CROSSCHAIN_ID: u64 = 12;
pub const MATIC_CROSSCHAIN_ID: u64 = 17;

/// Base58Check version byte shared by Neo and Ontology addresses.
const ADDRESS_VERSION: u8 = 0x17;

/// Strip a leading `0x`, if any.
pub fn strip_hex_prefix(s: &str) -> &str {
    s.strip_prefix("0x").unwrap_or(s)
}

/// Reverse the byte order of a hex string. Invalid hex yields `""`.
pub fn hex_string_reverse(value: &str) -> String {
    match hex::decode(value) {
        Ok(mut bytes) => {
            bytes.reverse();
            hex::encode(bytes)
        }
        Err(_) => String::new(),
    }
}

/// Render a raw script hash / address as the given chain displays it.
///
/// Chains without a known encoding, and values that do not decode, are
/// returned unchanged.
pub fn hash_to_address(chain_id: u64, value: &str) -> String {
    match chain_id {
        ETHEREUM_CROSSCHAIN_ID | BSC_CROSSCHAIN_ID | HECO_CROSSCHAIN_ID | OK_CROSSCHAIN_ID
        | MATIC_CROSSCHAIN_ID => evm_address(value),
        NEO_CROSSCHAIN_ID => hex::decode(value)
            .ok()
            .and_then(|bytes| base58_address(&bytes))
            .unwrap_or_else(|| value.to_string()),
        ONT_CROSSCHAIN_ID => hex::decode(hex_string_reverse(value))
            .ok()
            .and_then(|bytes| base58_address(&bytes))
            .unwrap_or_else(|| value.to_string()),
        _ => value.to_string(),
    }
}

/// Lowercase, unprefixed, exactly 40 hex digits (keeps the trailing 20 bytes).
fn evm_address(value: &str) -> String {
    let digits = strip_hex_prefix(value).to_ascii_lowercase();
    if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return value.to_string();
    }
    if digits.len() >= 40 {
        digits[digits.len() - 40..].to_string()
    } else {
        format!("{digits:0>40}")
    }
}

/// Base58Check of a 20-byte script hash, or `None` for any other length.
fn base58_address(script_hash: &[u8]) -> Option<String> {
    if script_hash.len() != 20 {
        return None;
    }
    let mut payload = Vec::with_capacity(25);
    payload.push(ADDRESS_VERSION);
    payload.extend_from_slice(script_hash);
    let checksum = Sha256::digest(Sha256::digest(&payload));
    payload.extend_from_slice(&checksum[..4]);
    Some(bs58::encode(payload).into_string())
}
