//! Amount decoding for notification fields.
//!
//! The encoding is chosen by the item's type tag, never by trying one parse
//! and falling back to the other.

use num_bigint::BigUint;

use crate::address::hex_string_reverse;
use crate::model::StackItem;

/// How a numeric notification field is encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmountEncoding {
    /// `Integer` items: base-10 text.
    Decimal,
    /// Any other tag: little-endian bytes as hex.
    ReversedHex,
}

impl AmountEncoding {
    pub fn for_item(item: &StackItem) -> Self {
        if item.is_integer() {
            Self::Decimal
        } else {
            Self::ReversedHex
        }
    }
}

/// Decode `item` into an unsigned amount.
///
/// Malformed text decodes to 0 so one bad field never aborts a block.
/// Values wider than 64 bits keep only their low 64 bits (logged).
pub fn decode_amount(item: &StackItem) -> u64 {
    let parsed = match AmountEncoding::for_item(item) {
        AmountEncoding::Decimal => decimal_digits(&item.value)
            .and_then(|digits| BigUint::parse_bytes(digits.as_bytes(), 10)),
        AmountEncoding::ReversedHex => {
            BigUint::parse_bytes(hex_string_reverse(&item.value).as_bytes(), 16)
        }
    };
    let Some(amount) = parsed else {
        tracing::debug!(item_type = %item.item_type, value = %item.value, "unparsable amount, using 0");
        return 0;
    };
    if amount.bits() > 64 {
        tracing::warn!(%amount, "amount exceeds u64, keeping low 64 bits");
    }
    amount.iter_u64_digits().next().unwrap_or(0)
}

/// Plain base-10 digits with an optional leading `+`; no separators.
fn decimal_digits(text: &str) -> Option<&str> {
    let digits = text.strip_prefix('+').unwrap_or(text);
    (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_is_decimal() {
        assert_eq!(decode_amount(&StackItem::new("Integer", "100000000")), 100_000_000);
        assert_eq!(decode_amount(&StackItem::new("Integer", "0")), 0);
        assert_eq!(decode_amount(&StackItem::new("Integer", "+42")), 42);
        assert_eq!(
            decode_amount(&StackItem::new("Integer", "18446744073709551615")),
            u64::MAX
        );
    }

    #[test]
    fn byte_array_is_reversed_hex() {
        assert_eq!(decode_amount(&StackItem::new("ByteArray", "00e1f505")), 100_000_000);
        assert_eq!(decode_amount(&StackItem::new("ByteArray", "01")), 1);
        assert_eq!(decode_amount(&StackItem::new("ByteArray", "0001")), 256);
    }

    #[test]
    fn tag_selects_encoding() {
        // "10" is ten in decimal but sixteen as reversed hex.
        assert_eq!(decode_amount(&StackItem::new("Integer", "10")), 10);
        assert_eq!(decode_amount(&StackItem::new("ByteArray", "10")), 16);
        assert_eq!(AmountEncoding::for_item(&StackItem::new("", "10")), AmountEncoding::ReversedHex);
    }

    #[test]
    fn malformed_is_zero() {
        assert_eq!(decode_amount(&StackItem::new("Integer", "12ab")), 0);
        assert_eq!(decode_amount(&StackItem::new("Integer", "")), 0);
        assert_eq!(decode_amount(&StackItem::new("Integer", "1_000")), 0);
        assert_eq!(decode_amount(&StackItem::new("Integer", "+")), 0);
        assert_eq!(decode_amount(&StackItem::new("Integer", " 7")), 0);
        assert_eq!(decode_amount(&StackItem::new("ByteArray", "xyz")), 0);
        assert_eq!(decode_amount(&StackItem::new("ByteArray", "")), 0);
    }

    #[test]
    fn wide_values_keep_low_bits() {
        // 2^64 + 5
        assert_eq!(decode_amount(&StackItem::new("Integer", "18446744073709551621")), 5);
    }
}
