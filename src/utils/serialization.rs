// src/utils/serialization.rs
//! Serialization utilities for the registrar.
//!
//! Provides:
//! - Canonical (compact, declaration-ordered) JSON for on-chain documents
//! - Raw Base58 encoding of key bytes

use serde::{Deserialize, Serialize};
use serde_json;

/// Serializes a value to its canonical JSON string.
///
/// Output is compact and keeps struct fields in declaration order, so the same
/// value always produces byte-identical output.
///
/// # Returns
/// - `Ok(String)` with JSON representation on success
/// - `Err(serde_json::Error)` if serialization fails
pub fn serialize<T: Serialize>(data: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(data)
}

/// Deserializes a value from a JSON string.
pub fn deserialize<'a, T: Deserialize<'a>>(data: &'a str) -> Result<T, serde_json::Error> {
    serde_json::from_str(data)
}

/// Base58-encodes raw bytes (Bitcoin alphabet, no version byte, no checksum).
pub fn encode_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Decodes a raw Base58 string back to bytes.
pub fn decode_base58(encoded: &str) -> Result<Vec<u8>, bs58::decode::Error> {
    bs58::decode(encoded).into_vec()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base58_keeps_leading_zero_bytes() {
        let encoded = encode_base58(&[0, 0, 1, 2, 3]);
        assert!(encoded.starts_with("11"));
        assert_eq!(decode_base58(&encoded).unwrap(), vec![0, 0, 1, 2, 3]);
    }

    #[test]
    fn test_decode_rejects_non_alphabet() {
        // '0', 'O', 'I' and 'l' are not in the Bitcoin alphabet
        assert!(decode_base58("0OIl").is_err());
    }

    #[test]
    fn test_serialize_is_compact() {
        let value = serde_json::json!({ "a": [1, 2] });
        assert_eq!(serialize(&value).unwrap(), r#"{"a":[1,2]}"#);
    }
}
