// src/utils/crypto.rs
//! Ethereum-compatible hashing and address rendering.
//!
//! Uses Keccak-256 (Ethereum's standard hash function) for address derivation.

use ethers::types::Address;
use ethers::utils::{keccak256, to_checksum};

/// Computes a Keccak-256 hash of the input data (Ethereum-compatible).
///
/// # Arguments
/// * `data` - Binary data to hash (as bytes slice)
///
/// # Returns
/// Fixed-size 32-byte array (`[u8; 32]`) containing the hash.
pub fn hash_data(data: &[u8]) -> [u8; 32] {
    keccak256(data)
}

/// Renders a 20-byte address as a `0x`-prefixed EIP-55 checksummed string.
pub fn checksum_address(address: &Address) -> String {
    to_checksum(address, None)
}
