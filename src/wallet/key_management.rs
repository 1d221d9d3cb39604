// src/wallet/key_management.rs
//! Key pair generation for new `did:polygon` identities.
//!
//! Produces a fresh secp256k1 key pair together with every encoding the
//! registration pipeline needs:
//! - Ethereum-style checksummed address (Keccak-256 of the uncompressed point)
//! - Base58 of the raw 65-byte uncompressed public key
//! - Base58 of the raw 32-byte private key
//!
//! Uses the following cryptographic primitives:
//! - secp256k1 curve (via `k256` crate)
//! - Keccak-256 hashing (via `ethers` crate)
//! - Cryptographically secure random number generation (`OsRng`)
//!
//! # Security Notes
//! - Raw secret bytes only ever live in zeroizing buffers
//! - `KeyPair` wipes its Base58 private key on drop and never prints it
//! - Nothing here keeps key material after `generate` returns

use crate::error::RegistrarError;
use crate::utils::crypto::{checksum_address, hash_data};
use crate::utils::serialization::{decode_base58, encode_base58};
use ethers::types::Address;
use k256::elliptic_curve::sec1::ToEncodedPoint;
use k256::SecretKey;
use log::debug;
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use std::fmt;
use zeroize::Zeroizing;

/// Length of a raw secp256k1 secret scalar.
pub const SECRET_KEY_LEN: usize = 32;

/// Length of a SEC1 uncompressed public key (`0x04 || X || Y`).
pub const PUBLIC_KEY_LEN: usize = 65;

/// Out-of-range candidates are astronomically rare; hitting this many in a row
/// means the entropy source is broken.
const MAX_SAMPLING_ATTEMPTS: usize = 16;

/// Key material for one newly generated identity.
///
/// The caller becomes the sole owner of the private key once this is returned.
pub struct KeyPair {
    /// `0x`-prefixed EIP-55 checksummed address derived from the public key
    pub address: String,
    /// Base58 of the 65-byte uncompressed public key
    pub public_key_base58: String,
    /// Base58 of the 32-byte private key, wiped on drop
    pub private_key_base58: Zeroizing<String>,
}

impl KeyPair {
    /// Derives the full key pair from a known 32-byte secret.
    ///
    /// # Errors
    /// `KeyGeneration` if the bytes are not a valid non-zero scalar below the
    /// curve order.
    pub fn from_secret_bytes(bytes: &[u8]) -> Result<Self, RegistrarError> {
        if bytes.len() != SECRET_KEY_LEN {
            return Err(RegistrarError::KeyGeneration(format!(
                "secret key must be {} bytes, got {}",
                SECRET_KEY_LEN,
                bytes.len()
            )));
        }
        let secret = SecretKey::from_slice(bytes).map_err(|_| {
            RegistrarError::KeyGeneration("secret key is not a valid secp256k1 scalar".to_string())
        })?;
        Self::from_parts(&secret, bytes)
    }

    fn from_parts(secret: &SecretKey, raw_secret: &[u8]) -> Result<Self, RegistrarError> {
        let point = secret.public_key().to_encoded_point(false);
        let public_key = point.as_bytes();
        let address = derive_address(public_key)?;

        Ok(KeyPair {
            address,
            public_key_base58: encode_base58(public_key),
            private_key_base58: Zeroizing::new(encode_base58(raw_secret)),
        })
    }

    /// Decodes `public_key_base58` back to the uncompressed SEC1 point.
    pub fn public_key_bytes(&self) -> Result<Vec<u8>, RegistrarError> {
        decode_base58(&self.public_key_base58)
            .map_err(|e| RegistrarError::KeyGeneration(format!("invalid public key encoding: {e}")))
    }

    /// Decodes `private_key_base58` into a buffer that is wiped on drop.
    pub fn private_key_bytes(&self) -> Result<Zeroizing<Vec<u8>>, RegistrarError> {
        decode_base58(&self.private_key_base58)
            .map(Zeroizing::new)
            .map_err(|e| {
                RegistrarError::KeyGeneration(format!("invalid private key encoding: {e}"))
            })
    }
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("address", &self.address)
            .field("public_key_base58", &self.public_key_base58)
            .field("private_key_base58", &"<redacted>")
            .finish()
    }
}

/// Derives the Ethereum address of an uncompressed secp256k1 public key.
///
/// Keccak-256 over the 64 coordinate bytes (the `0x04` tag is skipped), last
/// 20 bytes, rendered with EIP-55 checksum casing.
pub fn derive_address(public_key: &[u8]) -> Result<String, RegistrarError> {
    if public_key.len() != PUBLIC_KEY_LEN || public_key[0] != 0x04 {
        return Err(RegistrarError::KeyGeneration(
            "expected a 65-byte uncompressed public key".to_string(),
        ));
    }
    let hash = hash_data(&public_key[1..]);
    Ok(checksum_address(&Address::from_slice(&hash[12..])))
}

/// Stateless secp256k1 key pair generator.
pub struct KeyPairGenerator;

impl KeyPairGenerator {
    /// Generates a fresh key pair from the operating system's CSPRNG.
    pub fn generate() -> Result<KeyPair, RegistrarError> {
        Self::generate_with_rng(&mut OsRng)
    }

    /// Generates a key pair from the supplied random source.
    ///
    /// Candidates are drawn with `try_fill_bytes` and rejected when they fall
    /// outside `[1, n)`, so a failing source yields `KeyGeneration` rather than
    /// a panic. No partial key pair is ever returned.
    pub fn generate_with_rng<R: RngCore + CryptoRng>(
        rng: &mut R,
    ) -> Result<KeyPair, RegistrarError> {
        let mut candidate = Zeroizing::new([0u8; SECRET_KEY_LEN]);

        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            rng.try_fill_bytes(&mut candidate[..])
                .map_err(|e| RegistrarError::KeyGeneration(format!("entropy source failed: {e}")))?;

            if let Ok(secret) = SecretKey::from_slice(&candidate[..]) {
                return KeyPair::from_parts(&secret, &candidate[..]);
            }
            debug!("discarded out-of-range secret key candidate");
        }

        Err(RegistrarError::KeyGeneration(format!(
            "no valid secret key after {MAX_SAMPLING_ATTEMPTS} attempts"
        )))
    }
}
