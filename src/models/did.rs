// src/models/did.rs
//! `did:polygon` identifier and DID Document data model.
//!
//! Follows the shape of the [DID Core Specification](https://www.w3.org/TR/did-core/)
//! used by the Polygon DID registry: one context, one identifier, and a single
//! secp256k1 verification method controlled by the identifier itself.

use crate::error::RegistrarError;
use crate::utils::serialization::{deserialize, serialize};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Method prefix of every identifier this crate mints.
pub const DID_METHOD_PREFIX: &str = "did:polygon:";

/// JSON-LD context written into every document.
pub const DID_CONTEXT: &str = "https://w3id.org/did/v1";

/// Verification method type for secp256k1 keys.
pub const VERIFICATION_KEY_TYPE: &str = "EcdsaSecp256k1VerificationKey2019";

/// A `did:polygon:<address>` identifier.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DidIdentifier(String);

impl DidIdentifier {
    /// Builds the identifier for an Ethereum-style address.
    pub fn from_address(address: &str) -> Self {
        DidIdentifier(format!("{DID_METHOD_PREFIX}{address}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The address portion after `did:polygon:`, if the prefix is present.
    pub fn address(&self) -> Option<&str> {
        self.0.strip_prefix(DID_METHOD_PREFIX)
    }
}

impl fmt::Display for DidIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<DidIdentifier> for String {
    fn from(did: DidIdentifier) -> Self {
        did.0
    }
}

/// A verification method entry of a DID Document.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationMethod {
    pub id: String,
    #[serde(rename = "type")]
    pub type_: String,
    pub controller: String,
    pub public_key_base58: String,
}

/// The DID Document anchored on chain.
///
/// Field order here is the serialization order, which keeps the submitted JSON
/// byte-for-byte reproducible.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DidDocument {
    #[serde(rename = "@context")]
    pub context: String,
    pub id: String,
    pub verification_method: Vec<VerificationMethod>,
}

impl DidDocument {
    /// Assembles the document for `did` and its Base58 public key.
    ///
    /// Inputs are copied verbatim. An empty or oddly shaped `did` is not
    /// rejected here; identifiers are only ever minted through
    /// [`DidIdentifier::from_address`].
    pub fn build(did: &str, public_key_base58: &str) -> Self {
        DidDocument {
            context: DID_CONTEXT.to_string(),
            id: did.to_string(),
            verification_method: vec![VerificationMethod {
                id: did.to_string(),
                type_: VERIFICATION_KEY_TYPE.to_string(),
                controller: did.to_string(),
                public_key_base58: public_key_base58.to_string(),
            }],
        }
    }

    /// Serializes to the compact JSON submitted to the registry.
    pub fn to_canonical_json(&self) -> Result<String, RegistrarError> {
        serialize(self).map_err(RegistrarError::from)
    }

    /// Parses a document previously produced by [`DidDocument::to_canonical_json`].
    pub fn from_json(json: &str) -> Result<Self, RegistrarError> {
        deserialize(json).map_err(RegistrarError::from)
    }
}
