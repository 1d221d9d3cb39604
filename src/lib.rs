// src/lib.rs

//! # Polygon DID Registrar
//!
//! Creates self-sovereign `did:polygon` identifiers and anchors their DID
//! Documents on the Polygon DID registry contract.
//!
//! ## Architecture Overview
//! 1. **Wallet Layer**: `KeyPairGenerator` for secp256k1 keys and their encodings
//! 2. **Models Layer**: `DidIdentifier` and `DidDocument`
//! 3. **Contracts Layer**: `RegistryClient` seam and the `ethers` registry binding
//! 4. **Services Layer**: `Registrar`, which runs the registration pipeline

// Module declarations (organized by functional domain)
pub mod blockchain;    // RPC provider and signer setup
pub mod config;        // Explicit registrar configuration
pub mod contracts;     // DID registry contract binding
pub mod error;         // Pipeline error taxonomy
pub mod models;        // DID data structures
pub mod services;      // Registration pipeline
pub mod utils;         // Hashing and encoding helpers
pub mod wallet;        // Key pair generation

pub use crate::config::RegistrarConfig;
pub use crate::contracts::did_registry::{PolygonDidRegistry, RegistryClient};
pub use crate::error::RegistrarError;
pub use crate::models::did::{DidDocument, DidIdentifier, VerificationMethod};
pub use crate::services::registrar::{Registrar, RegistrationResult};
pub use crate::wallet::key_management::{KeyPair, KeyPairGenerator};
