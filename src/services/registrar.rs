// src/services/registrar.rs
//! DID registration service.
//!
//! Runs the whole `did:polygon` creation pipeline as one linear attempt:
//! 1. Generate a fresh secp256k1 key pair
//! 2. Mint `did:polygon:<address>`
//! 3. Build the DID Document
//! 4. Serialize it to canonical JSON
//! 5. Submit `createDID(address, document)` to the registry and await it
//!
//! A failure at any step is logged with the step name and returned unchanged.
//! There is no retry, and a failure before step 5 never reaches the chain.

use crate::contracts::did_registry::RegistryClient;
use crate::error::RegistrarError;
use crate::models::did::{DidDocument, DidIdentifier};
use crate::wallet::key_management::{KeyPair, KeyPairGenerator};
use log::{debug, error, info};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::Serialize;

/// Outcome of a successful registration.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationResult<R> {
    /// The newly anchored identifier
    pub did: DidIdentifier,
    /// Whatever the registry returned for `createDID`
    pub return_address: R,
}

/// Registers new DIDs against a registry.
///
/// Holds no per-registration state, so one instance can serve any number of
/// concurrent `register_did` calls; each call mints its own key pair.
pub struct Registrar<C> {
    registry: C,
}

impl<C> Registrar<C>
where
    C: RegistryClient,
{
    pub fn new(registry: C) -> Self {
        Registrar { registry }
    }

    pub fn registry(&self) -> &C {
        &self.registry
    }

    /// Creates a new identity and anchors its DID Document on chain.
    ///
    /// The generated private key is dropped (and wiped) before submission;
    /// only the DID and the registry's return value leave this function.
    ///
    /// # Errors
    /// - `KeyGeneration` if no key pair could be produced
    /// - `DocumentConstruction` if the document cannot be serialized
    /// - `RegistrySubmission` exactly as returned by the registry
    pub async fn register_did(&self) -> Result<RegistrationResult<C::Receipt>, RegistrarError> {
        self.register_did_with_rng(&mut OsRng).await
    }

    /// Same as [`Registrar::register_did`], drawing key material from `rng`.
    ///
    /// A failing source aborts with `KeyGeneration` before anything is sent to
    /// the registry.
    pub async fn register_did_with_rng<R: RngCore + CryptoRng>(
        &self,
        rng: &mut R,
    ) -> Result<RegistrationResult<C::Receipt>, RegistrarError> {
        let KeyPair {
            address,
            public_key_base58,
            private_key_base58,
        } = KeyPairGenerator::generate_with_rng(rng).map_err(log_failure("createKeyPair"))?;
        drop(private_key_base58);

        let did = DidIdentifier::from_address(&address);
        let document = DidDocument::build(did.as_str(), &public_key_base58);
        let serialized = document
            .to_canonical_json()
            .map_err(log_failure("wrapDidDocument"))?;

        let return_address = self
            .registry
            .create_did(&address, &serialized)
            .await
            .map_err(log_failure("createDID"))?;

        debug!("returnAddress - {:?}", return_address);
        info!("registered {}", did);

        Ok(RegistrationResult { did, return_address })
    }
}

fn log_failure(step: &'static str) -> impl FnOnce(RegistrarError) -> RegistrarError {
    move |err| {
        error!("{} failed during {}: {}", step, err.stage(), err);
        err
    }
}
