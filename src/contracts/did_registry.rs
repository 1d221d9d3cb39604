// src/contracts/did_registry.rs
//! Polygon DID Registry smart contract interface.
//!
//! The registry is an external collaborator: it accepts `createDID(address,
//! document)` and anchors the serialized document on chain. This module
//! defines the [`RegistryClient`] seam the registrar talks to and the
//! `ethers`-backed implementation used in production.

use crate::blockchain::rpc_client::{self, SignerClient};
use crate::config::RegistrarConfig;
use crate::error::RegistrarError;
use ethers::providers::Middleware;
use ethers::types::{Address, TransactionReceipt, U256, U64};
use ethers_contract::{Contract, ContractError};
use ethers_core::abi::parse_abi;
use log::debug;
use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::sync::Arc;

/// Human-readable ABI of the registry method used for registration.
pub const CREATE_DID_ABI: &str =
    "function createDID(address _id, string _doc) returns (address, string)";

/// Anything able to anchor a DID Document for an address.
///
/// Results are opaque to the registrar and failures are passed through as-is.
pub trait RegistryClient: Send + Sync {
    /// What the registry hands back for a successful registration.
    type Receipt: fmt::Debug + Send;

    fn create_did(
        &self,
        address: &str,
        document: &str,
    ) -> impl Future<Output = Result<Self::Receipt, RegistrarError>> + Send;
}

/// DID Registry contract binding.
///
/// # Type Parameters
/// * `M` - Middleware used to sign and send transactions
pub struct PolygonDidRegistry<M> {
    /// Underlying contract instance
    contract: Contract<M>,
    /// Fixed gas limit; the provider estimates when unset
    gas_limit: Option<U256>,
}

impl<M> PolygonDidRegistry<M>
where
    M: Middleware + 'static,
{
    /// Binds the registry contract at `contract_address`.
    pub fn new(client: Arc<M>, contract_address: Address) -> Result<Self, RegistrarError> {
        let abi = parse_abi(&[CREATE_DID_ABI])
            .map_err(|e| RegistrarError::Config(format!("failed to parse registry ABI: {e}")))?;
        Ok(PolygonDidRegistry {
            contract: Contract::new(contract_address, abi, client),
            gas_limit: None,
        })
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = Some(U256::from(gas_limit));
        self
    }

    pub fn address(&self) -> Address {
        self.contract.address()
    }
}

impl PolygonDidRegistry<SignerClient> {
    /// Connects to the node and binds the configured registry contract.
    pub async fn connect(config: &RegistrarConfig) -> Result<Self, RegistrarError> {
        let contract_address = config.registry_address()?;
        let client = rpc_client::connect(config).await?;
        let registry = Self::new(client, contract_address)?;
        Ok(match config.gas_limit {
            Some(gas_limit) => registry.with_gas_limit(gas_limit),
            None => registry,
        })
    }
}

impl<M> RegistryClient for PolygonDidRegistry<M>
where
    M: Middleware + 'static,
{
    type Receipt = TransactionReceipt;

    /// Sends `createDID` and waits for the transaction receipt.
    ///
    /// # Errors
    /// `RegistrySubmission` if the address is malformed, the transaction cannot
    /// be sent, it is dropped before mining, or it is mined but reverted.
    async fn create_did(
        &self,
        address: &str,
        document: &str,
    ) -> Result<TransactionReceipt, RegistrarError> {
        let id = Address::from_str(address).map_err(|e| {
            RegistrarError::RegistrySubmission(format!("invalid DID address {address}: {e}"))
        })?;

        let mut call = self
            .contract
            .method::<_, (Address, String)>("createDID", (id, document.to_string()))
            .map_err(|e| {
                RegistrarError::RegistrySubmission(format!("failed to encode createDID: {e}"))
            })?;
        if let Some(gas_limit) = self.gas_limit {
            call = call.gas(gas_limit);
        }

        let pending = call.send().await.map_err(submission_error::<M>)?;
        debug!("createDID sent for {} in tx {:?}", address, pending.tx_hash());

        let receipt = pending
            .await
            .map_err(|e| RegistrarError::RegistrySubmission(e.to_string()))?;
        confirmed_receipt(receipt)
    }
}

/// Accepts a mined receipt unless the transaction was dropped or reverted.
fn confirmed_receipt(
    receipt: Option<TransactionReceipt>,
) -> Result<TransactionReceipt, RegistrarError> {
    let receipt = receipt.ok_or_else(|| {
        RegistrarError::RegistrySubmission("transaction dropped from mempool".to_string())
    })?;

    if receipt.status == Some(U64::zero()) {
        return Err(RegistrarError::RegistrySubmission(format!(
            "createDID reverted in tx {:?}",
            receipt.transaction_hash
        )));
    }
    Ok(receipt)
}

fn submission_error<M: Middleware>(err: ContractError<M>) -> RegistrarError {
    match err.decode_revert::<String>() {
        Some(reason) => RegistrarError::RegistrySubmission(format!("createDID reverted: {reason}")),
        None => RegistrarError::RegistrySubmission(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ethers::providers::{MockProvider, Provider};
    use ethers::types::{Bytes, H256};
    use ethers_core::abi::{encode, Token};

    const REGISTRY: &str = "0x8B335A167DA81CCef19C53eE629cf2F6291F2255";

    fn mocked_registry() -> PolygonDidRegistry<Provider<MockProvider>> {
        let (provider, _mock) = Provider::mocked();
        PolygonDidRegistry::new(Arc::new(provider), REGISTRY.parse().unwrap()).unwrap()
    }

    #[test]
    fn test_binding_keeps_address_and_gas() {
        let registry = mocked_registry().with_gas_limit(3_000_000);
        assert_eq!(registry.address(), REGISTRY.parse::<Address>().unwrap());
        assert_eq!(registry.gas_limit, Some(U256::from(3_000_000u64)));
    }

    #[test]
    fn test_abi_exposes_create_did() {
        let abi = parse_abi(&[CREATE_DID_ABI]).unwrap();
        let function = abi.function("createDID").unwrap();
        assert_eq!(function.inputs.len(), 2);
        assert_eq!(function.outputs.len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_address_is_submission_failure() {
        let err = mocked_registry().create_did("0xnothex", "{}").await.unwrap_err();
        assert!(matches!(
            err,
            RegistrarError::RegistrySubmission(ref msg) if msg.contains("invalid DID address")
        ));
    }

    #[tokio::test]
    async fn test_transport_failure_is_submission_failure() {
        // the mock has no queued responses, so the first RPC call errors out
        let err = mocked_registry()
            .create_did("0x2c7536E3605D9C16a7a3D7b1898e529396a65c23", "{}")
            .await
            .unwrap_err();
        assert!(matches!(err, RegistrarError::RegistrySubmission(_)));
    }

    fn revert_data(reason: &str) -> Bytes {
        // Error(string) selector followed by the ABI-encoded reason
        let mut data = vec![0x08, 0xc3, 0x79, 0xa0];
        data.extend(encode(&[Token::String(reason.to_string())]));
        Bytes::from(data)
    }

    #[test]
    fn test_dropped_transaction_is_submission_failure() {
        let err = confirmed_receipt(None).unwrap_err();
        assert!(matches!(
            err,
            RegistrarError::RegistrySubmission(ref msg) if msg.contains("dropped")
        ));
    }

    #[test]
    fn test_failed_receipt_is_submission_failure() {
        let receipt = TransactionReceipt {
            transaction_hash: H256::repeat_byte(0xab),
            status: Some(U64::zero()),
            ..Default::default()
        };
        let err = confirmed_receipt(Some(receipt)).unwrap_err();
        assert!(matches!(
            err,
            RegistrarError::RegistrySubmission(ref msg) if msg.contains("reverted")
        ));
    }

    #[test]
    fn test_successful_receipt_is_returned() {
        let receipt = TransactionReceipt {
            transaction_hash: H256::repeat_byte(0x01),
            status: Some(U64::one()),
            ..Default::default()
        };
        let confirmed = confirmed_receipt(Some(receipt.clone())).unwrap();
        assert_eq!(confirmed.transaction_hash, receipt.transaction_hash);

        // pre-Byzantium receipts carry no status at all
        let legacy = TransactionReceipt::default();
        assert!(confirmed_receipt(Some(legacy)).is_ok());
    }

    #[test]
    fn test_revert_reason_is_decoded() {
        let err =
            ContractError::<Provider<MockProvider>>::Revert(revert_data("DID already registered"));
        match submission_error(err) {
            RegistrarError::RegistrySubmission(msg) => {
                assert_eq!(msg, "createDID reverted: DID already registered")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_undecodable_revert_keeps_raw_message() {
        let err = ContractError::<Provider<MockProvider>>::Revert(Bytes::from(vec![0xde, 0xad]));
        let expected = err.to_string();
        match submission_error(err) {
            RegistrarError::RegistrySubmission(msg) => assert_eq!(msg, expected),
            other => panic!("unexpected error: {other}"),
        }
    }
}
