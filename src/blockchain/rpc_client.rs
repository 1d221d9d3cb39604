// src/blockchain/rpc_client.rs
//! Polygon JSON-RPC client setup.
//!
//! Builds the signing middleware stack used to send registry transactions:
//! an HTTP provider wrapped in a `SignerMiddleware` holding the fee-paying
//! wallet, bound to the chain id reported by the node.

use crate::config::RegistrarConfig;
use crate::error::RegistrarError;
use ethers::middleware::SignerMiddleware;
use ethers::providers::{Http, Middleware, Provider};
use ethers::signers::{LocalWallet, Signer};
use log::info;
use std::sync::Arc;

/// HTTP provider with a local signing wallet.
pub type SignerClient = SignerMiddleware<Provider<Http>, LocalWallet>;

/// Parses the signer key into a wallet without touching the network.
///
/// # Arguments
/// * `private_key` - Hex-encoded private key (with or without 0x prefix)
pub fn signer_wallet(private_key: &str) -> Result<LocalWallet, RegistrarError> {
    private_key
        .trim_start_matches("0x")
        .parse::<LocalWallet>()
        .map_err(|e| RegistrarError::Config(format!("invalid signer key: {e}")))
}

/// Connects to the configured RPC endpoint.
///
/// # Errors
/// Returns `Config` if:
/// - The RPC URL cannot be parsed
/// - The signer key is invalid
/// - The chain ID cannot be retrieved
pub async fn connect(config: &RegistrarConfig) -> Result<Arc<SignerClient>, RegistrarError> {
    let wallet = signer_wallet(&config.signer_key)?;
    let provider = Provider::<Http>::try_from(config.rpc_url.as_str())
        .map_err(|e| RegistrarError::Config(format!("invalid rpc url {}: {}", config.rpc_url, e)))?;

    let chain_id = provider
        .get_chainid()
        .await
        .map_err(|e| RegistrarError::Config(format!("failed to fetch chain id: {e}")))?
        .as_u64();
    let wallet = wallet.with_chain_id(chain_id);

    info!(
        "connected to {} (chain id {}) as {:?}",
        config.rpc_url,
        chain_id,
        wallet.address()
    );
    Ok(Arc::new(SignerMiddleware::new(provider, wallet)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::crypto::checksum_address;

    const SIGNER_KEY: &str = "4c0883a69102937d6231471b5dbb6204fe5129617082792ae468d01a3f362318";

    #[test]
    fn test_signer_wallet_address() {
        let wallet = signer_wallet(SIGNER_KEY).unwrap();
        assert_eq!(
            checksum_address(&wallet.address()),
            "0x2c7536E3605D9C16a7a3D7b1898e529396a65c23"
        );
        let prefixed = signer_wallet(&format!("0x{SIGNER_KEY}")).unwrap();
        assert_eq!(prefixed.address(), wallet.address());
    }

    #[test]
    fn test_signer_wallet_rejects_garbage() {
        assert!(matches!(signer_wallet("not-a-key"), Err(RegistrarError::Config(_))));
    }

    #[tokio::test]
    async fn test_connect_rejects_bad_url() {
        let config = RegistrarConfig::new(
            "not a url",
            "0x8B335A167DA81CCef19C53eE629cf2F6291F2255",
            SIGNER_KEY,
        );
        let err = connect(&config).await.unwrap_err();
        assert!(matches!(err, RegistrarError::Config(ref msg) if msg.contains("invalid rpc url")));
    }
}
