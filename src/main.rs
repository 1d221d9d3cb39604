// src/main.rs

//! # Polygon DID Registrar - Main Entry Point
//!
//! Registers one new `did:polygon` identity and prints the result as JSON.
//!
//! ## Environment Variables Required
//! - `URL`: Polygon JSON-RPC endpoint
//! - `DID_ADDRESS`: Deployed DID registry contract address
//! - `PRIVATE_KEY`: Private key of the account paying for the transaction
//! - `LOGGER_LEVEL`: (Optional) log filter (default: info)
//! - `GAS_LIMIT`: (Optional) fixed gas limit for `createDID`

use polygon_did_registrar::{PolygonDidRegistry, Registrar, RegistrarConfig};

/// Main application entry point
///
/// # Sequence
/// 1. Load configuration from `.env` and the environment
/// 2. Initialize logging
/// 3. Connect to the registry contract
/// 4. Register a new DID
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = RegistrarConfig::from_env()?;

    env_logger::Builder::new()
        .parse_filters(&config.log_level)
        .init();

    let registry = PolygonDidRegistry::connect(&config).await?;
    let registrar = Registrar::new(registry);

    let result = registrar.register_did().await?;
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
