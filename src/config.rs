// src/config.rs
//! Registrar configuration.
//!
//! Settings are passed explicitly into the registry client rather than read
//! from globals. `RegistrarConfig::from_env` reads the deployment environment:
//!
//! | Variable       | Field              | Required |
//! |----------------|--------------------|----------|
//! | `URL`          | `rpc_url`          | yes      |
//! | `DID_ADDRESS`  | `registry_address` | yes      |
//! | `PRIVATE_KEY`  | `signer_key`       | yes      |
//! | `LOGGER_LEVEL` | `log_level`        | no (`info`) |
//! | `GAS_LIMIT`    | `gas_limit`        | no (estimated) |

use crate::error::RegistrarError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment};
use ethers::types::Address;
use ethers::utils::hex;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

/// Connection and signing settings for the on-chain registry.
///
/// The signer key is wiped from memory when the config is dropped.
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
pub struct RegistrarConfig {
    /// JSON-RPC endpoint of the Polygon node
    #[serde(rename = "url")]
    pub rpc_url: String,

    /// Address of the deployed DID registry contract
    #[serde(rename = "did_address")]
    pub registry_address: String,

    /// Hex-encoded private key of the account paying for `createDID`
    #[serde(rename = "private_key")]
    pub signer_key: String,

    /// `env_logger` filter, e.g. `debug` or `polygon_did_registrar=trace`
    #[serde(rename = "logger_level", default = "default_log_level")]
    pub log_level: String,

    /// Fixed gas limit for the registration transaction
    #[serde(default)]
    pub gas_limit: Option<u64>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl RegistrarConfig {
    pub fn new(rpc_url: &str, registry_address: &str, signer_key: &str) -> Self {
        RegistrarConfig {
            rpc_url: rpc_url.to_string(),
            registry_address: registry_address.to_string(),
            signer_key: signer_key.to_string(),
            log_level: default_log_level(),
            gas_limit: None,
        }
    }

    /// Loads `.env` (if any) and then the process environment.
    ///
    /// # Errors
    /// `Config` if a required variable is missing or a value fails validation.
    pub fn from_env() -> Result<Self, RegistrarError> {
        dotenv::dotenv().ok();
        Self::load(Config::builder().add_source(Environment::default()))
    }

    /// Builds and validates a config from any prepared source stack.
    pub fn load(builder: ConfigBuilder<DefaultState>) -> Result<Self, RegistrarError> {
        let config: RegistrarConfig = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RegistrarError> {
        if self.rpc_url.trim().is_empty() {
            return Err(RegistrarError::Config("rpc url is empty".to_string()));
        }
        self.registry_address()?;

        let key = hex::decode(self.signer_key.trim_start_matches("0x"))
            .map(Zeroizing::new)
            .map_err(|_| RegistrarError::Config("signer key is not valid hex".to_string()))?;
        if key.len() != 32 {
            return Err(RegistrarError::Config(format!(
                "signer key must be 32 bytes, got {}",
                key.len()
            )));
        }
        Ok(())
    }

    /// Parsed registry contract address.
    pub fn registry_address(&self) -> Result<Address, RegistrarError> {
        Address::from_str(&self.registry_address).map_err(|e| {
            RegistrarError::Config(format!(
                "invalid registry address {}: {}",
                self.registry_address, e
            ))
        })
    }
}

impl fmt::Debug for RegistrarConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistrarConfig")
            .field("rpc_url", &self.rpc_url)
            .field("registry_address", &self.registry_address)
            .field("signer_key", &"<redacted>")
            .field("log_level", &self.log_level)
            .field("gas_limit", &self.gas_limit)
            .finish()
    }
}
