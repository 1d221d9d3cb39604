// src/error.rs
//! Error taxonomy for the DID registration pipeline.
//!
//! Every stage of the pipeline returns `Result<_, RegistrarError>`. Errors are
//! logged where they originate and handed to the caller untouched; nothing in
//! this crate retries or recovers.

use thiserror::Error;

/// Failures that abort a DID registration.
#[derive(Debug, Error)]
pub enum RegistrarError {
    /// Entropy could not be drawn or the key material could not be encoded.
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    /// The DID Document could not be serialized to its wire form.
    #[error("DID document construction failed: {0}")]
    DocumentConstruction(#[from] serde_json::Error),

    /// The `createDID` call failed: transport error, contract revert, or a
    /// transaction that never produced a receipt.
    #[error("registry submission failed: {0}")]
    RegistrySubmission(String),

    /// Missing or malformed configuration, or the signer could not be set up.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl RegistrarError {
    /// Name of the pipeline stage this error belongs to, used in log lines.
    pub fn stage(&self) -> &'static str {
        match self {
            RegistrarError::KeyGeneration(_) => "key generation",
            RegistrarError::DocumentConstruction(_) => "document construction",
            RegistrarError::RegistrySubmission(_) => "registry submission",
            RegistrarError::Config(_) => "configuration",
        }
    }
}

impl From<config::ConfigError> for RegistrarError {
    fn from(err: config::ConfigError) -> Self {
        RegistrarError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_stage() {
        let err = RegistrarError::RegistrySubmission("execution reverted".to_string());
        assert_eq!(err.to_string(), "registry submission failed: execution reverted");
        assert_eq!(err.stage(), "registry submission");
    }

    #[test]
    fn test_serde_error_maps_to_document_construction() {
        let serde_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: RegistrarError = serde_err.into();
        assert!(matches!(err, RegistrarError::DocumentConstruction(_)));
    }
}
