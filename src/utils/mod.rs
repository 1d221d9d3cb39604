// src/utils/mod.rs
//! Helper functions shared across the pipeline.

pub mod crypto;
pub mod serialization;
