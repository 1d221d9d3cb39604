// src/services/mod.rs
pub mod registrar;
