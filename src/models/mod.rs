// src/models/mod.rs
pub mod did;
