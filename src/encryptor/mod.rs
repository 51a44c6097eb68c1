// src/encryptor/mod.rs

//! Sealing facade.
//!
//! Core API: `seal_bundle(plaintext, &password, &kdf)?` producing the three
//! archive entries the pipeline later consumes.

pub(crate) mod seal;

pub use seal::{seal_bundle, SealedBundle};
