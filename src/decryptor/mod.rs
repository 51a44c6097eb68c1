// src/decryptor/mod.rs

//! High-level unseal facade.
//!
//! Core API: [`Unsealer::run`] for the full pipeline over an archive listing.
//! Helpers: [`fetch_material`], [`open_material`] for custom flows.

pub(crate) mod material;
pub(crate) mod report;
pub(crate) mod unsealer;

pub use material::{fetch_material, open_material, CipherMaterial};
pub use report::{RunReport, TripleOutcome};
pub use unsealer::Unsealer;
