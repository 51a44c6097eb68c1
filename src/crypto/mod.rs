// src/crypto/mod.rs

//! Low-level crypto primitives: password KDFs, the secretbox AEAD, and the OS RNG.
//!
//! The pipeline only needs [`kdf::derive_key`] and [`secretbox::open`]; the rest
//! is exposed for custom producers and tests.

pub mod kdf;
pub mod rng;
pub mod secretbox;
