// src/lib.rs

//! Decrypts password-protected asset bundles stored as
//! `(name.crypt, name.nonce, name.salt)` entry triples inside an archive,
//! and hands each plaintext to a host registration sink.

pub mod aliases;
pub mod boundary;
pub mod builders;
pub mod consts;
pub mod crypto;
pub mod decryptor;
pub mod diagnostics;
pub mod encryptor;
pub mod error;
pub mod resolver;

// High-level API
pub use decryptor::{RunReport, TripleOutcome, Unsealer};
pub use encryptor::{seal_bundle, SealedBundle};
pub use error::UnsealError;

pub use aliases::PasswordString;
pub use boundary::{
    ArchiveReader, BundleCollector, FixedPassword, MemoryArchive, PasswordProvider,
    RegistrationSink,
};
pub use builders::options_builder::{CancelFlag, UnsealOptions, UnsealOptionsBuilder};
pub use crypto::kdf::{derive_key, KdfParams};
pub use diagnostics::{Diagnostic, DiagnosticSink, LogSink, MemorySink, Severity};
pub use resolver::{resolve, AssetTriple, DuplicatePolicy, TripleRole, TripleTable};
