//! # Error Types
//!
//! Every failure the pipeline can hit is an [`UnsealError`]. Whether the run
//! keeps going after one is decided by [`UnsealError::is_fatal`].

use thiserror::Error;

/// The error type for all unseal operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnsealError {
    /// An archive entry of a triple was missing, empty, or unreadable.
    ///
    /// Local to one bundle: the run moves on to the next triple.
    #[error("cannot get file from archive [{entry}]: {reason}")]
    Fetch { entry: String, reason: String },

    /// No password was supplied (provider returned nothing or an empty string).
    #[error("no password supplied")]
    PasswordMissing,

    /// Key derivation failed: bad salt length, invalid KDF parameters, or an
    /// internal KDF failure.
    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    /// The secretbox integrity check rejected the ciphertext.
    ///
    /// Either the password is wrong or the ciphertext/nonce was tampered with.
    #[error("decryption failed, wrong password or corrupted data: {0}")]
    Authentication(String),

    /// The registration sink rejected a successfully decrypted bundle.
    #[error("cannot register decrypted bundle [{0}]")]
    Registration(String),

    /// The caller raised the cancel flag between triples.
    #[error("run cancelled")]
    Cancelled,

    /// Anything else, including panics raised by host capabilities.
    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl UnsealError {
    /// `true` when the error invalidates every remaining triple.
    ///
    /// A bad password or a broken KDF would fail identically on every bundle,
    /// so those halt the run. Fetch and registration problems stay local.
    pub fn is_fatal(&self) -> bool {
        match self {
            UnsealError::Fetch { .. } | UnsealError::Registration(_) => false,
            UnsealError::PasswordMissing
            | UnsealError::KeyDerivation(_)
            | UnsealError::Authentication(_)
            | UnsealError::Cancelled
            | UnsealError::Unexpected(_) => true,
        }
    }
}
