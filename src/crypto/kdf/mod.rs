//! # Key Derivation Functions (KDF)
//!
//! Turns a password and a per-bundle salt into a 32-byte secretbox key.
//!
//! - [`argon2`] - Argon2id v1.3 (libsodium `crypto_pwhash` compatible, the default)
//! - [`pbkdf2`] - PBKDF2-HMAC-SHA512

pub mod argon2;
pub mod pbkdf2;

use crate::aliases::{Key32, PasswordString, Salt16};
use crate::consts::{
    DEFAULT_ARGON2_ITERATIONS, DEFAULT_ARGON2_MEMORY_KIB, DEFAULT_ARGON2_PARALLELISM,
    DEFAULT_PBKDF2_ITERATIONS, KEY_SIZE, SALT_SIZE,
};
use crate::error::UnsealError;

pub use self::argon2::derive_secure_argon2id_key;
pub use self::pbkdf2::derive_secure_pbkdf2_key;

/// Which KDF to run, with its cost parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KdfParams {
    Argon2id {
        memory_kib: u32,
        iterations: u32,
        parallelism: u32,
    },
    Pbkdf2Sha512 {
        iterations: u32,
    },
}

impl KdfParams {
    /// libsodium INTERACTIVE profile: 64 MiB, 2 passes, 1 lane.
    pub const fn argon2id_interactive() -> Self {
        KdfParams::Argon2id {
            memory_kib: DEFAULT_ARGON2_MEMORY_KIB,
            iterations: DEFAULT_ARGON2_ITERATIONS,
            parallelism: DEFAULT_ARGON2_PARALLELISM,
        }
    }

    pub const fn pbkdf2_default() -> Self {
        KdfParams::Pbkdf2Sha512 {
            iterations: DEFAULT_PBKDF2_ITERATIONS,
        }
    }
}

impl Default for KdfParams {
    fn default() -> Self {
        Self::argon2id_interactive()
    }
}

/// Validate a raw salt buffer fetched from an archive.
pub fn salt_from_bytes(bytes: &[u8]) -> Result<Salt16, UnsealError> {
    let salt: [u8; SALT_SIZE] = bytes.try_into().map_err(|_| {
        UnsealError::KeyDerivation(format!(
            "salt must be {SALT_SIZE} bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(Salt16::new(salt))
}

/// Derive the secretbox key for one bundle.
///
/// Deterministic in `(password, salt, params)`. An empty password is refused
/// rather than stretched.
pub fn derive_key(
    password: &PasswordString,
    salt: &Salt16,
    params: &KdfParams,
) -> Result<Key32, UnsealError> {
    if password.expose_secret().is_empty() {
        return Err(UnsealError::PasswordMissing);
    }

    let mut key = Key32::new([0u8; KEY_SIZE]);
    match *params {
        KdfParams::Argon2id {
            memory_kib,
            iterations,
            parallelism,
        } => derive_secure_argon2id_key(
            password,
            salt,
            memory_kib,
            iterations,
            parallelism,
            &mut key,
        )?,
        KdfParams::Pbkdf2Sha512 { iterations } => {
            derive_secure_pbkdf2_key(password, salt, iterations, &mut key)?
        }
    }
    Ok(key)
}
