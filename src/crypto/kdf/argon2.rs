//! src/crypto/kdf/argon2.rs
//! Argon2id v1.3, byte-compatible with libsodium `crypto_pwhash` (ALG_ARGON2ID13)

use crate::aliases::{Key32, PasswordString, Salt16};
use crate::consts::KEY_SIZE;
use crate::UnsealError;

use argon2::{Algorithm, Argon2, Params, Version};

/// Derive an Argon2id key directly into a Key32 buffer
///
/// `memory_kib` is the memory cost in KiB. libsodium's `memlimit` is in bytes,
/// so `memlimit / 1024` gives the same key.
#[inline(always)]
pub fn derive_secure_argon2id_key(
    password: &PasswordString,
    salt: &Salt16,
    memory_kib: u32,
    iterations: u32,
    parallelism: u32,
    out_key: &mut Key32,
) -> Result<(), UnsealError> {
    let params = Params::new(memory_kib, iterations, parallelism, Some(KEY_SIZE))
        .map_err(|e| UnsealError::KeyDerivation(format!("invalid Argon2id parameters: {e}")))?;

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password_into(
            password.expose_secret().as_bytes(),
            salt.expose_secret(),
            out_key.expose_secret_mut(),
        )
        .map_err(|e| UnsealError::KeyDerivation(format!("Argon2id failed: {e}")))?;
    Ok(())
}
