// src/crypto/rng.rs
//! Fresh salts and nonces for sealing, straight from the OS RNG.

use crate::aliases::{Nonce24, Salt16};
use crate::consts::{NONCE_SIZE, SALT_SIZE};
use crate::error::UnsealError;
use rand::{rngs::OsRng, TryRngCore};

/// Fill a fixed-size buffer from the OS RNG.
#[inline(always)]
pub fn random_array<const N: usize>() -> Result<[u8; N], UnsealError> {
    let mut bytes = [0u8; N];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| UnsealError::Unexpected(format!("OS RNG failure: {e}")))?;
    Ok(bytes)
}

/// Random 16-byte KDF salt.
pub fn random_salt() -> Result<Salt16, UnsealError> {
    Ok(Salt16::new(random_array::<SALT_SIZE>()?))
}

/// Random 24-byte secretbox nonce.
pub fn random_nonce() -> Result<Nonce24, UnsealError> {
    Ok(Nonce24::new(random_array::<NONCE_SIZE>()?))
}
