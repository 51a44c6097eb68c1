//! NaCl secretbox (XSalsa20-Poly1305).
//!
//! Ciphertext layout is libsodium's `crypto_secretbox_easy`: the 16-byte
//! Poly1305 tag followed by the encrypted payload.

use crate::aliases::{Key32, Nonce24};
use crate::consts::{NONCE_SIZE, TAG_SIZE};
use crate::error::UnsealError;

use crypto_secretbox::aead::generic_array::GenericArray;
use crypto_secretbox::aead::{Aead, KeyInit};
use crypto_secretbox::XSalsa20Poly1305;

/// Validate a raw nonce buffer fetched from an archive.
///
/// A nonce of the wrong size can never authenticate, so it is reported as an
/// authentication failure.
pub fn nonce_from_bytes(bytes: &[u8]) -> Result<Nonce24, UnsealError> {
    let nonce: [u8; NONCE_SIZE] = bytes.try_into().map_err(|_| {
        UnsealError::Authentication(format!(
            "nonce must be {NONCE_SIZE} bytes, got {}",
            bytes.len()
        ))
    })?;
    Ok(Nonce24::new(nonce))
}

fn cipher(key: &Key32) -> Result<XSalsa20Poly1305, UnsealError> {
    XSalsa20Poly1305::new_from_slice(key.expose_secret())
        .map_err(|_| UnsealError::Unexpected("secretbox key has wrong length".into()))
}

/// Authenticated decryption. Tampered input or a wrong key yields
/// [`UnsealError::Authentication`], never garbage plaintext.
pub fn open(ciphertext: &[u8], nonce: &Nonce24, key: &Key32) -> Result<Vec<u8>, UnsealError> {
    if ciphertext.len() < TAG_SIZE {
        return Err(UnsealError::Authentication(format!(
            "ciphertext shorter than the {TAG_SIZE}-byte tag ({} bytes)",
            ciphertext.len()
        )));
    }

    cipher(key)?
        .decrypt(GenericArray::from_slice(nonce.expose_secret()), ciphertext)
        .map_err(|_| UnsealError::Authentication("secretbox tag mismatch".into()))
}

/// Authenticated encryption, output is `tag || ciphertext`.
pub fn seal(plaintext: &[u8], nonce: &Nonce24, key: &Key32) -> Result<Vec<u8>, UnsealError> {
    cipher(key)?
        .encrypt(GenericArray::from_slice(nonce.expose_secret()), plaintext)
        .map_err(|_| UnsealError::Unexpected("secretbox encryption failed".into()))
}
