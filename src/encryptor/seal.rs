//! src/encryptor/seal.rs
//! Producer side of the triple format

use crate::aliases::PasswordString;
use crate::consts::{CIPHERTEXT_SUFFIX, NONCE_SUFFIX, SALT_SUFFIX};
use crate::crypto::kdf::{derive_key, KdfParams};
use crate::crypto::rng::{random_nonce, random_salt};
use crate::crypto::secretbox;
use crate::error::UnsealError;

/// The three archive entries making up one bundle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SealedBundle {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub salt: Vec<u8>,
}

impl SealedBundle {
    /// `[base.crypt, base.nonce, base.salt]`
    pub fn entry_names(base_name: &str) -> [String; 3] {
        [
            format!("{base_name}{CIPHERTEXT_SUFFIX}"),
            format!("{base_name}{NONCE_SUFFIX}"),
            format!("{base_name}{SALT_SUFFIX}"),
        ]
    }

    /// Entry `(name, bytes)` pairs for `base_name`, ready to drop into an archive.
    pub fn into_entries(self, base_name: &str) -> [(String, Vec<u8>); 3] {
        let [crypt, nonce, salt] = Self::entry_names(base_name);
        [
            (crypt, self.ciphertext),
            (nonce, self.nonce),
            (salt, self.salt),
        ]
    }
}

/// Encrypt `plaintext` under `password` with a fresh salt and nonce.
pub fn seal_bundle(
    plaintext: &[u8],
    password: &PasswordString,
    kdf: &KdfParams,
) -> Result<SealedBundle, UnsealError> {
    let salt = random_salt()?;
    let nonce = random_nonce()?;
    let key = derive_key(password, &salt, kdf)?;
    let ciphertext = secretbox::seal(plaintext, &nonce, &key)?;

    Ok(SealedBundle {
        ciphertext,
        nonce: nonce.expose_secret().to_vec(),
        salt: salt.expose_secret().to_vec(),
    })
}
