//! src/decryptor/material.rs
//! Fetching and unlocking the byte buffers of one triple

use crate::aliases::PasswordString;
use crate::boundary::ArchiveReader;
use crate::crypto::kdf::{derive_key, salt_from_bytes, KdfParams};
use crate::crypto::secretbox::{self, nonce_from_bytes};
use crate::error::UnsealError;
use crate::resolver::{AssetTriple, TripleRole};

/// Raw ciphertext, nonce and salt of one bundle. Dropped as soon as the
/// triple has been processed.
pub struct CipherMaterial {
    pub ciphertext: Vec<u8>,
    pub nonce: Vec<u8>,
    pub salt: Vec<u8>,
}

fn fetch_role<A>(reader: &mut A, triple: &AssetTriple, role: TripleRole) -> Result<Vec<u8>, UnsealError>
where
    A: ArchiveReader + ?Sized,
{
    let entry = triple
        .name(role)
        .ok_or_else(|| UnsealError::Fetch {
            entry: format!("{}{}", triple.base_name(), role.suffix()),
            reason: "triple has no entry for this role".into(),
        })?;

    match reader.fetch_bytes(entry) {
        Ok(Some(bytes)) if !bytes.is_empty() => Ok(bytes),
        Ok(Some(_)) => Err(UnsealError::Fetch {
            entry: entry.to_owned(),
            reason: "entry is empty".into(),
        }),
        Ok(None) => Err(UnsealError::Fetch {
            entry: entry.to_owned(),
            reason: "entry not found".into(),
        }),
        Err(e) => Err(UnsealError::Fetch {
            entry: entry.to_owned(),
            reason: e.to_string(),
        }),
    }
}

/// Pull all three buffers of `triple` from the archive.
///
/// Stops at the first entry that cannot be read.
pub fn fetch_material<A>(reader: &mut A, triple: &AssetTriple) -> Result<CipherMaterial, UnsealError>
where
    A: ArchiveReader + ?Sized,
{
    Ok(CipherMaterial {
        ciphertext: fetch_role(reader, triple, TripleRole::Ciphertext)?,
        nonce: fetch_role(reader, triple, TripleRole::Nonce)?,
        salt: fetch_role(reader, triple, TripleRole::Salt)?,
    })
}

/// Derive the bundle key and open the secretbox.
///
/// Salt problems surface as [`UnsealError::KeyDerivation`], nonce and tag
/// problems as [`UnsealError::Authentication`]. Both buffer lengths are
/// checked before the key derivation runs.
pub fn open_material(
    material: &CipherMaterial,
    password: &PasswordString,
    kdf: &KdfParams,
) -> Result<Vec<u8>, UnsealError> {
    let salt = salt_from_bytes(&material.salt)?;
    let nonce = nonce_from_bytes(&material.nonce)?;
    let key = derive_key(password, &salt, kdf)?;
    secretbox::open(&material.ciphertext, &nonce, &key)
}
