//! src/crypto/kdf/pbkdf2.rs

use crate::aliases::{HmacSha512, Key32, PasswordString, Salt16};
use crate::consts::{PBKDF2_MAX_ITER, PBKDF2_MIN_ITER};
use crate::UnsealError;

use pbkdf2::pbkdf2;

/// Derive PBKDF2-HMAC-SHA512 directly into a Key32 buffer
///
/// Iterations must lie in `PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER`.
#[inline(always)]
pub fn derive_secure_pbkdf2_key(
    password: &PasswordString,
    salt: &Salt16,
    iterations: u32,
    out_key: &mut Key32,
) -> Result<(), UnsealError> {
    if !(PBKDF2_MIN_ITER..=PBKDF2_MAX_ITER).contains(&iterations) {
        return Err(UnsealError::KeyDerivation(format!(
            "PBKDF2 iterations out of range: {iterations}"
        )));
    }

    pbkdf2::<HmacSha512>(
        password.expose_secret().as_bytes(),
        salt.expose_secret(),
        iterations,
        out_key.expose_secret_mut(),
    )
    .map_err(|e| UnsealError::KeyDerivation(format!("PBKDF2 failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_and_excessive_iterations() {
        let password = PasswordString::new("pw".to_string());
        let salt = Salt16::new([0u8; 16]);
        let mut key = Key32::new([0u8; 32]);

        for bad in [0, PBKDF2_MAX_ITER + 1] {
            let err = derive_secure_pbkdf2_key(&password, &salt, bad, &mut key).unwrap_err();
            assert!(matches!(err, UnsealError::KeyDerivation(_)));
        }
    }

    #[test]
    fn iterations_change_key() {
        let password = PasswordString::new("pw".to_string());
        let salt = Salt16::new([7u8; 16]);
        let mut one = Key32::new([0u8; 32]);
        let mut two = Key32::new([0u8; 32]);
        derive_secure_pbkdf2_key(&password, &salt, 1, &mut one).unwrap();
        derive_secure_pbkdf2_key(&password, &salt, 2, &mut two).unwrap();
        assert_ne!(one.expose_secret(), two.expose_secret());
        assert_ne!(one.expose_secret(), &[0u8; 32]);
    }
}
