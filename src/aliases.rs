//! # Secret Type Aliases
//!
//! Secret-bearing buffers used by the unseal pipeline, built on
//! [`secrecy::SecretBox`]. Every type here is zeroized on drop, prints as
//! redacted in `Debug`, and requires an explicit `.expose_secret()` to read.
//!
//! - [`PasswordString`] - password handed over by a [`PasswordProvider`](crate::PasswordProvider)
//! - [`Key32`] - XSalsa20-Poly1305 key derived from password + salt
//! - [`Salt16`] - per-bundle KDF salt
//! - [`Nonce24`] - per-bundle secretbox nonce

use secrecy::{ExposeSecret, ExposeSecretMut, SecretBox, SecretString};

use hmac::Hmac;
use sha2::Sha512;

/// PRF used by the PBKDF2 derivation path.
pub type HmacSha512 = Hmac<Sha512>;

// ─────────────────────────────────────────────────────────────────────────────
// Dynamic secrets
// ─────────────────────────────────────────────────────────────────────────────

/// Password wrapper. Cloning copies the secret into a fresh zeroizing box.
#[derive(Debug, Clone)]
pub struct PasswordString(SecretString);

impl PasswordString {
    pub fn new(password: String) -> Self {
        Self(SecretString::from(password))
    }

    pub fn expose_secret(&self) -> &str {
        self.0.expose_secret()
    }
}

impl From<&str> for PasswordString {
    fn from(password: &str) -> Self {
        Self(SecretString::from(password))
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Fixed-size secrets
// ─────────────────────────────────────────────────────────────────────────────

macro_rules! fixed_secret {
    ($(#[$meta:meta])* $name:ident, $size:literal) => {
        $(#[$meta])*
        #[derive(Debug)]
        pub struct $name(SecretBox<[u8; $size]>);

        impl $name {
            pub fn new(bytes: [u8; $size]) -> Self {
                Self(SecretBox::new(Box::new(bytes)))
            }

            pub fn expose_secret(&self) -> &[u8; $size] {
                self.0.expose_secret()
            }

            pub fn expose_secret_mut(&mut self) -> &mut [u8; $size] {
                self.0.expose_secret_mut()
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self::new(bytes)
            }
        }
    };
}

fixed_secret!(
    /// Derived secretbox key.
    Key32,
    32
);
fixed_secret!(
    /// Secretbox nonce.
    Nonce24,
    24
);
fixed_secret!(
    /// KDF salt.
    Salt16,
    16
);
