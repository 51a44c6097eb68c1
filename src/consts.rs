//! # Constants
//!
//! Entry-name suffixes, primitive sizes, and key derivation bounds used
//! throughout the library.

/// Suffix marking the ciphertext entry of a bundle.
pub const CIPHERTEXT_SUFFIX: &str = ".crypt";

/// Suffix marking the nonce entry of a bundle.
pub const NONCE_SUFFIX: &str = ".nonce";

/// Suffix marking the salt entry of a bundle.
pub const SALT_SUFFIX: &str = ".salt";

/// Derived key length in bytes (XSalsa20-Poly1305 key).
pub const KEY_SIZE: usize = 32;

/// Nonce length in bytes (XSalsa20 extended nonce).
pub const NONCE_SIZE: usize = 24;

/// Salt length in bytes, matching libsodium `crypto_pwhash_SALTBYTES`.
pub const SALT_SIZE: usize = 16;

/// Poly1305 tag length. Every valid ciphertext is at least this long.
pub const TAG_SIZE: usize = 16;

/// Argon2id memory cost in KiB (libsodium INTERACTIVE profile, 64 MiB).
pub const DEFAULT_ARGON2_MEMORY_KIB: u32 = 64 * 1024;

/// Argon2id pass count (libsodium INTERACTIVE profile).
pub const DEFAULT_ARGON2_ITERATIONS: u32 = 2;

/// Argon2id lane count. libsodium always uses a single lane.
pub const DEFAULT_ARGON2_PARALLELISM: u32 = 1;

/// Minimum allowed PBKDF2 iteration count.
pub const PBKDF2_MIN_ITER: u32 = 1;

/// Maximum allowed PBKDF2 iteration count (5 million).
pub const PBKDF2_MAX_ITER: u32 = 5_000_000;

/// Recommended PBKDF2 iteration count.
/// Provides ~0.1–0.3s on modern hardware.
pub const DEFAULT_PBKDF2_ITERATIONS: u32 = 300_000;
