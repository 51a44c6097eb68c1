//! tests/common.rs
//! Shared fixtures for the integration tests

use bundle_unseal::{
    seal_bundle, BundleCollector, FixedPassword, KdfParams, MemoryArchive, MemorySink,
    PasswordString, RegistrationSink, UnsealOptions, Unsealer,
};

/// Cheap KDF so tests stay fast - cost tuning lives in benches/
#[allow(dead_code)]
pub const TEST_KDF: KdfParams = KdfParams::Pbkdf2Sha512 { iterations: 5 };

/// Cheapest Argon2id the `argon2` crate accepts for one lane
#[allow(dead_code)]
pub const TEST_ARGON2: KdfParams = KdfParams::Argon2id {
    memory_kib: 64,
    iterations: 1,
    parallelism: 1,
};

#[allow(dead_code)]
pub const TEST_PASSWORD: &str = "Hello";

/// Archive holding one sealed triple per `(base, plaintext)`
#[allow(dead_code)]
pub fn sealed_archive(password: &str, kdf: &KdfParams, bundles: &[(&str, &[u8])]) -> MemoryArchive {
    let password = PasswordString::new(password.to_string());
    let mut archive = MemoryArchive::new();
    for (base, plaintext) in bundles {
        let sealed = seal_bundle(plaintext, &password, kdf).expect("sealing test bundle");
        for (name, bytes) in sealed.into_entries(base) {
            archive.insert(name, bytes);
        }
    }
    archive
}

#[allow(dead_code)]
pub fn test_unsealer<R: RegistrationSink>(
    archive: MemoryArchive,
    password: &str,
    registrar: R,
) -> Unsealer<MemoryArchive, FixedPassword, R, MemorySink> {
    Unsealer::new(
        archive,
        FixedPassword::new(password),
        registrar,
        MemorySink::new(),
    )
    .with_options(UnsealOptions::builder().with_kdf(TEST_KDF).build())
}

#[allow(dead_code)]
pub fn collecting_unsealer(
    archive: MemoryArchive,
    password: &str,
) -> Unsealer<MemoryArchive, FixedPassword, BundleCollector, MemorySink> {
    test_unsealer(archive, password, BundleCollector::new())
}
