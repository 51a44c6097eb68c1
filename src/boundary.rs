//! # Host Boundaries
//!
//! The pipeline never touches the host directly. The archive, the password
//! prompt and the asset registry are injected as the traits below, so the same
//! code runs against an interactive host or against in-memory doubles.
//!
//! Closures implement each trait, and ready-made implementations are provided:
//! [`MemoryArchive`], [`FixedPassword`], [`BundleCollector`].

use crate::aliases::PasswordString;
use std::io;

/// Source of raw archive entry bytes.
pub trait ArchiveReader {
    /// Fetch the bytes of `entry`.
    ///
    /// `Ok(None)` means the entry does not exist. An empty buffer is treated
    /// the same as a missing entry by the pipeline.
    fn fetch_bytes(&mut self, entry: &str) -> io::Result<Option<Vec<u8>>>;
}

impl<F> ArchiveReader for F
where
    F: FnMut(&str) -> io::Result<Option<Vec<u8>>>,
{
    fn fetch_bytes(&mut self, entry: &str) -> io::Result<Option<Vec<u8>>> {
        self(entry)
    }
}

/// Where the password comes from: an interactive prompt or a fixed value.
pub trait PasswordProvider {
    /// `None` (or an empty password) aborts the run before any bundle is touched.
    fn prompt_password(&mut self) -> Option<PasswordString>;
}

impl<F> PasswordProvider for F
where
    F: FnMut() -> Option<PasswordString>,
{
    fn prompt_password(&mut self) -> Option<PasswordString> {
        self()
    }
}

/// Receives decrypted bundles. Ownership of the bytes moves to the sink.
pub trait RegistrationSink {
    /// Returns `false` when the host rejects the content (malformed, duplicate, ...).
    fn register_bundle(&mut self, base_name: &str, bytes: Vec<u8>) -> bool;
}

impl<F> RegistrationSink for F
where
    F: FnMut(&str, Vec<u8>) -> bool,
{
    fn register_bundle(&mut self, base_name: &str, bytes: Vec<u8>) -> bool {
        self(base_name, bytes)
    }
}

/// In-memory archive keeping entries in insertion order.
///
/// Every lookup is recorded in [`fetched`](Self::fetched), which makes it easy
/// to audit which entries a run actually touched.
#[derive(Debug, Default, Clone)]
pub struct MemoryArchive {
    entries: Vec<(String, Vec<u8>)>,
    fetched: Vec<String>,
}

impl MemoryArchive {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entry.
    pub fn insert(&mut self, name: impl Into<String>, bytes: impl Into<Vec<u8>>) {
        let name = name.into();
        let bytes = bytes.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = bytes,
            None => self.entries.push((name, bytes)),
        }
    }

    /// Remove an entry, returning its bytes.
    pub fn remove(&mut self, name: &str) -> Option<Vec<u8>> {
        let idx = self.entries.iter().position(|(n, _)| n == name)?;
        Some(self.entries.remove(idx).1)
    }

    /// Mutable access to an entry, for tampering in tests.
    pub fn get_mut(&mut self, name: &str) -> Option<&mut Vec<u8>> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, bytes)| bytes)
    }

    /// Entry names in insertion order.
    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|(n, _)| n.clone()).collect()
    }

    /// Every entry name passed to `fetch_bytes`, in call order.
    pub fn fetched(&self) -> &[String] {
        &self.fetched
    }
}

impl ArchiveReader for MemoryArchive {
    fn fetch_bytes(&mut self, entry: &str) -> io::Result<Option<Vec<u8>>> {
        self.fetched.push(entry.to_owned());
        Ok(self
            .entries
            .iter()
            .find(|(n, _)| n == entry)
            .map(|(_, bytes)| bytes.clone()))
    }
}

/// Programmatic password source. Hands out the same password on every prompt.
#[derive(Clone)]
pub struct FixedPassword {
    password: Option<PasswordString>,
    prompts: usize,
}

impl FixedPassword {
    pub fn new(password: impl Into<String>) -> Self {
        Self {
            password: Some(PasswordString::new(password.into())),
            prompts: 0,
        }
    }

    /// A provider that never yields a password (cancelled dialog).
    pub fn absent() -> Self {
        Self {
            password: None,
            prompts: 0,
        }
    }

    /// How many times the pipeline asked for the password.
    pub fn prompts(&self) -> usize {
        self.prompts
    }
}

impl PasswordProvider for FixedPassword {
    fn prompt_password(&mut self) -> Option<PasswordString> {
        self.prompts += 1;
        self.password.clone()
    }
}

/// Registration sink that accepts everything and keeps it.
#[derive(Debug, Default, Clone)]
pub struct BundleCollector {
    pub bundles: Vec<(String, Vec<u8>)>,
}

impl BundleCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes registered under `base_name`, if any.
    pub fn get(&self, base_name: &str) -> Option<&[u8]> {
        self.bundles
            .iter()
            .find(|(n, _)| n == base_name)
            .map(|(_, b)| b.as_slice())
    }
}

impl RegistrationSink for BundleCollector {
    fn register_bundle(&mut self, base_name: &str, bytes: Vec<u8>) -> bool {
        self.bundles.push((base_name.to_owned(), bytes));
        true
    }
}
