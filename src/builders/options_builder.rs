//! src/builders/options_builder.rs
//! Run configuration for the unseal pipeline

use crate::crypto::kdf::KdfParams;
use crate::resolver::DuplicatePolicy;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared cancellation flag, checked before each triple.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Everything a run needs besides its four capabilities.
#[derive(Debug, Clone, Default)]
pub struct UnsealOptions {
    pub kdf: KdfParams,
    pub duplicate_policy: DuplicatePolicy,
    pub cancel: Option<CancelFlag>,
}

impl UnsealOptions {
    pub fn builder() -> UnsealOptionsBuilder {
        UnsealOptionsBuilder::new()
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

/// Builder for [`UnsealOptions`]
///
/// Defaults: Argon2id interactive profile, last-write-wins duplicates, no
/// cancellation.
///
/// # Thread Safety
///
/// The built options are `Send + Sync`; a [`CancelFlag`] clone can be raised
/// from another thread while a run is in progress.
#[derive(Debug, Clone, Default)]
pub struct UnsealOptionsBuilder {
    options: UnsealOptions,
}

impl UnsealOptionsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_kdf(mut self, kdf: KdfParams) -> Self {
        self.options.kdf = kdf;
        self
    }

    /// PBKDF2-HMAC-SHA512 with `iterations` (minimum 1)
    #[must_use]
    pub fn with_pbkdf2(self, iterations: u32) -> Self {
        self.with_kdf(KdfParams::Pbkdf2Sha512 {
            iterations: iterations.max(1),
        })
    }

    #[must_use]
    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.options.duplicate_policy = policy;
        self
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.options.cancel = Some(flag);
        self
    }

    #[must_use]
    pub fn build(self) -> UnsealOptions {
        self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let options = UnsealOptions::builder().build();
        assert_eq!(options.kdf, KdfParams::argon2id_interactive());
        assert_eq!(options.duplicate_policy, DuplicatePolicy::LastWriteWins);
        assert!(!options.is_cancelled());
    }

    #[test]
    fn pbkdf2_iterations_clamped() {
        let options = UnsealOptions::builder().with_pbkdf2(0).build();
        assert_eq!(options.kdf, KdfParams::Pbkdf2Sha512 { iterations: 1 });
    }

    #[test]
    fn cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let options = UnsealOptions::builder()
            .with_cancel_flag(flag.clone())
            .with_duplicate_policy(DuplicatePolicy::Reject)
            .build();
        assert!(!options.is_cancelled());
        flag.cancel();
        assert!(options.is_cancelled());
    }
}
