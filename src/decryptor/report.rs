//! src/decryptor/report.rs
//! Per-triple outcomes and the run summary

use crate::error::UnsealError;
use std::fmt;

/// Terminal state of one triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TripleOutcome {
    /// Decrypted and accepted by the registration sink.
    Registered,
    /// An entry was missing or unreadable. Local.
    FetchFailed,
    /// Password or KDF failure. Halts the run.
    DeriveFailed,
    /// Authentication failure. Halts the run.
    DecryptFailed,
    /// The sink rejected the plaintext. Local.
    RegisterFailed,
    /// Unclassified failure. Halts the run.
    Errored,
    /// Skipped because the cancel flag was raised.
    Cancelled,
    /// Skipped because an earlier triple halted the run.
    NotAttempted,
}

impl TripleOutcome {
    /// Outcome for a triple that stopped with `err`.
    pub fn from_error(err: &UnsealError) -> Self {
        match err {
            UnsealError::Fetch { .. } => TripleOutcome::FetchFailed,
            UnsealError::PasswordMissing | UnsealError::KeyDerivation(_) => {
                TripleOutcome::DeriveFailed
            }
            UnsealError::Authentication(_) => TripleOutcome::DecryptFailed,
            UnsealError::Registration(_) => TripleOutcome::RegisterFailed,
            UnsealError::Cancelled => TripleOutcome::Cancelled,
            UnsealError::Unexpected(_) => TripleOutcome::Errored,
        }
    }

    pub fn is_failure(self) -> bool {
        !matches!(
            self,
            TripleOutcome::Registered | TripleOutcome::Cancelled | TripleOutcome::NotAttempted
        )
    }
}

impl fmt::Display for TripleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TripleOutcome::Registered => "registered",
            TripleOutcome::FetchFailed => "fetch failed",
            TripleOutcome::DeriveFailed => "key derivation failed",
            TripleOutcome::DecryptFailed => "decryption failed",
            TripleOutcome::RegisterFailed => "registration failed",
            TripleOutcome::Errored => "unexpected error",
            TripleOutcome::Cancelled => "cancelled",
            TripleOutcome::NotAttempted => "not attempted",
        })
    }
}

/// What happened during one run, in processing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    outcomes: Vec<(String, TripleOutcome)>,
    halted: Option<UnsealError>,
}

impl RunReport {
    pub(crate) fn record(&mut self, base_name: &str, outcome: TripleOutcome) {
        self.outcomes.push((base_name.to_owned(), outcome));
    }

    pub(crate) fn halt(&mut self, err: UnsealError) {
        self.halted = Some(err);
    }

    /// Overwrite the outcome of the most recently recorded triple.
    pub(crate) fn settle(&mut self, outcome: TripleOutcome) {
        if let Some((_, last)) = self.outcomes.last_mut() {
            *last = outcome;
        }
    }

    pub fn outcomes(&self) -> &[(String, TripleOutcome)] {
        &self.outcomes
    }

    pub fn outcome(&self, base_name: &str) -> Option<TripleOutcome> {
        self.outcomes
            .iter()
            .find(|(name, _)| name == base_name)
            .map(|(_, outcome)| *outcome)
    }

    /// The fatal error that stopped the run early, if any.
    pub fn halted(&self) -> Option<&UnsealError> {
        self.halted.as_ref()
    }

    /// `true` unless a fatal error or cancellation cut the run short.
    pub fn is_complete(&self) -> bool {
        self.halted.is_none()
    }

    pub fn registered(&self) -> usize {
        self.count(|o| o == TripleOutcome::Registered)
    }

    pub fn failed(&self) -> usize {
        self.count(TripleOutcome::is_failure)
    }

    fn count(&self, pred: impl Fn(TripleOutcome) -> bool) -> usize {
        self.outcomes.iter().filter(|(_, o)| pred(*o)).count()
    }
}
