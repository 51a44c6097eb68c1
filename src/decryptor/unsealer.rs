//! src/decryptor/unsealer.rs
//! The unseal pipeline: resolve → password → per triple fetch, derive, open, register

use crate::aliases::PasswordString;
use crate::boundary::{ArchiveReader, PasswordProvider, RegistrationSink};
use crate::builders::options_builder::UnsealOptions;
use crate::decryptor::material::{fetch_material, open_material};
use crate::decryptor::report::{RunReport, TripleOutcome};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use crate::error::UnsealError;
use crate::resolver::{resolve, AssetTriple, TripleTable};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

/// Decrypts every complete triple of an archive and hands the plaintext to a
/// registration sink.
///
/// Triples are processed one at a time, in table order. Fetch and registration
/// failures only affect their own triple; a missing password, a KDF failure or
/// an authentication failure stops the run before the next triple is touched.
///
/// ```
/// use bundle_unseal::{
///     seal_bundle, BundleCollector, FixedPassword, KdfParams, MemoryArchive, MemorySink,
///     PasswordString, UnsealOptions, Unsealer,
/// };
///
/// let kdf = KdfParams::Pbkdf2Sha512 { iterations: 1 };
/// let password = PasswordString::new("secret".to_string());
/// let mut archive = MemoryArchive::new();
/// for (name, bytes) in seal_bundle(b"zip bytes", &password, &kdf)?.into_entries("ui") {
///     archive.insert(name, bytes);
/// }
/// let names = archive.names();
///
/// let mut unsealer = Unsealer::new(
///     archive,
///     FixedPassword::new("secret"),
///     BundleCollector::new(),
///     MemorySink::new(),
/// )
/// .with_options(UnsealOptions::builder().with_kdf(kdf).build());
///
/// let report = unsealer.run(&names);
/// assert_eq!(report.registered(), 1);
/// assert_eq!(unsealer.registrar().get("ui"), Some(&b"zip bytes"[..]));
/// # Ok::<(), bundle_unseal::UnsealError>(())
/// ```
pub struct Unsealer<A, P, R, D> {
    archive: A,
    passwords: P,
    registrar: R,
    diagnostics: D,
    options: UnsealOptions,
}

impl<A, P, R, D> Unsealer<A, P, R, D>
where
    A: ArchiveReader,
    P: PasswordProvider,
    R: RegistrationSink,
    D: DiagnosticSink,
{
    pub fn new(archive: A, passwords: P, registrar: R, diagnostics: D) -> Self {
        Self {
            archive,
            passwords,
            registrar,
            diagnostics,
            options: UnsealOptions::default(),
        }
    }

    #[must_use]
    pub fn with_options(mut self, options: UnsealOptions) -> Self {
        self.options = options;
        self
    }

    pub fn options(&self) -> &UnsealOptions {
        &self.options
    }

    pub fn archive(&self) -> &A {
        &self.archive
    }

    pub fn passwords(&self) -> &P {
        &self.passwords
    }

    pub fn registrar(&self) -> &R {
        &self.registrar
    }

    pub fn diagnostics(&self) -> &D {
        &self.diagnostics
    }

    pub fn into_parts(self) -> (A, P, R, D) {
        (self.archive, self.passwords, self.registrar, self.diagnostics)
    }

    /// Run the whole pipeline over the archive entry `names`.
    ///
    /// Never fails and never panics: every problem ends up in the diagnostic
    /// sink and in the returned [`RunReport`]. Panics raised by the injected
    /// capabilities, the diagnostic sink included, are caught here and reported
    /// as [`UnsealError::Unexpected`]. Outcomes recorded before the panic are
    /// kept, the triple in flight is [`TripleOutcome::Errored`] and the rest
    /// are [`TripleOutcome::NotAttempted`].
    pub fn run<S: AsRef<str>>(&mut self, names: &[S]) -> RunReport {
        let mut table = TripleTable::default();
        let mut report = RunReport::default();

        let result = panic::catch_unwind(AssertUnwindSafe(|| {
            self.diagnostics
                .report(&Diagnostic::info(None, format!("decrypt {} entries", names.len())));
            table = resolve(names, self.options.duplicate_policy, &mut self.diagnostics);
            self.process_table(&table, &mut report);
        }));

        if let Err(payload) = result {
            let err = UnsealError::Unexpected(panic_message(payload.as_ref()));
            // outcomes are recorded in table order
            for triple in table.iter().skip(report.outcomes().len()) {
                report.record(triple.base_name(), TripleOutcome::NotAttempted);
            }
            report.halt(err.clone());

            // the sink itself may be what panicked
            let _ = panic::catch_unwind(AssertUnwindSafe(|| {
                self.diagnostics
                    .report(&Diagnostic::error(None, format!("decrypt() {err}")));
                self.diagnostics.notify_user(&err.to_string());
            }));
        }
        report
    }

    fn process_table(&mut self, table: &TripleTable, report: &mut RunReport) {
        if table.is_empty() {
            self.diagnostics
                .report(&Diagnostic::info(None, "no complete bundle to decrypt"));
            return;
        }

        // asked once per run, and only when there is something to decrypt
        match self.passwords.prompt_password() {
            Some(password) => self.process_into(table, &password, report),
            None => self.halt_before_start(table, UnsealError::PasswordMissing, report),
        }
    }

    /// Process every triple of `table` with `password`.
    ///
    /// Unlike [`run`](Self::run), panics from the injected capabilities are
    /// not caught.
    pub fn process_all(&mut self, table: &TripleTable, password: &PasswordString) -> RunReport {
        let mut report = RunReport::default();
        self.process_into(table, password, &mut report);
        report
    }

    fn process_into(
        &mut self,
        table: &TripleTable,
        password: &PasswordString,
        report: &mut RunReport,
    ) {
        if password.expose_secret().is_empty() {
            return self.halt_before_start(table, UnsealError::PasswordMissing, report);
        }

        let mut triples = table.iter();

        while let Some(triple) = triples.next() {
            if self.options.is_cancelled() {
                self.diagnostics.report(&Diagnostic::warn(
                    None,
                    "run cancelled, remaining bundles skipped",
                ));
                for skipped in std::iter::once(triple).chain(triples.by_ref()) {
                    report.record(skipped.base_name(), TripleOutcome::Cancelled);
                    self.diagnostics
                        .report(&Diagnostic::warn(Some(skipped.base_name()), "cancelled"));
                }
                report.halt(UnsealError::Cancelled);
                break;
            }

            let base_name = triple.base_name();
            // stays Errored if a capability unwinds mid-triple
            report.record(base_name, TripleOutcome::Errored);
            match self.process_triple(triple, password) {
                Ok(()) => {
                    report.settle(TripleOutcome::Registered);
                    self.diagnostics
                        .report(&Diagnostic::info(Some(base_name), "decrypt success"));
                }
                Err(err) => {
                    report.settle(TripleOutcome::from_error(&err));
                    self.report_failure(base_name, &err);
                    if err.is_fatal() {
                        for skipped in triples.by_ref() {
                            report.record(skipped.base_name(), TripleOutcome::NotAttempted);
                            self.diagnostics.report(&Diagnostic::warn(
                                Some(skipped.base_name()),
                                "not attempted, run halted",
                            ));
                        }
                        report.halt(err);
                        break;
                    }
                }
            }
        }
    }

    fn process_triple(
        &mut self,
        triple: &AssetTriple,
        password: &PasswordString,
    ) -> Result<(), UnsealError> {
        let material = fetch_material(&mut self.archive, triple)?;
        let plaintext = open_material(&material, password, &self.options.kdf)?;
        drop(material);

        if self.registrar.register_bundle(triple.base_name(), plaintext) {
            Ok(())
        } else {
            Err(UnsealError::Registration(triple.base_name().to_owned()))
        }
    }

    fn report_failure(&mut self, base_name: &str, err: &UnsealError) {
        let base = Some(base_name);
        match err {
            UnsealError::Fetch { .. } => {
                self.diagnostics.report(&Diagnostic::warn(base, err.to_string()));
            }
            UnsealError::Registration(_) => {
                self.diagnostics.report(&Diagnostic::error(base, err.to_string()));
            }
            UnsealError::Authentication(reason) => {
                self.diagnostics
                    .report(&Diagnostic::error(base, format!("decrypt error [{reason}]")));
                self.diagnostics
                    .notify_user(&format!("Decryption failed, wrong password: [{reason}]"));
            }
            _ => {
                self.diagnostics.report(&Diagnostic::error(base, err.to_string()));
                self.diagnostics
                    .notify_user(&format!("Cannot decrypt [{base_name}]: {err}"));
            }
        }
    }

    fn halt_before_start(
        &mut self,
        table: &TripleTable,
        err: UnsealError,
        report: &mut RunReport,
    ) {
        for triple in table {
            report.record(triple.base_name(), TripleOutcome::NotAttempted);
        }
        report.halt(err.clone());

        self.diagnostics.report(&Diagnostic::error(
            None,
            format!("{err}, {} bundle(s) not decrypted", table.len()),
        ));
        self.diagnostics.notify_user(&err.to_string());
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_owned()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "panic with non-string payload".to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::{BundleCollector, FixedPassword, MemoryArchive};
    use crate::crypto::kdf::KdfParams;
    use crate::diagnostics::{MemorySink, Severity};
    use crate::encryptor::seal_bundle;

    const FAST: KdfParams = KdfParams::Pbkdf2Sha512 { iterations: 1 };

    fn sealed_archive(password: &str, bundles: &[(&str, &[u8])]) -> MemoryArchive {
        let password = PasswordString::new(password.to_string());
        let mut archive = MemoryArchive::new();
        for (base, plaintext) in bundles {
            for (name, bytes) in seal_bundle(plaintext, &password, &FAST)
                .unwrap()
                .into_entries(base)
            {
                archive.insert(name, bytes);
            }
        }
        archive
    }

    fn unsealer<R: RegistrationSink>(
        archive: MemoryArchive,
        password: FixedPassword,
        registrar: R,
    ) -> Unsealer<MemoryArchive, FixedPassword, R, MemorySink> {
        Unsealer::new(archive, password, registrar, MemorySink::new())
            .with_options(UnsealOptions::builder().with_kdf(FAST).build())
    }

    #[test]
    fn nothing_to_do_never_prompts() {
        let mut u = unsealer(MemoryArchive::new(), FixedPassword::new("pw"), BundleCollector::new());
        let report = u.run(&["readme.txt"]);
        assert!(report.outcomes().is_empty());
        assert!(report.is_complete());
        assert_eq!(u.passwords().prompts(), 0);
    }

    #[test]
    fn prompts_once_for_many_bundles() {
        let archive = sealed_archive("pw", &[("a", b"1"), ("b", b"2"), ("c", b"3")]);
        let names = archive.names();
        let mut u = unsealer(archive, FixedPassword::new("pw"), BundleCollector::new());
        let report = u.run(&names);
        assert_eq!(report.registered(), 3);
        assert_eq!(u.passwords().prompts(), 1);
    }

    #[test]
    fn missing_password_touches_nothing() {
        let archive = sealed_archive("pw", &[("a", b"1")]);
        let names = archive.names();
        let mut u = unsealer(archive, FixedPassword::absent(), BundleCollector::new());
        let report = u.run(&names);

        assert_eq!(report.halted(), Some(&UnsealError::PasswordMissing));
        assert_eq!(report.outcome("a"), Some(TripleOutcome::NotAttempted));
        assert!(u.archive().fetched().is_empty());
        assert_eq!(u.diagnostics().alerts.len(), 1);
    }

    #[test]
    fn empty_password_is_missing() {
        let archive = sealed_archive("pw", &[("a", b"1")]);
        let names = archive.names();
        let mut u = unsealer(archive, FixedPassword::new(""), BundleCollector::new());
        let report = u.run(&names);
        assert_eq!(report.halted(), Some(&UnsealError::PasswordMissing));
        assert!(u.archive().fetched().is_empty());
    }

    #[test]
    fn panicking_sink_is_contained() {
        let archive = sealed_archive("pw", &[("a", b"1")]);
        let names = archive.names();
        let sink = |_: &str, _: Vec<u8>| -> bool { panic!("host registry exploded") };
        let mut u = unsealer(archive, FixedPassword::new("pw"), sink);

        let report = u.run(&names);
        assert!(matches!(
            report.halted(),
            Some(UnsealError::Unexpected(msg)) if msg == "host registry exploded"
        ));
        assert_eq!(u.diagnostics().alerts.len(), 1);
        assert!(u
            .diagnostics()
            .with_severity(Severity::Error)
            .any(|d| d.message.contains("host registry exploded")));
    }

    #[test]
    fn panic_keeps_earlier_outcomes() {
        let archive = sealed_archive("pw", &[("a", b"1"), ("b", b"2"), ("c", b"3")]);
        let names = archive.names();
        let mut accepted = Vec::new();
        let sink = |name: &str, _: Vec<u8>| -> bool {
            if name == "b" {
                panic!("host registry exploded");
            }
            accepted.push(name.to_owned());
            true
        };
        let mut u = unsealer(archive, FixedPassword::new("pw"), sink);

        let report = u.run(&names);
        drop(u);
        assert_eq!(report.outcome("a"), Some(TripleOutcome::Registered));
        assert_eq!(report.outcome("b"), Some(TripleOutcome::Errored));
        assert_eq!(report.outcome("c"), Some(TripleOutcome::NotAttempted));
        assert_eq!(report.registered(), 1);
        assert!(matches!(report.halted(), Some(UnsealError::Unexpected(_))));
        assert_eq!(accepted, vec!["a".to_string()]);
    }

    struct ExplodingSink;

    impl DiagnosticSink for ExplodingSink {
        fn report(&mut self, _: &Diagnostic) {
            panic!("log backend down");
        }
    }

    #[test]
    fn panicking_diagnostic_sink_is_contained() {
        let archive = sealed_archive("pw", &[("a", b"1")]);
        let names = archive.names();
        let mut u = Unsealer::new(
            archive,
            FixedPassword::new("pw"),
            BundleCollector::new(),
            ExplodingSink,
        )
        .with_options(UnsealOptions::builder().with_kdf(FAST).build());

        let report = u.run(&names);
        assert!(matches!(
            report.halted(),
            Some(UnsealError::Unexpected(msg)) if msg == "log backend down"
        ));
        // the very first report unwinds, before anything is resolved
        assert!(report.outcomes().is_empty());
        assert!(u.registrar().bundles.is_empty());
    }

    #[test]
    fn process_all_rejects_empty_password() {
        let mut u = unsealer(MemoryArchive::new(), FixedPassword::absent(), BundleCollector::new());
        let (table, _) = crate::resolver::classify_names(
            &["a.crypt", "a.nonce", "a.salt"],
            Default::default(),
        );
        let report = u.process_all(&table, &PasswordString::new(String::new()));
        assert_eq!(report.halted(), Some(&UnsealError::PasswordMissing));
        assert!(u.archive().fetched().is_empty());
    }
}
