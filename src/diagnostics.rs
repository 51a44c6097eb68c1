//! # Diagnostics
//!
//! Every outcome of a run (skipped name, incomplete triple, fetch failure,
//! decrypt failure, registration result) goes through a [`DiagnosticSink`],
//! tagged with the bundle base name it concerns.
//!
//! Two sinks ship with the crate:
//! - [`LogSink`] forwards to the [`log`] facade
//! - [`MemorySink`] records everything, for auditing and tests

use std::fmt;

/// Log target used by [`LogSink`].
pub const LOG_TARGET: &str = "bundle_unseal";

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warn,
    Error,
}

/// One structured diagnostic record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Base name of the bundle this concerns, `None` for run-level messages.
    pub base_name: Option<String>,
    pub message: String,
}

impl Diagnostic {
    pub fn new(severity: Severity, base_name: Option<&str>, message: impl Into<String>) -> Self {
        Self {
            severity,
            base_name: base_name.map(str::to_owned),
            message: message.into(),
        }
    }

    pub fn info(base_name: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Info, base_name, message)
    }

    pub fn warn(base_name: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Warn, base_name, message)
    }

    pub fn error(base_name: Option<&str>, message: impl Into<String>) -> Self {
        Self::new(Severity::Error, base_name, message)
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.base_name {
            Some(base) => write!(f, "[{base}] {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Structured diagnostic channel plus the interactive alert used for
/// user-visible failures.
pub trait DiagnosticSink {
    /// Record one diagnostic.
    fn report(&mut self, diagnostic: &Diagnostic);

    /// Surface a message to the user (alert box, toast, stderr, ...).
    ///
    /// Called in addition to [`report`](Self::report) for fatal failures.
    /// The default only reports it as an error.
    fn notify_user(&mut self, message: &str) {
        self.report(&Diagnostic::error(None, message));
    }
}

impl<T: DiagnosticSink + ?Sized> DiagnosticSink for &mut T {
    fn report(&mut self, diagnostic: &Diagnostic) {
        (**self).report(diagnostic);
    }

    fn notify_user(&mut self, message: &str) {
        (**self).notify_user(message);
    }
}

/// Forwards diagnostics to the `log` facade under [`LOG_TARGET`].
#[derive(Debug, Default, Clone, Copy)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        match diagnostic.severity {
            Severity::Info => log::info!(target: LOG_TARGET, "{diagnostic}"),
            Severity::Warn => log::warn!(target: LOG_TARGET, "{diagnostic}"),
            Severity::Error => log::error!(target: LOG_TARGET, "{diagnostic}"),
        }
    }

    fn notify_user(&mut self, message: &str) {
        log::error!(target: LOG_TARGET, "alert: {message}");
    }
}

/// Keeps every diagnostic and alert in memory, in emission order.
#[derive(Debug, Default, Clone)]
pub struct MemorySink {
    pub diagnostics: Vec<Diagnostic>,
    pub alerts: Vec<String>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Diagnostics attached to `base_name`.
    pub fn for_base<'a>(&'a self, base_name: &'a str) -> impl Iterator<Item = &'a Diagnostic> + 'a {
        self.diagnostics
            .iter()
            .filter(move |d| d.base_name.as_deref() == Some(base_name))
    }

    /// Diagnostics at exactly `severity`.
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.diagnostics.iter().filter(move |d| d.severity == severity)
    }
}

impl DiagnosticSink for MemorySink {
    fn report(&mut self, diagnostic: &Diagnostic) {
        self.diagnostics.push(diagnostic.clone());
    }

    fn notify_user(&mut self, message: &str) {
        self.alerts.push(message.to_owned());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_prefixes_base_name() {
        let d = Diagnostic::warn(Some("ui"), "Missing file");
        assert_eq!(d.to_string(), "[ui] Missing file");
        let d = Diagnostic::info(None, "decrypt");
        assert_eq!(d.to_string(), "decrypt");
    }

    #[test]
    fn memory_sink_filters() {
        let mut sink = MemorySink::new();
        sink.report(&Diagnostic::warn(Some("a"), "one"));
        sink.report(&Diagnostic::error(Some("b"), "two"));
        sink.report(&Diagnostic::info(Some("a"), "three"));
        sink.notify_user("alert");

        assert_eq!(sink.for_base("a").count(), 2);
        assert_eq!(sink.with_severity(Severity::Error).count(), 1);
        assert_eq!(sink.alerts, vec!["alert".to_string()]);
    }

    #[test]
    fn borrowed_sink_forwards() {
        let mut sink = MemorySink::new();
        {
            let mut borrowed = &mut sink;
            DiagnosticSink::report(&mut borrowed, &Diagnostic::info(None, "via &mut"));
        }
        assert_eq!(sink.diagnostics.len(), 1);
    }
}
