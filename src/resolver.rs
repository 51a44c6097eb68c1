//! # Triple Resolver
//!
//! Groups a flat list of archive entry names into `(ciphertext, nonce, salt)`
//! triples keyed by base name. Pure classification: no I/O, no crypto.
//!
//! ```
//! use bundle_unseal::resolver::{resolve, DuplicatePolicy};
//! use bundle_unseal::MemorySink;
//!
//! let names = ["a.crypt", "a.nonce", "a.salt", "b.crypt", "b.nonce"];
//! let mut sink = MemorySink::new();
//! let table = resolve(&names, DuplicatePolicy::LastWriteWins, &mut sink);
//!
//! assert_eq!(table.len(), 1);
//! assert_eq!(table.iter().next().unwrap().base_name(), "a");
//! assert_eq!(sink.diagnostics.len(), 1); // "b" is missing its salt
//! ```

use crate::consts::{CIPHERTEXT_SUFFIX, NONCE_SUFFIX, SALT_SUFFIX};
use crate::diagnostics::{Diagnostic, DiagnosticSink};
use std::collections::HashMap;
use std::fmt;
use thiserror::Error;

/// The part an entry plays inside a triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TripleRole {
    Ciphertext,
    Nonce,
    Salt,
}

impl TripleRole {
    pub const ALL: [TripleRole; 3] = [TripleRole::Ciphertext, TripleRole::Nonce, TripleRole::Salt];

    /// Entry-name suffix for this role.
    pub const fn suffix(self) -> &'static str {
        match self {
            TripleRole::Ciphertext => CIPHERTEXT_SUFFIX,
            TripleRole::Nonce => NONCE_SUFFIX,
            TripleRole::Salt => SALT_SUFFIX,
        }
    }

    /// Split `name` into `(role, base_name)`; `None` for unrecognized suffixes.
    pub fn classify(name: &str) -> Option<(TripleRole, &str)> {
        Self::ALL
            .into_iter()
            .find_map(|role| name.strip_suffix(role.suffix()).map(|base| (role, base)))
    }
}

impl fmt::Display for TripleRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TripleRole::Ciphertext => "crypt",
            TripleRole::Nonce => "nonce",
            TripleRole::Salt => "salt",
        })
    }
}

/// What to do when the same role shows up twice for one base name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Keep the later name and warn.
    #[default]
    LastWriteWins,
    /// Drop the whole base name.
    Reject,
}

/// Non-fatal findings of classification.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    #[error("Unknown file type [{name}]")]
    UnknownSuffix { name: String },

    #[error("Missing file [{base_name}]: no {}", join_roles(.missing))]
    Incomplete {
        base_name: String,
        missing: Vec<TripleRole>,
    },

    #[error("Duplicate {role} file [{base_name}]: kept [{kept}], dropped [{dropped}]")]
    DuplicateRole {
        base_name: String,
        role: TripleRole,
        kept: String,
        dropped: String,
    },

    #[error("Conflicting {role} files [{base_name}]: [{first}] and [{second}]")]
    Conflict {
        base_name: String,
        role: TripleRole,
        first: String,
        second: String,
    },
}

impl ResolveWarning {
    /// The base name the warning is about, if any.
    pub fn base_name(&self) -> Option<&str> {
        match self {
            ResolveWarning::UnknownSuffix { .. } => None,
            ResolveWarning::Incomplete { base_name, .. }
            | ResolveWarning::DuplicateRole { base_name, .. }
            | ResolveWarning::Conflict { base_name, .. } => Some(base_name),
        }
    }
}

fn join_roles(roles: &[TripleRole]) -> String {
    roles
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Entry names for one bundle. Only complete triples leave [`resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssetTriple {
    base_name: String,
    ciphertext_name: Option<String>,
    nonce_name: Option<String>,
    salt_name: Option<String>,
}

impl AssetTriple {
    pub fn new(base_name: impl Into<String>) -> Self {
        Self {
            base_name: base_name.into(),
            ..Self::default()
        }
    }

    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// Entry name filling `role`, if seen.
    pub fn name(&self, role: TripleRole) -> Option<&str> {
        self.slot(role).as_deref()
    }

    pub fn ciphertext_name(&self) -> Option<&str> {
        self.name(TripleRole::Ciphertext)
    }

    pub fn nonce_name(&self) -> Option<&str> {
        self.name(TripleRole::Nonce)
    }

    pub fn salt_name(&self) -> Option<&str> {
        self.name(TripleRole::Salt)
    }

    /// Fill `role` with `name`, returning the name previously held there.
    pub fn set(&mut self, role: TripleRole, name: impl Into<String>) -> Option<String> {
        self.slot_mut(role).replace(name.into())
    }

    /// Roles still unfilled, in canonical order.
    pub fn missing(&self) -> Vec<TripleRole> {
        TripleRole::ALL
            .into_iter()
            .filter(|role| self.slot(*role).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing().is_empty()
    }

    fn slot(&self, role: TripleRole) -> &Option<String> {
        match role {
            TripleRole::Ciphertext => &self.ciphertext_name,
            TripleRole::Nonce => &self.nonce_name,
            TripleRole::Salt => &self.salt_name,
        }
    }

    fn slot_mut(&mut self, role: TripleRole) -> &mut Option<String> {
        match role {
            TripleRole::Ciphertext => &mut self.ciphertext_name,
            TripleRole::Nonce => &mut self.nonce_name,
            TripleRole::Salt => &mut self.salt_name,
        }
    }
}

/// Complete triples in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripleTable {
    triples: Vec<AssetTriple>,
}

impl TripleTable {
    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AssetTriple> {
        self.triples.iter()
    }

    pub fn get(&self, base_name: &str) -> Option<&AssetTriple> {
        self.triples.iter().find(|t| t.base_name == base_name)
    }

    /// Base names in processing order.
    pub fn base_names(&self) -> impl Iterator<Item = &str> {
        self.triples.iter().map(AssetTriple::base_name)
    }
}

impl IntoIterator for TripleTable {
    type Item = AssetTriple;
    type IntoIter = std::vec::IntoIter<AssetTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.into_iter()
    }
}

impl<'a> IntoIterator for &'a TripleTable {
    type Item = &'a AssetTriple;
    type IntoIter = std::slice::Iter<'a, AssetTriple>;

    fn into_iter(self) -> Self::IntoIter {
        self.triples.iter()
    }
}

/// Classify names into triples, keeping only complete ones.
///
/// Returns the table plus every warning raised, in emission order.
pub fn classify_names<S: AsRef<str>>(
    names: &[S],
    policy: DuplicatePolicy,
) -> (TripleTable, Vec<ResolveWarning>) {
    let mut warnings = Vec::new();
    // first-seen order lives in `records`, `index` maps base name to slot
    let mut records: Vec<(AssetTriple, bool)> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for name in names {
        let name = name.as_ref();
        let Some((role, base)) = TripleRole::classify(name) else {
            warnings.push(ResolveWarning::UnknownSuffix {
                name: name.to_owned(),
            });
            continue;
        };

        let idx = match index.get(base) {
            Some(&idx) => idx,
            None => {
                records.push((AssetTriple::new(base), false));
                index.insert(base.to_owned(), records.len() - 1);
                records.len() - 1
            }
        };
        let (triple, conflicted) = &mut records[idx];

        if let Some(previous) = triple.set(role, name) {
            match policy {
                DuplicatePolicy::LastWriteWins => warnings.push(ResolveWarning::DuplicateRole {
                    base_name: base.to_owned(),
                    role,
                    kept: name.to_owned(),
                    dropped: previous,
                }),
                DuplicatePolicy::Reject => {
                    if !*conflicted {
                        warnings.push(ResolveWarning::Conflict {
                            base_name: base.to_owned(),
                            role,
                            first: previous,
                            second: name.to_owned(),
                        });
                    }
                    *conflicted = true;
                }
            }
        }
    }

    let mut table = TripleTable::default();
    for (triple, conflicted) in records {
        if conflicted {
            continue;
        }
        if triple.is_complete() {
            table.triples.push(triple);
        } else {
            warnings.push(ResolveWarning::Incomplete {
                missing: triple.missing(),
                base_name: triple.base_name,
            });
        }
    }

    (table, warnings)
}

/// [`classify_names`] with every warning reported to `sink`.
pub fn resolve<S, D>(names: &[S], policy: DuplicatePolicy, sink: &mut D) -> TripleTable
where
    S: AsRef<str>,
    D: DiagnosticSink + ?Sized,
{
    let (table, warnings) = classify_names(names, policy);
    for warning in &warnings {
        sink.report(&Diagnostic::warn(warning.base_name(), warning.to_string()));
    }
    table
}
