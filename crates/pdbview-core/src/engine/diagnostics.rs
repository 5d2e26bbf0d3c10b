use crate::core::io::records::{RecordError, RecordKind};
use std::fmt;
use tracing::warn;

/// Coarse category a caller can summarize diagnostics by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagnosticClass {
    MalformedRecord,
    UnresolvedAnnotation,
    DuplicateAtomName,
}

impl fmt::Display for DiagnosticClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::MalformedRecord => "malformed record",
            Self::UnresolvedAnnotation => "unresolved annotation",
            Self::DuplicateAtomName => "duplicate atom name",
        })
    }
}

/// A non-fatal condition met while loading a structure.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// A line was skipped because a field could not be extracted.
    MalformedRecord {
        line: usize,
        record: RecordKind,
        error: RecordError,
    },
    /// A secondary-structure range or explicit link names something absent.
    UnresolvedAnnotation { annotation: String, reason: String },
    /// Two atoms of one residue share a name; the later one is mapped.
    DuplicateAtomName {
        residue: String,
        atom_name: String,
        serial: usize,
    },
    /// The residue name changed without the sequence number changing; the
    /// residue keeps its first name.
    ConflictingResidueName {
        residue: String,
        conflicting_name: String,
        serial: usize,
    },
    /// Two indexed atoms share a serial number; the later one is indexed.
    DuplicateSerial { serial: usize },
}

impl Diagnostic {
    pub fn class(&self) -> DiagnosticClass {
        match self {
            Self::MalformedRecord { .. } => DiagnosticClass::MalformedRecord,
            Self::UnresolvedAnnotation { .. } => DiagnosticClass::UnresolvedAnnotation,
            Self::DuplicateAtomName { .. }
            | Self::ConflictingResidueName { .. }
            | Self::DuplicateSerial { .. } => DiagnosticClass::DuplicateAtomName,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedRecord {
                line,
                record,
                error,
            } => write!(f, "line {line}: skipped malformed {record} record ({error})"),
            Self::UnresolvedAnnotation { annotation, reason } => {
                write!(f, "unresolved {annotation}: {reason}")
            }
            Self::DuplicateAtomName {
                residue,
                atom_name,
                serial,
            } => write!(
                f,
                "duplicate atom name '{atom_name}' in residue {residue}; atom {serial} replaces the earlier one"
            ),
            Self::ConflictingResidueName {
                residue,
                conflicting_name,
                serial,
            } => write!(
                f,
                "atom {serial} names residue {residue} as '{conflicting_name}'; keeping the first name"
            ),
            Self::DuplicateSerial { serial } => {
                write!(f, "serial {serial} is used by more than one atom; the later atom is indexed")
            }
        }
    }
}

/// Diagnostics in the order they were recorded.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        warn!("{}", diagnostic);
        self.entries.push(diagnostic);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn count(&self, class: DiagnosticClass) -> usize {
        self.entries.iter().filter(|d| d.class() == class).count()
    }

    /// One line suitable for a non-blocking warning, e.g.
    /// `"2 malformed records, 1 unresolved annotation"`.
    pub fn summary(&self) -> String {
        let parts: Vec<String> = [
            DiagnosticClass::MalformedRecord,
            DiagnosticClass::UnresolvedAnnotation,
            DiagnosticClass::DuplicateAtomName,
        ]
        .into_iter()
        .filter_map(|class| {
            let n = self.count(class);
            (n > 0).then(|| format!("{n} {class}{}", if n == 1 { "" } else { "s" }))
        })
        .collect();

        if parts.is_empty() {
            "no warnings".to_string()
        } else {
            parts.join(", ")
        }
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = std::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unresolved() -> Diagnostic {
        Diagnostic::UnresolvedAnnotation {
            annotation: "CONECT 1 -> 99".into(),
            reason: "no atom with serial 99".into(),
        }
    }

    #[test]
    fn class_groups_duplicate_conditions() {
        assert_eq!(
            Diagnostic::DuplicateSerial { serial: 1 }.class(),
            DiagnosticClass::DuplicateAtomName
        );
        assert_eq!(
            Diagnostic::ConflictingResidueName {
                residue: "ALA A:1".into(),
                conflicting_name: "GLY".into(),
                serial: 3,
            }
            .class(),
            DiagnosticClass::DuplicateAtomName
        );
        assert_eq!(unresolved().class(), DiagnosticClass::UnresolvedAnnotation);
    }

    #[test]
    fn push_keeps_order_and_counts_by_class() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push(unresolved());
        diagnostics.push(Diagnostic::MalformedRecord {
            line: 4,
            record: RecordKind::Atom,
            error: RecordError::LineTooShort {
                columns: "47-54".into(),
            },
        });
        diagnostics.push(unresolved());

        assert_eq!(diagnostics.len(), 3);
        assert_eq!(diagnostics.count(DiagnosticClass::UnresolvedAnnotation), 2);
        assert_eq!(diagnostics.count(DiagnosticClass::MalformedRecord), 1);
        assert_eq!(diagnostics.count(DiagnosticClass::DuplicateAtomName), 0);
        assert_eq!(diagnostics.iter().next(), Some(&unresolved()));
    }

    #[test]
    fn summary_pluralizes_and_skips_empty_classes() {
        let mut diagnostics = Diagnostics::new();
        assert_eq!(diagnostics.summary(), "no warnings");

        diagnostics.push(unresolved());
        diagnostics.push(unresolved());
        diagnostics.push(Diagnostic::DuplicateSerial { serial: 5 });
        assert_eq!(
            diagnostics.summary(),
            "2 unresolved annotations, 1 duplicate atom name"
        );
    }

    #[test]
    fn display_describes_the_condition() {
        assert_eq!(
            unresolved().to_string(),
            "unresolved CONECT 1 -> 99: no atom with serial 99"
        );
    }
}
