//! Fail-soft reports collected during a recomputation pass.
//!
//! Every entry is also emitted as a `tracing::warn!` event under the
//! `sheet_core::diagnostics` target, so hosts can either inspect the list on
//! the character or subscribe to the log.

use crate::codes::TokenError;
use crate::error::SheetError;
use crate::pipeline::SourceError;
use crate::state::{ItemId, MissingTarget, Slot};

/// Which authored source a diagnostic is about.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SourceId {
    Size,
    Ancestry,
    Module(String),
    Training(ItemId),
    Equipped { slot: Slot, item: ItemId },
}

impl core::fmt::Display for SourceId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Size => f.write_str("size"),
            Self::Ancestry => f.write_str("ancestry"),
            Self::Module(name) => write!(f, "module `{name}`"),
            Self::Training(item) => write!(f, "training `{item}`"),
            Self::Equipped { slot, item } => write!(f, "{slot} `{item}`"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case")]
pub enum DiagnosticKind {
    /// A fragment of a data code was skipped.
    UnrecognizedToken,
    /// A delta targets something the character does not have.
    DanglingReference,
    /// A whole source contributed nothing.
    SourceFailure,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub source: SourceId,
    pub detail: String,
    /// Stable identifier of the underlying error, when there is one.
    pub code: Option<&'static str>,
}

impl core::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{} in {}: {}", self.kind, self.source, self.detail)
    }
}

/// Diagnostics of the last pass, in the order they were raised.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn unrecognized(&mut self, source: &SourceId, err: &TokenError) {
        self.push(Diagnostic {
            kind: DiagnosticKind::UnrecognizedToken,
            source: source.clone(),
            detail: err.to_string(),
            code: Some(err.error_code()),
        });
    }

    pub fn dangling(&mut self, source: &SourceId, target: MissingTarget) {
        self.push(Diagnostic {
            kind: DiagnosticKind::DanglingReference,
            source: source.clone(),
            detail: format!("{target} does not exist on this character"),
            code: None,
        });
    }

    pub fn source_failure(&mut self, source: &SourceId, err: &SourceError) {
        self.push(Diagnostic {
            kind: DiagnosticKind::SourceFailure,
            source: source.clone(),
            detail: err.to_string(),
            code: Some(err.error_code()),
        });
    }

    pub fn push(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(
            target: "sheet_core::diagnostics",
            kind = diagnostic.kind.as_ref(),
            source = %diagnostic.source,
            detail = %diagnostic.detail,
            "source diagnostic"
        );
        self.entries.push(diagnostic);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter()
    }

    pub fn of_kind(&self, kind: DiagnosticKind) -> impl Iterator<Item = &Diagnostic> {
        self.entries.iter().filter(move |entry| entry.kind == kind)
    }
}

impl<'a> IntoIterator for &'a Diagnostics {
    type Item = &'a Diagnostic;
    type IntoIter = core::slice::Iter<'a, Diagnostic>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::parse;
    use crate::schema::Pool;

    #[test]
    fn entries_keep_order_and_kind() {
        let source = SourceId::Training(ItemId::new("drill"));
        let parsed = parse("SSA=1:QQ=1");

        let mut diagnostics = Diagnostics::new();
        diagnostics.unrecognized(&source, &parsed.rejected[0]);
        diagnostics.dangling(&source, MissingTarget::Pool(Pool::Mana));

        let kinds: Vec<_> = diagnostics.iter().map(|entry| entry.kind).collect();
        assert_eq!(
            kinds,
            vec![DiagnosticKind::UnrecognizedToken, DiagnosticKind::DanglingReference]
        );
        assert_eq!(diagnostics.of_kind(DiagnosticKind::SourceFailure).count(), 0);
        assert_eq!(
            diagnostics.iter().nth(1).map(ToString::to_string).as_deref(),
            Some("dangling_reference in training `drill`: resource pool `mana` does not exist on this character")
        );
    }
}
