//! Common error infrastructure for sheet-core.
//!
//! Domain errors (`CodeError`, `SourceError`, `RecomputeError`) live next to
//! the code that raises them and implement [`SheetError`] for uniform
//! classification.

/// Severity of an error, used to decide how it is reported.
///
/// - **Content**: bad authored data; reported and skipped, never fatal
/// - **Validation**: an invalid request against a character
/// - **Internal**: engine misuse or a broken invariant
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ErrorSeverity {
    /// Examples: malformed data code, unknown token.
    Content,

    /// Examples: equipping a missing item.
    Validation,

    /// Examples: re-entrant recompute, runaway follow-up passes.
    /// These indicate bugs in a collaborator and should be investigated.
    Internal,
}

impl ErrorSeverity {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Validation => "validation",
            Self::Internal => "internal",
        }
    }

    /// Content errors never abort recomputation.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Content | Self::Validation)
    }

    pub const fn is_internal(&self) -> bool {
        matches!(self, Self::Internal)
    }
}

/// Common trait for all sheet-core errors.
///
/// Use `#[derive(thiserror::Error)]` for the `Display`/`Error` impls and
/// implement this trait for classification.
pub trait SheetError: core::fmt::Display + core::fmt::Debug {
    fn severity(&self) -> ErrorSeverity;

    /// Static identifier of the error variant, for logs and tests.
    fn error_code(&self) -> &'static str {
        core::any::type_name::<Self>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_internal_errors_are_unrecoverable() {
        assert!(ErrorSeverity::Content.is_recoverable());
        assert!(ErrorSeverity::Validation.is_recoverable());
        assert!(!ErrorSeverity::Internal.is_recoverable());
        assert!(ErrorSeverity::Internal.is_internal());
    }
}
