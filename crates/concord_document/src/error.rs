//! Error types for document parsing and structural validation.

/// Errors raised at the document boundary.
///
/// A `Structure` error means the structural predicate failed: the value is
/// not (or is no longer) a well-formed document of the expected kind. The
/// consistency checker treats this as fatal rather than reporting a false
/// "no issues found".
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// The source text or JSON could not be parsed at all.
    #[error("failed to parse {kind} document: {reason}")]
    Syntax {
        /// The document kind being parsed.
        kind: &'static str,
        /// Description of the parse failure.
        reason: String,
    },

    /// The parsed value does not satisfy the structural predicate.
    #[error("not a valid {kind} document: {reason}")]
    Structure {
        /// The document kind expected.
        kind: &'static str,
        /// Which invariant failed.
        reason: String,
    },
}

impl DocumentError {
    /// Creates a structural-predicate failure for the given kind.
    pub fn structure(kind: &'static str, reason: impl Into<String>) -> Self {
        Self::Structure {
            kind,
            reason: reason.into(),
        }
    }
}
