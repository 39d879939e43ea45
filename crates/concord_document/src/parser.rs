//! The parser boundary.
//!
//! The DSL grammar lives in an external parsing library; Concord consumes
//! it through [`DocumentParser`] and never interprets source text itself.
//! The bundled [`CompiledJsonParser`] covers the other half of the world:
//! artifacts that are already compiled to AST JSON, which is what the
//! registry serves and what local `.json` registrations contain.

use crate::error::DocumentError;
use crate::map::MapDocument;
use crate::profile::ProfileDocument;
use crate::Document;

/// Boundary trait for turning artifact source text into documents.
///
/// Every parse result is re-checked with the structural predicate before
/// it is returned, so a misbehaving parser implementation cannot smuggle
/// an ill-formed document past the checker.
pub trait DocumentParser {
    /// Parses profile source text.
    fn parse_profile(&self, source: &str) -> Result<ProfileDocument, DocumentError>;

    /// Parses map source text.
    fn parse_map(&self, source: &str) -> Result<MapDocument, DocumentError>;
}

/// Parser for pre-compiled AST JSON documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct CompiledJsonParser;

impl CompiledJsonParser {
    fn parse<D: Document>(source: &str) -> Result<D, DocumentError> {
        let document: D = serde_json::from_str(source).map_err(|e| DocumentError::Syntax {
            kind: D::KIND,
            reason: e.to_string(),
        })?;
        document.validate()?;
        Ok(document)
    }
}

impl DocumentParser for CompiledJsonParser {
    fn parse_profile(&self, source: &str) -> Result<ProfileDocument, DocumentError> {
        Self::parse(source)
    }

    fn parse_map(&self, source: &str) -> Result<MapDocument, DocumentError> {
        Self::parse(source)
    }
}
