//! Document model for Concord artifacts and the external-parser boundary.
//!
//! Profile and Map documents are AST trees owned by the external DSL
//! parsing library; Concord only reads their headers and the definition
//! nodes tagged as usecases or operations, and treats the rest of the tree
//! as opaque JSON. The [`DocumentParser`] trait is the seam where the real
//! parser plugs in; [`CompiledJsonParser`] handles the pre-compiled AST
//! JSON form that the registry serves and the disk cache stores.

#![warn(missing_docs)]

pub mod error;
pub mod map;
pub mod parser;
pub mod profile;
pub mod provider;

pub use error::DocumentError;
pub use map::{MapDocument, MapHeader, ProfileClaim};
pub use parser::{CompiledJsonParser, DocumentParser};
pub use profile::{AstMetadata, DefinitionNode, ProfileDocument, ProfileHeader};
pub use provider::{IntegrationParameter, ProviderDescriptor, SecurityScheme, ServiceEntry};

use serde::de::DeserializeOwned;
use serde::Serialize;

/// Definition node kind tag for profile usecases.
pub const USECASE_KIND: &str = "UseCaseDefinition";

/// Definition node kind tag for map operations.
pub const OPERATION_KIND: &str = "OperationDefinition";

/// A cacheable, structurally validated artifact document.
///
/// Implemented by [`ProfileDocument`] and [`MapDocument`]. The parse cache
/// uses [`validate`](Document::validate) as the structural predicate on
/// both freshly parsed nodes and disk-cache hits: a cached JSON blob that
/// no longer satisfies it is treated as cache corruption, never silently
/// accepted.
pub trait Document: Serialize + DeserializeOwned + Clone {
    /// Short kind name used in diagnostics and cache paths.
    const KIND: &'static str;

    /// Checks the structural invariants of this document.
    fn validate(&self) -> Result<(), DocumentError>;
}
