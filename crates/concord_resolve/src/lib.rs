//! Artifact resolution and checking sessions.
//!
//! Resolution walks a fixed order of sources (manifest registration,
//! conventional profile directory, remote registry) and tags every
//! resolved artifact with its provenance. The [`Session`] drives batches:
//! it resolves each requested capability, runs the consistency checker
//! over the triple, and aggregates the outcomes into a report in which a
//! fatal failure is an entry, never an abort.

#![warn(missing_docs)]

pub mod error;
pub mod registry;
pub mod resolver;
pub mod session;

pub use error::ResolveError;
pub use registry::{Registry, RegistryError, RemoteArtifact};
pub use resolver::{resolve_map, resolve_profile, resolve_provider, Resolved};
pub use session::{CapabilityRequest, Session};
