//! The registry boundary.
//!
//! The resolver only ever talks to the registry through the [`Registry`]
//! trait, so the HTTP client lives with the binary and tests substitute an
//! in-memory implementation.

use concord_common::{MapId, ProfileId};
use concord_document::{MapDocument, ProfileDocument, ProviderDescriptor};

/// An artifact fetched from the registry, together with the version the
/// registry resolved the request to.
///
/// The resolved version feeds the remote provenance record; a request
/// without a pinned version may resolve to anything the registry
/// considers latest.
#[derive(Clone, Debug)]
pub struct RemoteArtifact<D> {
    /// The fetched document.
    pub document: D,
    /// The version the registry actually served.
    pub resolved_version: String,
}

/// A registry request failure.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// The registry has no entry for the requested artifact.
    #[error("no registry entry for {artifact}")]
    NotFound {
        /// What was requested.
        artifact: String,
    },
    /// The request itself failed (network, bad response shape).
    #[error("{reason}")]
    Transport {
        /// Failure description.
        reason: String,
    },
}

/// Remote source of compiled artifacts.
pub trait Registry {
    /// Fetches the compiled AST of a profile.
    fn fetch_profile_ast(
        &self,
        id: &ProfileId,
    ) -> impl std::future::Future<Output = Result<RemoteArtifact<ProfileDocument>, RegistryError>>;

    /// Fetches the compiled AST of a map.
    fn fetch_map_ast(
        &self,
        id: &MapId,
    ) -> impl std::future::Future<Output = Result<RemoteArtifact<MapDocument>, RegistryError>>;

    /// Fetches a provider descriptor by name.
    fn fetch_provider_info(
        &self,
        name: &str,
    ) -> impl std::future::Future<Output = Result<RemoteArtifact<ProviderDescriptor>, RegistryError>>;
}
