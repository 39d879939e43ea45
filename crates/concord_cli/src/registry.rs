//! HTTP registry client.
//!
//! Fetches compiled artifact ASTs and provider descriptors from the
//! registry's REST endpoints. Responses are envelopes carrying the
//! document together with the version the registry resolved the request
//! to.

use concord_common::{MapId, ProfileId};
use concord_document::{MapDocument, ProfileDocument, ProviderDescriptor};
use concord_resolve::{Registry, RegistryError, RemoteArtifact};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Response envelope served by the registry.
#[derive(Deserialize)]
struct Envelope<D> {
    resolved_version: String,
    document: D,
}

/// Registry client over HTTP.
pub struct HttpRegistry {
    base: String,
    client: reqwest::Client,
}

impl HttpRegistry {
    /// Creates a client against the given base URL.
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        while base.ends_with('/') {
            base.pop();
        }
        Self {
            base,
            client: reqwest::Client::new(),
        }
    }

    async fn get<D: DeserializeOwned>(
        &self,
        url: String,
        artifact: &str,
    ) -> Result<RemoteArtifact<D>, RegistryError> {
        let transport = |e: reqwest::Error| RegistryError::Transport {
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(transport)?;
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(RegistryError::NotFound {
                artifact: artifact.to_string(),
            });
        }
        let envelope: Envelope<D> = response
            .error_for_status()
            .map_err(transport)?
            .json()
            .await
            .map_err(transport)?;
        Ok(RemoteArtifact {
            document: envelope.document,
            resolved_version: envelope.resolved_version,
        })
    }
}

impl Registry for HttpRegistry {
    async fn fetch_profile_ast(
        &self,
        id: &ProfileId,
    ) -> Result<RemoteArtifact<ProfileDocument>, RegistryError> {
        let mut url = format!("{}/profiles/{}", self.base, id.identity());
        if let Some(version) = &id.version {
            url.push_str(&format!("?version={version}"));
        }
        self.get(url, &format!("profile {id}")).await
    }

    async fn fetch_map_ast(&self, id: &MapId) -> Result<RemoteArtifact<MapDocument>, RegistryError> {
        let mut url = format!(
            "{}/maps/{}/{}?version={}",
            self.base,
            id.profile.identity(),
            id.provider,
            id.version
        );
        if let Some(variant) = &id.variant {
            url.push_str(&format!("&variant={variant}"));
        }
        self.get(url, &format!("map {id}")).await
    }

    async fn fetch_provider_info(
        &self,
        name: &str,
    ) -> Result<RemoteArtifact<ProviderDescriptor>, RegistryError> {
        let url = format!("{}/providers/{name}", self.base);
        self.get(url, &format!("provider {name}")).await
    }
}
