//! Provider descriptors: structural descriptions of backend integrations.

use serde::{Deserialize, Serialize};

use crate::error::DocumentError;

/// One service endpoint exposed by a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceEntry {
    /// Service identifier referenced by `default_service`.
    pub id: String,
    /// Base URL of the service.
    pub base_url: String,
}

/// A security scheme declared by a provider.
///
/// Only the identifier and type tag are interpreted here; scheme-specific
/// fields are preserved opaquely.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SecurityScheme {
    /// Scheme identifier referenced from maps.
    pub id: String,
    /// Scheme type tag (e.g. `apiKey`, `http`).
    #[serde(rename = "type")]
    pub scheme_type: String,
    /// Scheme-specific fields, uninterpreted.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

/// An integration parameter a provider expects at configuration time.
///
/// A parameter with neither a configured value in the project manifest nor
/// a declared default here is reported as a warning by the checker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntegrationParameter {
    /// Parameter name.
    pub name: String,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Default value used when the manifest configures nothing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
}

/// A provider descriptor document (plain JSON, no DSL form).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProviderDescriptor {
    /// Globally unique provider name within a checking session.
    pub name: String,
    /// Service endpoints.
    pub services: Vec<ServiceEntry>,
    /// Which service to use when a map does not pick one. Must reference
    /// an entry in `services`.
    pub default_service: String,
    /// Declared security schemes.
    #[serde(default)]
    pub security_schemes: Vec<SecurityScheme>,
    /// Integration parameters.
    #[serde(default)]
    pub parameters: Vec<IntegrationParameter>,
}

impl ProviderDescriptor {
    /// Checks the structural invariants of this descriptor.
    pub fn validate(&self) -> Result<(), DocumentError> {
        if self.name.is_empty() {
            return Err(DocumentError::structure("provider", "name is empty"));
        }
        if self.services.is_empty() {
            return Err(DocumentError::structure(
                "provider",
                "declares no services",
            ));
        }
        if !self.services.iter().any(|s| s.id == self.default_service) {
            return Err(DocumentError::structure(
                "provider",
                format!(
                    "default service '{}' does not reference a declared service",
                    self.default_service
                ),
            ));
        }
        Ok(())
    }

    /// Parses a descriptor from JSON text and validates it.
    pub fn from_json(source: &str) -> Result<Self, DocumentError> {
        let descriptor: Self =
            serde_json::from_str(source).map_err(|e| DocumentError::Syntax {
                kind: "provider",
                reason: e.to_string(),
            })?;
        descriptor.validate()?;
        Ok(descriptor)
    }
}
