//! Profile documents: versioned interface specifications.

use concord_common::ProfileVersion;
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::{Document, USECASE_KIND};

/// Marker metadata every compiled AST document carries.
///
/// The structural predicates key off `document_kind`; a document whose
/// metadata claims the wrong kind (or is missing entirely, which serde
/// reports as a syntax error) is rejected before any comparison runs.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AstMetadata {
    /// Either `"profile"` or `"map"`.
    pub document_kind: String,
    /// Version of the AST format that produced this document.
    pub ast_version: String,
}

/// One node from a document's `definitions` list.
///
/// Only the `kind` tag and optional `name` are interpreted; everything
/// else the parser produced is preserved opaquely so the document
/// round-trips through the disk cache byte-for-byte in meaning.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DefinitionNode {
    /// The AST node kind tag (e.g. `UseCaseDefinition`).
    pub kind: String,
    /// The declared name, for node kinds that have one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// The rest of the node, uninterpreted.
    #[serde(flatten)]
    pub rest: serde_json::Map<String, serde_json::Value>,
}

impl DefinitionNode {
    /// Creates a named node of the given kind with no extra payload.
    pub fn named(kind: &str, name: &str) -> Self {
        Self {
            kind: kind.to_string(),
            name: Some(name.to_string()),
            rest: serde_json::Map::new(),
        }
    }
}

/// The header of a profile document: scope, name, and full version.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileHeader {
    /// Optional scope.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Profile name.
    pub name: String,
    /// Full profile version.
    pub version: ProfileVersion,
}

/// A parsed profile document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ProfileDocument {
    /// AST marker metadata.
    pub ast_metadata: AstMetadata,
    /// The profile header.
    pub header: ProfileHeader,
    /// Usecase definitions plus any other nodes the parser produced.
    #[serde(default)]
    pub definitions: Vec<DefinitionNode>,
}

impl ProfileDocument {
    /// Names of all usecases declared in this profile, in document order.
    pub fn usecase_names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .filter(|d| d.kind == USECASE_KIND)
            .filter_map(|d| d.name.as_deref())
            .collect()
    }
}

impl Document for ProfileDocument {
    const KIND: &'static str = "profile";

    fn validate(&self) -> Result<(), DocumentError> {
        if self.ast_metadata.document_kind != Self::KIND {
            return Err(DocumentError::structure(
                Self::KIND,
                format!(
                    "ast metadata declares kind '{}'",
                    self.ast_metadata.document_kind
                ),
            ));
        }
        if self.header.name.is_empty() {
            return Err(DocumentError::structure(Self::KIND, "header name is empty"));
        }
        for node in &self.definitions {
            if node.kind == USECASE_KIND && node.name.is_none() {
                return Err(DocumentError::structure(
                    Self::KIND,
                    "usecase definition without a name",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_profile() -> ProfileDocument {
        ProfileDocument {
            ast_metadata: AstMetadata {
                document_kind: "profile".to_string(),
                ast_version: "1.0.0".to_string(),
            },
            header: ProfileHeader {
                scope: Some("starwars".to_string()),
                name: "character-information".to_string(),
                version: ProfileVersion::new(1, 0, 3),
            },
            definitions: vec![DefinitionNode::named(
                USECASE_KIND,
                "RetrieveCharacterInformation",
            )],
        }
    }

    #[test]
    fn usecase_names_skip_other_nodes() {
        let mut profile = sample_profile();
        profile.definitions.push(DefinitionNode {
            kind: "NamedModelDefinition".to_string(),
            name: Some("Character".to_string()),
            rest: serde_json::Map::new(),
        });
        assert_eq!(profile.usecase_names(), ["RetrieveCharacterInformation"]);
    }

    #[test]
    fn validate_accepts_sample() {
        assert!(sample_profile().validate().is_ok());
    }

    #[test]
    fn validate_rejects_wrong_kind() {
        let mut profile = sample_profile();
        profile.ast_metadata.document_kind = "map".to_string();
        let err = profile.validate().unwrap_err();
        assert!(err.to_string().contains("declares kind 'map'"));
    }

    #[test]
    fn validate_rejects_empty_name() {
        let mut profile = sample_profile();
        profile.header.name.clear();
        assert!(profile.validate().is_err());
    }

    #[test]
    fn validate_rejects_anonymous_usecase() {
        let mut profile = sample_profile();
        profile.definitions[0].name = None;
        assert!(profile.validate().is_err());
    }

    #[test]
    fn unknown_node_payload_round_trips() {
        let json = serde_json::json!({
            "ast_metadata": { "document_kind": "profile", "ast_version": "1.0.0" },
            "header": { "scope": "starwars", "name": "character-information",
                        "version": { "major": 1, "minor": 0, "patch": 3, "label": null } },
            "definitions": [
                { "kind": "UseCaseDefinition", "name": "RetrieveCharacterInformation",
                  "safety": "safe" }
            ]
        });
        let doc: ProfileDocument = serde_json::from_value(json.clone()).unwrap();
        assert_eq!(doc.definitions[0].rest["safety"], "safe");
        let back = serde_json::to_value(&doc).unwrap();
        assert_eq!(back["definitions"][0]["safety"], "safe");
    }
}
