//! Map documents: one provider's implementation of a profile.

use concord_common::ProfileVersion;
use serde::{Deserialize, Serialize};

use crate::error::DocumentError;
use crate::profile::{AstMetadata, DefinitionNode};
use crate::{Document, OPERATION_KIND};

/// The profile a map claims to implement.
///
/// Carries the full version the map was written against; only the major
/// and minor components are compared against the actual profile.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileClaim {
    /// Optional scope of the claimed profile.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,
    /// Name of the claimed profile.
    pub name: String,
    /// The profile version the map was written against.
    pub version: ProfileVersion,
}

/// The header of a map document: profile claim, provider, optional variant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapHeader {
    /// The profile this map implements.
    pub profile: ProfileClaim,
    /// The provider this map targets. Must equal the descriptor's `name`.
    pub provider: String,
    /// Optional variant label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

/// A parsed map document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MapDocument {
    /// AST marker metadata.
    pub ast_metadata: AstMetadata,
    /// The map header.
    pub header: MapHeader,
    /// Operation definitions plus any other nodes the parser produced.
    #[serde(default)]
    pub definitions: Vec<DefinitionNode>,
}

impl MapDocument {
    /// Names of all operations defined in this map, in document order.
    pub fn operation_names(&self) -> Vec<&str> {
        self.definitions
            .iter()
            .filter(|d| d.kind == OPERATION_KIND)
            .filter_map(|d| d.name.as_deref())
            .collect()
    }
}

impl Document for MapDocument {
    const KIND: &'static str = "map";

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
        if self.header.profile.name.is_empty() {
            return Err(DocumentError::structure(
                Self::KIND,
                "profile claim name is empty",
            ));
        }
        if self.header.provider.is_empty() {
            return Err(DocumentError::structure(
                Self::KIND,
                "provider name is empty",
            ));
        }
        for node in &self.definitions {
            if node.kind == OPERATION_KIND && node.name.is_none() {
                return Err(DocumentError::structure(
                    Self::KIND,
                    "operation definition without a name",
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_map() -> MapDocument {
        MapDocument {
            ast_metadata: AstMetadata {
                document_kind: "map".to_string(),
                ast_version: "1.0.0".to_string(),
            },
            header: MapHeader {
                profile: ProfileClaim {
                    scope: Some("starwars".to_string()),
                    name: "character-information".to_string(),
                    version: ProfileVersion::new(1, 0, 3),
                },
                provider: "swapi".to_string(),
                variant: None,
            },
            definitions: vec![DefinitionNode::named(
                OPERATION_KIND,
                "RetrieveCharacterInformation",
            )],
        }
    }

    #[test]
    fn operation_names_in_order() {
        let mut map = sample_map();
        map.definitions
            .push(DefinitionNode::named(OPERATION_KIND, "ListCharacters"));
        assert_eq!(
            map.operation_names(),
            ["RetrieveCharacterInformation", "ListCharacters"]
        );
    }

    #[test]
    fn validate_accepts_sample() {
        assert!(sample_map().validate().is_ok());
    }

    #[test]
    fn validate_rejects_wrong_kind() {
        let mut map = sample_map();
        map.ast_metadata.document_kind = "profile".to_string();
        assert!(map.validate().is_err());
    }

    #[test]
    fn validate_rejects_empty_provider() {
        let mut map = sample_map();
        map.header.provider.clear();
        assert!(map.validate().is_err());
    }

    #[test]
    fn serde_roundtrip() {
        let map = sample_map();
        let json = serde_json::to_string(&map).unwrap();
        let back: MapDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(map, back);
    }
}
