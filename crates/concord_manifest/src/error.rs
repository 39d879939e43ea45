//! Error types for manifest loading and validation.

/// Errors that can occur when loading or validating a `concord.toml`.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// An I/O error occurred while reading the manifest file.
    #[error("failed to read manifest: {0}")]
    Io(#[from] std::io::Error),

    /// The TOML content could not be parsed.
    #[error("failed to parse manifest: {0}")]
    Parse(String),

    /// A profile table key is not a valid `scope/name` identity.
    #[error("invalid profile key '{key}': expected scope/name")]
    InvalidProfileKey {
        /// The offending table key.
        key: String,
    },

    /// A pinned version string does not parse.
    #[error("invalid pinned version '{key}': expected major.minor.patch")]
    InvalidVersion {
        /// The offending version string.
        key: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_display() {
        let err = ManifestError::Parse("unexpected EOF".to_string());
        assert!(err.to_string().contains("unexpected EOF"));
    }

    #[test]
    fn invalid_key_display() {
        let err = ManifestError::InvalidProfileKey {
            key: "a/b/c".to_string(),
        };
        assert!(err.to_string().contains("a/b/c"));
    }
}
