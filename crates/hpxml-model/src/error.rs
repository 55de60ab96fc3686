//! Error types for document ingress and egress

use std::path::{Path, PathBuf};

/// Errors reading, writing or navigating a building document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    /// IO error during file read or write
    #[error("io error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON decode or encode failure
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decode or encode failure
    #[error("invalid YAML document: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// File extension has no registered format
    #[error("unsupported document extension: '{0}'")]
    UnsupportedExtension(String),

    /// Document has no building to operate on
    #[error("document contains no building")]
    NoBuilding,

    /// Requested building id is not in the document
    #[error("building not found: {0}")]
    BuildingNotFound(String),
}

impl DocumentError {
    /// Create IO error for path
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
