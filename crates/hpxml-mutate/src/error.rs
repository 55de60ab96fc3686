//! Error types for the mutation engine
//!
//! Provides error handling for:
//! - Malformed directive sets (rejected before any mutation)
//! - Document lookup failures
//! - Strict-mode aborts
//! - Configuration errors

use std::path::{Path, PathBuf};

use hpxml_model::DocumentError;

use crate::category::{Category, DeclaredRange};

/// Main mutation error type
#[derive(Debug, thiserror::Error)]
pub enum MutationError {
    /// Directive set failed validation
    #[error("invalid directives: {0}")]
    InvalidDirectives(#[from] DirectiveError),

    /// Document could not be read, written or searched
    #[error("document error: {0}")]
    Document(#[from] DocumentError),

    /// A directive names a category the registry has no handler for
    #[error("no handler registered for category: {0}")]
    MissingHandler(Category),

    /// Strict mode saw warnings or ambiguities; nothing was committed
    #[error(
        "strict mode aborted the pass: {warnings} warning(s), {ambiguities} ambiguous entity state(s)"
    )]
    StrictAbort {
        /// Warnings raised during the pass
        warnings: usize,
        /// Ambiguous entities encountered during the pass
        ambiguities: usize,
    },

    /// Configuration error
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl MutationError {
    /// True for strict-mode aborts
    #[inline]
    #[must_use]
    pub fn is_strict_abort(&self) -> bool {
        matches!(self, Self::StrictAbort { .. })
    }
}

/// A single problem found while validating a directive set
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DirectiveProblem {
    /// Key does not name a known category
    #[error("unknown category: {name}")]
    UnknownCategory {
        /// The offending key
        name: String,
    },

    /// Value is not a number
    #[error("{name}: expected a number, got {value}")]
    NotNumeric {
        /// Directive name
        name: String,
        /// The offending value, rendered as JSON
        value: String,
    },

    /// Value is NaN or infinite
    #[error("{category}: value is not finite")]
    NotFinite {
        /// Directive category
        category: Category,
    },

    /// Value lies outside the category's declared range
    #[error("{category}: {value} is outside {range}")]
    OutOfRange {
        /// Directive category
        category: Category,
        /// The offending value
        value: f64,
        /// Accepted range
        range: DeclaredRange,
    },
}

/// Directive set construction errors
#[derive(Debug, thiserror::Error)]
pub enum DirectiveError {
    /// One or more directives are malformed
    #[error("{} malformed directive(s): {}", .0.len(), join_problems(.0))]
    Malformed(Vec<DirectiveProblem>),

    /// Directive source is not a map of names to values
    #[error("directives must be a map of category name to number")]
    NotAMap,

    /// Directive file has an unsupported extension
    #[error("unsupported directive file extension: {0:?}")]
    UnsupportedExtension(String),

    /// Directive file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON decode failure
    #[error("invalid JSON directives: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decode failure
    #[error("invalid YAML directives: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl DirectiveError {
    /// Create IO error with path context
    #[inline]
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Problems carried by a [`DirectiveError::Malformed`] error
    #[must_use]
    pub fn problems(&self) -> &[DirectiveProblem] {
        match self {
            Self::Malformed(problems) => problems,
            _ => &[],
        }
    }
}

fn join_problems(problems: &[DirectiveProblem]) -> String {
    problems
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Threshold is negative or not finite
    #[error("uninsulated R-value threshold must be a finite, non-negative number, got {0}")]
    InvalidThreshold(f64),

    /// Config file has an unsupported extension
    #[error("unsupported config file extension: {0:?}")]
    UnsupportedExtension(String),

    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// JSON decode failure
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML decode failure
    #[error("invalid YAML config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl ConfigError {
    /// Create IO error with path context
    #[inline]
    pub fn io_error(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }
}
