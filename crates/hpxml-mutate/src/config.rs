//! Engine configuration

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::policy::UNINSULATED_R_VALUE_THRESHOLD;

/// Mutation pass configuration
///
/// Every field is optional in a config file; missing fields take their
/// defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MutationConfig {
    /// Abort the pass, committing nothing, on any warning or ambiguity
    pub strict: bool,

    /// R-values at or below this are treated as uninsulated and left alone
    pub uninsulated_r_value_threshold: f64,

    /// Building to mutate; the first building when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub building_id: Option<String>,
}

impl Default for MutationConfig {
    fn default() -> Self {
        Self {
            strict: false,
            uninsulated_r_value_threshold: UNINSULATED_R_VALUE_THRESHOLD,
            building_id: None,
        }
    }
}

impl MutationConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set strict mode
    #[inline]
    #[must_use]
    pub fn with_strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Set the uninsulated R-value threshold
    #[inline]
    #[must_use]
    pub fn with_uninsulated_r_value_threshold(mut self, threshold: f64) -> Self {
        self.uninsulated_r_value_threshold = threshold;
        self
    }

    /// Select the building to mutate
    #[inline]
    #[must_use]
    pub fn with_building_id(mut self, building_id: impl Into<String>) -> Self {
        self.building_id = Some(building_id.into());
        self
    }

    /// Check value ranges
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidThreshold`] for a negative or non-finite
    /// threshold
    pub fn validate(&self) -> Result<(), ConfigError> {
        let threshold = self.uninsulated_r_value_threshold;
        if !threshold.is_finite() || threshold < 0.0 {
            return Err(ConfigError::InvalidThreshold(threshold));
        }
        Ok(())
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or the result fails [`Self::validate`]
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or the result fails [`Self::validate`]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a `.json`, `.yaml` or `.yml` file
    ///
    /// # Errors
    /// Returns error on unknown extension, read failure, decode failure or
    /// invalid values
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;

        match ext.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Err(ConfigError::UnsupportedExtension(ext)),
        }
    }
}
