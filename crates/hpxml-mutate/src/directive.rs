//! Directive set
//!
//! A [`DirectiveSet`] can only be obtained through validation: every key must
//! name a catalogued category and every value must be a finite number inside
//! that category's declared range. All problems are collected before the set
//! is rejected, so a caller sees every mistake at once.

use std::collections::BTreeMap;
use std::path::Path;

use serde_json::Value;

use crate::category::Category;
use crate::error::{DirectiveError, DirectiveProblem};

/// Key under which workflow files nest their directive map
const ARGUMENTS_KEY: &str = "arguments";

/// Validated, immutable map from category to directive value
///
/// A category that is absent is not the same as a category set to zero:
/// absent categories are skipped entirely.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DirectiveSet {
    values: BTreeMap<Category, f64>,
}

impl DirectiveSet {
    /// Set with no directives
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Start building a set from typed values
    #[inline]
    #[must_use]
    pub fn builder() -> DirectiveSetBuilder {
        DirectiveSetBuilder::default()
    }

    /// Validate a raw name → value map
    ///
    /// # Errors
    /// Returns [`DirectiveError::Malformed`] listing every problem found
    pub fn from_values<'a, I>(entries: I) -> Result<Self, DirectiveError>
    where
        I: IntoIterator<Item = (&'a str, &'a Value)>,
    {
        let mut builder = Self::builder();
        for (name, value) in entries {
            match name.parse::<Category>() {
                Ok(category) => match value.as_f64() {
                    Some(number) => builder = builder.set(category, number),
                    None => builder.problems.push(DirectiveProblem::NotNumeric {
                        name: name.to_string(),
                        value: value.to_string(),
                    }),
                },
                Err(_) => builder.problems.push(DirectiveProblem::UnknownCategory {
                    name: name.to_string(),
                }),
            }
        }
        builder.build()
    }

    /// Validate a decoded JSON/YAML value
    ///
    /// Accepts a flat map, or a map whose only directive content sits under an
    /// `arguments` key.
    ///
    /// # Errors
    /// Returns [`DirectiveError::NotAMap`] for non-map input, otherwise as
    /// [`Self::from_values`]
    pub fn from_value(value: &Value) -> Result<Self, DirectiveError> {
        let map = value.as_object().ok_or(DirectiveError::NotAMap)?;
        let map = match map.get(ARGUMENTS_KEY) {
            Some(nested) if map.len() == 1 => nested.as_object().ok_or(DirectiveError::NotAMap)?,
            _ => map,
        };
        Self::from_values(map.iter().map(|(name, value)| (name.as_str(), value)))
    }

    /// Parse and validate JSON directives
    ///
    /// # Errors
    /// Returns error if JSON is invalid or validation fails
    pub fn from_json_str(json: &str) -> Result<Self, DirectiveError> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    /// Parse and validate YAML directives
    ///
    /// # Errors
    /// Returns error if YAML is invalid or validation fails
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DirectiveError> {
        let value: Value = serde_yaml::from_str(yaml)?;
        Self::from_value(&value)
    }

    /// Read a `.json`, `.yaml` or `.yml` directive file
    ///
    /// # Errors
    /// Returns error on unknown extension, read failure, decode failure or
    /// validation failure
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DirectiveError> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        let content =
            std::fs::read_to_string(path).map_err(|e| DirectiveError::io_error(path, e))?;

        tracing::debug!(path = %path.display(), "reading directives");

        match ext.as_str() {
            "json" => Self::from_json_str(&content),
            "yaml" | "yml" => Self::from_yaml_str(&content),
            _ => Err(DirectiveError::UnsupportedExtension(ext)),
        }
    }

    /// Directive value for a category
    #[inline]
    #[must_use]
    pub fn get(&self, category: Category) -> Option<f64> {
        self.values.get(&category).copied()
    }

    /// True when the category has a directive
    #[inline]
    #[must_use]
    pub fn contains(&self, category: Category) -> bool {
        self.values.contains_key(&category)
    }

    /// Directives in dispatch order
    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        self.values.iter().map(|(category, value)| (*category, *value))
    }

    /// Number of directives
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when the set holds no directives
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Collects typed directives and validates them together
#[derive(Debug, Clone, Default)]
pub struct DirectiveSetBuilder {
    values: BTreeMap<Category, f64>,
    problems: Vec<DirectiveProblem>,
}

impl DirectiveSetBuilder {
    /// Add or replace a directive
    #[must_use]
    pub fn set(mut self, category: Category, value: f64) -> Self {
        self.values.insert(category, value);
        self
    }

    /// Validate every directive
    ///
    /// # Errors
    /// Returns [`DirectiveError::Malformed`] listing every problem found
    pub fn build(self) -> Result<DirectiveSet, DirectiveError> {
        let mut problems = self.problems;

        for (&category, &value) in &self.values {
            let range = category.declared_range();
            if !value.is_finite() {
                problems.push(DirectiveProblem::NotFinite { category });
            } else if !range.contains(value) {
                problems.push(DirectiveProblem::OutOfRange {
                    category,
                    value,
                    range,
                });
            }
        }

        if problems.is_empty() {
            Ok(DirectiveSet {
                values: self.values,
            })
        } else {
            Err(DirectiveError::Malformed(problems))
        }
    }
}
