//! Building document root and building entity collections
//!
//! Provides ingress (JSON/YAML → [`BuildingDocument`]) and egress
//! ([`BuildingDocument`] → JSON/YAML) for the in-memory document.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enclosure::{
    AirInfiltrationMeasurement, Floor, FoundationWall, RimJoist, Roof, Slab, Wall, Window,
};
use crate::error::DocumentError;
use crate::hvac::{CoolingSystem, HeatPump, HeatingSystem, HvacControl};
use crate::loads::{
    Appliances, FuelLoad, Lighting, PermanentSpa, PlugLoad, Pool, WaterHeatingSystem,
    WaterHeatingUsage,
};
use crate::ExtraFields;

/// Member of a building entity collection
///
/// The identifier is stable across a mutation pass and is used to correlate
/// pre- and post-mutation state.
pub trait Entity {
    /// Short entity kind used in diagnostics
    const KIND: &'static str;

    /// Stable entity identifier
    fn id(&self) -> &str;
}

/// Root building document
///
/// Mutated in place; never recreated by the mutation engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildingDocument {
    /// Buildings described by this document
    #[serde(default)]
    pub buildings: Vec<Building>,

    /// Unmodelled top-level fields
    #[serde(flatten)]
    pub extra: ExtraFields,
}

/// On-disk document encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    /// JSON (`.json`)
    Json,
    /// YAML (`.yaml`, `.yml`)
    Yaml,
}

impl DocumentFormat {
    /// Detect format from a file extension
    ///
    /// # Errors
    /// Returns [`DocumentError::UnsupportedExtension`] for anything other than
    /// `json`, `yaml` or `yml`.
    pub fn from_path(path: &Path) -> Result<Self, DocumentError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(DocumentError::UnsupportedExtension(ext)),
        }
    }
}

impl BuildingDocument {
    /// Create a document holding a single building
    #[inline]
    #[must_use]
    pub fn with_building(building: Building) -> Self {
        Self {
            buildings: vec![building],
            extra: ExtraFields::new(),
        }
    }

    /// Parse from JSON string
    ///
    /// # Errors
    /// Returns error if JSON is invalid or does not match the document shape
    #[inline]
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse from YAML string
    ///
    /// # Errors
    /// Returns error if YAML is invalid or does not match the document shape
    #[inline]
    pub fn from_yaml_str(yaml: &str) -> Result<Self, DocumentError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Read and parse a document file, choosing the decoder by extension
    ///
    /// # Errors
    /// - [`DocumentError::UnsupportedExtension`] for unknown extensions
    /// - [`DocumentError::Io`] if the file cannot be read
    /// - [`DocumentError::Json`] / [`DocumentError::Yaml`] on decode failure
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let format = DocumentFormat::from_path(path)?;
        let content =
            std::fs::read_to_string(path).map_err(|e| DocumentError::io_error(path, e))?;

        tracing::debug!(path = %path.display(), ?format, "parsing building document");

        match format {
            DocumentFormat::Json => Self::from_json_str(&content),
            DocumentFormat::Yaml => Self::from_yaml_str(&content),
        }
    }

    /// Serialize to pretty JSON
    ///
    /// # Errors
    /// Returns error if serialization fails (rare for JSON)
    #[inline]
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to YAML
    ///
    /// # Errors
    /// Returns error if serialization fails
    #[inline]
    pub fn to_yaml_string(&self) -> Result<String, DocumentError> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Serialize and write to a file, choosing the encoder by extension
    ///
    /// # Errors
    /// Returns error on unknown extension, encode failure or write failure
    pub fn write_to_path(&self, path: impl AsRef<Path>) -> Result<(), DocumentError> {
        let path = path.as_ref();
        let content = match DocumentFormat::from_path(path)? {
            DocumentFormat::Json => self.to_json_string()?,
            DocumentFormat::Yaml => self.to_yaml_string()?,
        };

        std::fs::write(path, content).map_err(|e| DocumentError::io_error(path, e))?;
        tracing::debug!(path = %path.display(), "wrote building document");
        Ok(())
    }

    /// Get a building by id, or the first building when `id` is `None`
    ///
    /// # Errors
    /// - [`DocumentError::NoBuilding`] if the document is empty
    /// - [`DocumentError::BuildingNotFound`] if no building has that id
    pub fn building(&self, id: Option<&str>) -> Result<&Building, DocumentError> {
        match id {
            None => self.buildings.first().ok_or(DocumentError::NoBuilding),
            Some(id) => self
                .buildings
                .iter()
                .find(|b| b.building_id == id)
                .ok_or_else(|| DocumentError::BuildingNotFound(id.to_string())),
        }
    }

    /// Mutable variant of [`BuildingDocument::building`]
    ///
    /// # Errors
    /// Same as [`BuildingDocument::building`]
    pub fn building_mut(&mut self, id: Option<&str>) -> Result<&mut Building, DocumentError> {
        match id {
            None => self.buildings.first_mut().ok_or(DocumentError::NoBuilding),
            Some(id) => self
                .buildings
                .iter_mut()
                .find(|b| b.building_id == id)
                .ok_or_else(|| DocumentError::BuildingNotFound(id.to_string())),
        }
    }
}

/// A single building and its entity collections
///
/// Collections keep document order; the mutation engine walks them in that
/// order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Building identifier
    pub building_id: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub hvac_controls: Vec<HvacControl>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub heating_systems: Vec<HeatingSystem>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cooling_systems: Vec<CoolingSystem>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub heat_pumps: Vec<HeatPump>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub air_infiltration_measurements: Vec<AirInfiltrationMeasurement>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roofs: Vec<Roof>,

    /// Floors and attic floors (ceilings)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub floors: Vec<Floor>,

    /// Above-grade walls
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub walls: Vec<Wall>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rim_joists: Vec<RimJoist>,

    /// Below-grade walls
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub foundation_walls: Vec<FoundationWall>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slabs: Vec<Slab>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub water_heating_systems: Vec<WaterHeatingSystem>,

    /// Hot water usage record (fixtures)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_heating: Option<WaterHeatingUsage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lighting: Option<Lighting>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub windows: Vec<Window>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plug_loads: Vec<PlugLoad>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fuel_loads: Vec<FuelLoad>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub pools: Vec<Pool>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub permanent_spas: Vec<PermanentSpa>,

    /// Major appliances
    #[serde(default, skip_serializing_if = "Appliances::is_empty")]
    pub appliances: Appliances,

    /// Unmodelled building fields (site, zones, consumption, ...)
    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Building {
    /// Create an empty building
    #[inline]
    #[must_use]
    pub fn new(building_id: impl Into<String>) -> Self {
        Self {
            building_id: building_id.into(),
            ..Self::default()
        }
    }
}

/// Implements [`Entity`] and an id-only constructor for a collection member
macro_rules! impl_entity {
    ($ty:ty, $kind:literal) => {
        impl $crate::document::Entity for $ty {
            const KIND: &'static str = $kind;

            #[inline]
            fn id(&self) -> &str {
                &self.id
            }
        }

        impl $ty {
            /// Create an entity with only its identifier populated
            #[inline]
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self {
                    id: id.into(),
                    ..Self::default()
                }
            }
        }
    };
}

pub(crate) use impl_entity;

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn two_buildings() -> BuildingDocument {
        BuildingDocument {
            buildings: vec![Building::new("first"), Building::new("second")],
            extra: ExtraFields::new(),
        }
    }

    #[test]
    fn building_defaults_to_first() {
        let document = two_buildings();
        assert_eq!(document.building(None).unwrap().building_id, "first");
    }

    #[test]
    fn building_by_id() {
        let mut document = two_buildings();
        assert_eq!(
            document.building_mut(Some("second")).unwrap().building_id,
            "second"
        );
    }

    #[test]
    fn building_not_found() {
        let document = two_buildings();
        assert!(matches!(
            document.building(Some("third")),
            Err(DocumentError::BuildingNotFound(id)) if id == "third"
        ));
    }

    #[test]
    fn empty_document_has_no_building() {
        let document = BuildingDocument::default();
        assert!(matches!(document.building(None), Err(DocumentError::NoBuilding)));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("home.JSON")).unwrap(),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("home.yml")).unwrap(),
            DocumentFormat::Yaml
        );
        assert!(DocumentFormat::from_path(Path::new("home.xml")).is_err());
    }

    #[test]
    fn yaml_and_json_agree() {
        let yaml = "buildings:\n  - building_id: b1\n    windows:\n      - id: w1\n        u_factor: 0.33\n        shgc: 0.45\n";
        let from_yaml = BuildingDocument::from_yaml_str(yaml).unwrap();
        let from_json = BuildingDocument::from_json_str(
            r#"{"buildings":[{"building_id":"b1","windows":[{"id":"w1","u_factor":0.33,"shgc":0.45}]}]}"#,
        )
        .unwrap();

        assert_eq!(from_yaml, from_json);
    }
}
