//! Enclosure entities: infiltration, opaque surfaces and windows

use serde::{Deserialize, Serialize};

use crate::document::impl_entity;
use crate::ExtraFields;

/// Air infiltration measurement
///
/// Leakage is recorded as exactly one of: a rate (`air_leakage`, with its
/// unit in the unmodelled fields), an effective leakage area, or a
/// qualitative leakiness description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AirInfiltrationMeasurement {
    pub id: String,

    /// Leakage rate (ACH, CFM, ... at the recorded house pressure)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub air_leakage: Option<f64>,

    /// Effective leakage area (in²)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub effective_leakage_area: Option<f64>,

    /// Qualitative leakiness ("very tight", "average", ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leakiness_description: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(AirInfiltrationMeasurement, "air_infiltration_measurement");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Roof {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_assembly_r_value: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Roof, "roof");

/// Whether a horizontal surface is modelled as a floor or a ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloorOrCeiling {
    Floor,
    Ceiling,
}

/// Horizontal surface between two spaces
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_adjacent_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_adjacent_to: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floor_or_ceiling: Option<FloorOrCeiling>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_assembly_r_value: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Floor, "floor");

impl Floor {
    /// True when this surface is an attic floor
    ///
    /// An explicit `floor_or_ceiling` wins; otherwise a surface whose
    /// exterior side is an attic is treated as a ceiling.
    #[must_use]
    pub fn is_ceiling(&self) -> bool {
        match self.floor_or_ceiling {
            Some(kind) => kind == FloorOrCeiling::Ceiling,
            None => self
                .exterior_adjacent_to
                .as_deref()
                .is_some_and(|adjacent| adjacent.contains("attic")),
        }
    }
}

/// Above-grade wall
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_assembly_r_value: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Wall, "wall");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RimJoist {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_assembly_r_value: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(RimJoist, "rim_joist");

/// Below-grade wall
///
/// Insulation is recorded either as a whole-assembly R-value or as separate
/// exterior and interior layers.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FoundationWall {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_assembly_r_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_exterior_r_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insulation_interior_r_value: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(FoundationWall, "foundation_wall");

/// Slab on grade
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Slab {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub under_slab_insulation_r_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perimeter_insulation_r_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exterior_horizontal_insulation_r_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gap_insulation_r_value: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Slab, "slab");

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Window {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub u_factor: Option<f64>,

    /// Solar heat gain coefficient
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shgc: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Window, "window");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_ceiling() {
        let mut floor = Floor::new("f1");
        floor.floor_or_ceiling = Some(FloorOrCeiling::Ceiling);
        assert!(floor.is_ceiling());
    }

    #[test]
    fn attic_adjacency_implies_ceiling() {
        let mut floor = Floor::new("f1");
        floor.exterior_adjacent_to = Some("attic - vented".into());
        assert!(floor.is_ceiling());
    }

    #[test]
    fn explicit_floor_wins_over_adjacency() {
        let mut floor = Floor::new("f1");
        floor.exterior_adjacent_to = Some("attic - vented".into());
        floor.floor_or_ceiling = Some(FloorOrCeiling::Floor);
        assert!(!floor.is_ceiling());
    }

    #[test]
    fn crawlspace_floor_is_floor() {
        let mut floor = Floor::new("f1");
        floor.exterior_adjacent_to = Some("crawlspace - vented".into());
        assert!(!floor.is_ceiling());
    }
}
