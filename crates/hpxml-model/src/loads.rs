//! Load entities: water heating, lighting, miscellaneous loads and appliances

use serde::{Deserialize, Serialize};

use crate::document::impl_entity;
use crate::ExtraFields;

/// Water heater technology
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaterHeaterType {
    #[serde(rename = "storage water heater")]
    Storage,
    #[serde(rename = "instantaneous water heater")]
    Instantaneous,
    #[serde(rename = "heat pump water heater")]
    HeatPump,
    #[serde(rename = "space-heating system")]
    SpaceHeatingSystem,
    #[serde(rename = "space-heating system with storage tank")]
    SpaceHeatingSystemWithStorageTank,
    /// Any other value, kept verbatim
    #[serde(untagged)]
    Other(String),
}

impl WaterHeaterType {
    /// True for heat-pump based water heaters
    #[inline]
    #[must_use]
    pub fn is_heat_pump(&self) -> bool {
        matches!(self, Self::HeatPump)
    }
}

/// Water heater
///
/// `recovery_efficiency` is only valid for the energy factor it was derived
/// from.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterHeatingSystem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_heater_type: Option<WaterHeaterType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uniform_energy_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recovery_efficiency: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(WaterHeatingSystem, "water_heating_system");

impl WaterHeatingSystem {
    /// True when the heater type is heat-pump based
    #[inline]
    #[must_use]
    pub fn is_heat_pump(&self) -> bool {
        self.water_heater_type
            .as_ref()
            .is_some_and(WaterHeaterType::is_heat_pump)
    }
}

/// Hot water usage record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WaterHeatingUsage {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub water_fixtures_usage_multiplier: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(WaterHeatingUsage, "water_heating");

/// Lighting record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lighting {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub interior_usage_multiplier: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Lighting, "lighting");

/// Electric plug load (television, other, well pump, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlugLoad {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plug_load_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_multiplier: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(PlugLoad, "plug_load");

/// Fuel-burning miscellaneous load (grill, lighting, fireplace)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FuelLoad {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel_load_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_multiplier: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(FuelLoad, "fuel_load");

/// Pool or permanent spa with a pump and an optional heater
///
/// A `heater_type` of `"none"` means the heater does not exist and its usage
/// multiplier is never established.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pump_usage_multiplier: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heater_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heater_usage_multiplier: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Pool, "pool");

impl Pool {
    /// True unless the heater is explicitly recorded as absent
    #[inline]
    #[must_use]
    pub fn has_heater(&self) -> bool {
        self.heater_type.as_deref() != Some("none")
    }
}

/// Permanent spas share the pool shape
pub type PermanentSpa = Pool;

/// Major appliance with a usage multiplier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appliance {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage_multiplier: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(Appliance, "appliance");

/// Major appliance collections
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Appliances {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub refrigerators: Vec<Appliance>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clothes_washers: Vec<Appliance>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub clothes_dryers: Vec<Appliance>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dishwashers: Vec<Appliance>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub freezers: Vec<Appliance>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub cooking_ranges: Vec<Appliance>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl Appliances {
    /// True when no appliance and no extra field is recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iter().next().is_none() && self.extra.is_empty()
    }

    /// Iterate every appliance in a fixed collection order
    pub fn iter(&self) -> impl Iterator<Item = &Appliance> {
        self.refrigerators
            .iter()
            .chain(&self.clothes_washers)
            .chain(&self.clothes_dryers)
            .chain(&self.dishwashers)
            .chain(&self.freezers)
            .chain(&self.cooking_ranges)
    }

    /// Mutable variant of [`Appliances::iter`]
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Appliance> {
        self.refrigerators
            .iter_mut()
            .chain(&mut self.clothes_washers)
            .chain(&mut self.clothes_dryers)
            .chain(&mut self.dishwashers)
            .chain(&mut self.freezers)
            .chain(&mut self.cooking_ranges)
    }
}
