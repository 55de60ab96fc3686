//! HVAC entities: thermostat controls, heating, cooling and heat pumps

use serde::{Deserialize, Serialize};

use crate::document::impl_entity;
use crate::ExtraFields;

/// Thermostat control
///
/// Setpoints are recorded either as constant values (with optional
/// setback/setup) or as comma-delimited hourly schedules for weekdays and
/// weekends. A well-formed control uses one of the two forms per season.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HvacControl {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_setpoint_temp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_setback_temp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_setpoint_temp: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_setup_temp: Option<f64>,

    /// 24 comma-separated hourly heating setpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_heating_setpoints: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_heating_setpoints: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekday_cooling_setpoints: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weekend_cooling_setpoints: Option<String>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(HvacControl, "hvac_control");

/// Heating-only system (furnace, boiler, stove, electric resistance, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatingSystem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_system_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_system_fuel: Option<String>,

    /// Annual fuel utilization efficiency (fraction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_efficiency_afue: Option<f64>,

    /// Steady-state efficiency (fraction)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_efficiency_percent: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(HeatingSystem, "heating_system");

/// Cooling-only system (central or room air conditioner, evaporative, ...)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CoolingSystem {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_system_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_system_fuel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_seer: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_seer2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_eer: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_eer2: Option<f64>,

    /// Combined EER (room air conditioners)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_ceer: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(CoolingSystem, "cooling_system");

/// Heat pump providing heating and (usually) cooling
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HeatPump {
    pub id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_pump_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heat_pump_fuel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub backup_system_fuel: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_efficiency_hspf: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_efficiency_hspf2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_efficiency_cop: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_seer: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_seer2: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_eer: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cooling_efficiency_eer2: Option<f64>,

    #[serde(flatten)]
    pub extra: ExtraFields,
}

impl_entity!(HeatPump, "heat_pump");
