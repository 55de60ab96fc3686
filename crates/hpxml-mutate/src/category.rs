//! Category catalogue
//!
//! Every adjustment the engine understands, in dispatch order, with its
//! directive name, transform policy and declared range.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::transform::Policy;

/// Named class of adjustment
///
/// Variant order is dispatch order: [`Category::ALL`], the derived `Ord` and
/// the handler registry all agree on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Degrees added to heating setpoints and setbacks
    HeatingSetpointOffset,
    /// Degrees added to cooling setpoints and setups
    CoolingSetpointOffset,
    AirLeakagePctChange,
    HeatingEfficiencyPctChange,
    CoolingEfficiencyPctChange,
    RoofRValuePctChange,
    /// Attic floors
    CeilingRValuePctChange,
    /// Walls and rim joists
    AboveGroundWallsRValuePctChange,
    /// Foundation walls
    BelowGroundWallsRValuePctChange,
    SlabRValuePctChange,
    /// Floors that are not attic floors
    FloorRValuePctChange,
    WaterHeaterEfficiencyPctChange,
    WaterFixturesUsagePctChange,
    WindowUFactorPctChange,
    WindowShgcPctChange,
    ApplianceUsagePctChange,
    LightingLoadPctChange,
    PlugLoadUsagePctChange,
    FuelLoadUsagePctChange,
    PoolSpaUsagePctChange,
}

impl Category {
    /// Every category, in dispatch order
    pub const ALL: [Self; 20] = [
        Self::HeatingSetpointOffset,
        Self::CoolingSetpointOffset,
        Self::AirLeakagePctChange,
        Self::HeatingEfficiencyPctChange,
        Self::CoolingEfficiencyPctChange,
        Self::RoofRValuePctChange,
        Self::CeilingRValuePctChange,
        Self::AboveGroundWallsRValuePctChange,
        Self::BelowGroundWallsRValuePctChange,
        Self::SlabRValuePctChange,
        Self::FloorRValuePctChange,
        Self::WaterHeaterEfficiencyPctChange,
        Self::WaterFixturesUsagePctChange,
        Self::WindowUFactorPctChange,
        Self::WindowShgcPctChange,
        Self::ApplianceUsagePctChange,
        Self::LightingLoadPctChange,
        Self::PlugLoadUsagePctChange,
        Self::FuelLoadUsagePctChange,
        Self::PoolSpaUsagePctChange,
    ];

    /// Directive name as it appears in directive files
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::HeatingSetpointOffset => "heating_setpoint_offset",
            Self::CoolingSetpointOffset => "cooling_setpoint_offset",
            Self::AirLeakagePctChange => "air_leakage_pct_change",
            Self::HeatingEfficiencyPctChange => "heating_efficiency_pct_change",
            Self::CoolingEfficiencyPctChange => "cooling_efficiency_pct_change",
            Self::RoofRValuePctChange => "roof_r_value_pct_change",
            Self::CeilingRValuePctChange => "ceiling_r_value_pct_change",
            Self::AboveGroundWallsRValuePctChange => "above_ground_walls_r_value_pct_change",
            Self::BelowGroundWallsRValuePctChange => "below_ground_walls_r_value_pct_change",
            Self::SlabRValuePctChange => "slab_r_value_pct_change",
            Self::FloorRValuePctChange => "floor_r_value_pct_change",
            Self::WaterHeaterEfficiencyPctChange => "water_heater_efficiency_pct_change",
            Self::WaterFixturesUsagePctChange => "water_fixtures_usage_pct_change",
            Self::WindowUFactorPctChange => "window_u_factor_pct_change",
            Self::WindowShgcPctChange => "window_shgc_pct_change",
            Self::ApplianceUsagePctChange => "appliance_usage_pct_change",
            Self::LightingLoadPctChange => "lighting_load_pct_change",
            Self::PlugLoadUsagePctChange => "plug_load_usage_pct_change",
            Self::FuelLoadUsagePctChange => "fuel_load_usage_pct_change",
            Self::PoolSpaUsagePctChange => "pool_spa_usage_pct_change",
        }
    }

    /// How the directive value combines with a located quantity
    #[must_use]
    pub const fn policy(self) -> Policy {
        match self {
            Self::HeatingSetpointOffset | Self::CoolingSetpointOffset => Policy::Offset,
            _ => Policy::Percent,
        }
    }

    /// Values a directive of this category may take
    ///
    /// Offsets accept any finite number. Percentages cannot go below -100%.
    #[must_use]
    pub const fn declared_range(self) -> DeclaredRange {
        match self.policy() {
            Policy::Offset => DeclaredRange::ANY,
            Policy::Percent => DeclaredRange::AT_LEAST_MINUS_ONE,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|category| category.name() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

/// Name that is not in the catalogue
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

/// Inclusive range of accepted directive values
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DeclaredRange {
    /// Lowest accepted value
    pub min: Option<f64>,
    /// Highest accepted value
    pub max: Option<f64>,
}

impl DeclaredRange {
    /// Any finite number
    pub const ANY: Self = Self {
        min: None,
        max: None,
    };

    /// Percent changes: -100% or more
    pub const AT_LEAST_MINUS_ONE: Self = Self {
        min: Some(-1.0),
        max: None,
    };

    /// True when `value` lies inside the range
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

impl fmt::Display for DeclaredRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min, self.max) {
            (None, None) => f.write_str("(-inf, inf)"),
            (Some(min), None) => write!(f, "[{min}, inf)"),
            (None, Some(max)) => write!(f, "(-inf, {max}]"),
            (Some(min), Some(max)) => write!(f, "[{min}, {max}]"),
        }
    }
}
