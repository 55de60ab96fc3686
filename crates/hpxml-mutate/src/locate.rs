//! Quantity locator
//!
//! A physical quantity may be recorded under one of several mutually
//! exclusive fields. Each concept is a sum type resolved once per entity:
//! alternates are checked in the fixed order of the enum's variants, exactly
//! one populated alternate yields that variant, none yields `None`, and two or
//! more yield an [`Ambiguity`] instead of a silent pick.
//!
//! Numeric concepts implement [`Alternate`], which also hands back the
//! storage slot of the located variant so the write goes to the same field
//! that was read.

use std::fmt;

use hpxml_model::{
    AirInfiltrationMeasurement, Building, CoolingSystem, Entity, FoundationWall, HeatPump,
    HeatingSystem, HvacControl, WaterHeatingSystem,
};

/// More than one alternate of a concept is populated on one entity
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("more than one representation populated: {}", .fields.join(", "))]
pub struct Ambiguity {
    /// Every populated alternate, in lookup order
    pub fields: Vec<&'static str>,
}

/// Pick the single populated candidate, probing in order
fn exclusive<T, const N: usize>(
    candidates: [(&'static str, Option<T>); N],
) -> Result<Option<(&'static str, T)>, Ambiguity> {
    let mut found = None;
    let mut populated = Vec::new();

    for (field, value) in candidates {
        if let Some(value) = value {
            populated.push(field);
            if found.is_none() {
                found = Some((field, value));
            }
        }
    }

    if populated.len() > 1 {
        Err(Ambiguity { fields: populated })
    } else {
        Ok(found)
    }
}

/// Numeric concept with one storage field per variant
pub trait Alternate<E>: Sized {
    /// Resolve the active alternate on `entity`
    ///
    /// # Errors
    /// Returns [`Ambiguity`] when more than one alternate is populated
    fn locate(entity: &E) -> Result<Option<Self>, Ambiguity>;

    /// Field name of the located variant
    fn field(&self) -> &'static str;

    /// Located value
    fn value(&self) -> f64;

    /// Storage of the located variant on `entity`
    fn slot<'e>(&self, entity: &'e mut E) -> &'e mut Option<f64>;
}

/// Generates a numeric concept enum and its [`Alternate`] impl
///
/// Variants are listed in lookup order as `Variant => field`.
macro_rules! alternate {
    (
        $(#[$meta:meta])*
        $name:ident for $entity:ty { $($variant:ident => $field:ident),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq)]
        pub enum $name {
            $(
                #[doc = concat!("`", stringify!($field), "`")]
                $variant(f64),
            )+
        }

        impl Alternate<$entity> for $name {
            fn locate(entity: &$entity) -> Result<Option<Self>, Ambiguity> {
                let located = exclusive([
                    $((stringify!($field), entity.$field.map(Self::$variant)),)+
                ])?;
                Ok(located.map(|(_, value)| value))
            }

            fn field(&self) -> &'static str {
                match self {
                    $(Self::$variant(_) => stringify!($field),)+
                }
            }

            fn value(&self) -> f64 {
                match self {
                    $(Self::$variant(value) => *value,)+
                }
            }

            fn slot<'e>(&self, entity: &'e mut $entity) -> &'e mut Option<f64> {
                match self {
                    $(Self::$variant(_) => &mut entity.$field,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                let field = <Self as Alternate<$entity>>::field(self);
                let value = <Self as Alternate<$entity>>::value(self);
                write!(f, "{field} = {value}")
            }
        }
    };
}

alternate! {
    /// Combustion or electric-resistance heating efficiency
    HeatingEfficiency for HeatingSystem {
        Afue => heating_efficiency_afue,
        Percent => heating_efficiency_percent,
    }
}

alternate! {
    /// Heat pump heating efficiency
    HeatPumpHeatingEfficiency for HeatPump {
        Hspf => heating_efficiency_hspf,
        Hspf2 => heating_efficiency_hspf2,
        Cop => heating_efficiency_cop,
    }
}

alternate! {
    /// Cooling system efficiency
    CoolingEfficiency for CoolingSystem {
        Seer => cooling_efficiency_seer,
        Seer2 => cooling_efficiency_seer2,
        Eer => cooling_efficiency_eer,
        Eer2 => cooling_efficiency_eer2,
        Ceer => cooling_efficiency_ceer,
    }
}

alternate! {
    /// Heat pump cooling efficiency
    HeatPumpCoolingEfficiency for HeatPump {
        Seer => cooling_efficiency_seer,
        Seer2 => cooling_efficiency_seer2,
        Eer => cooling_efficiency_eer,
        Eer2 => cooling_efficiency_eer2,
    }
}

alternate! {
    /// Water heater efficiency
    WaterHeaterEfficiency for WaterHeatingSystem {
        EnergyFactor => energy_factor,
        UniformEnergyFactor => uniform_energy_factor,
    }
}

/// Heating or cooling side of a thermostat
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Season {
    /// Setpoints and setbacks
    Heating,
    /// Setpoints and setups
    Cooling,
}

/// Field names of one season's thermostat representation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeasonFields {
    /// Constant setpoint
    pub setpoint: &'static str,
    /// Constant setback (heating) or setup (cooling)
    pub setback: &'static str,
    /// Weekday hourly schedule
    pub weekday: &'static str,
    /// Weekend hourly schedule
    pub weekend: &'static str,
}

impl Season {
    /// Field names for this season
    #[must_use]
    pub const fn fields(self) -> SeasonFields {
        match self {
            Self::Heating => SeasonFields {
                setpoint: "heating_setpoint_temp",
                setback: "heating_setback_temp",
                weekday: "weekday_heating_setpoints",
                weekend: "weekend_heating_setpoints",
            },
            Self::Cooling => SeasonFields {
                setpoint: "cooling_setpoint_temp",
                setback: "cooling_setup_temp",
                weekday: "weekday_cooling_setpoints",
                weekend: "weekend_cooling_setpoints",
            },
        }
    }

    /// Constant setpoint and setback/setup storage
    pub fn constant_slots(self, control: &mut HvacControl) -> [&mut Option<f64>; 2] {
        match self {
            Self::Heating => [
                &mut control.heating_setpoint_temp,
                &mut control.heating_setback_temp,
            ],
            Self::Cooling => [
                &mut control.cooling_setpoint_temp,
                &mut control.cooling_setup_temp,
            ],
        }
    }

    /// Weekday and weekend schedule storage
    pub fn hourly_slots(self, control: &mut HvacControl) -> [&mut Option<String>; 2] {
        match self {
            Self::Heating => [
                &mut control.weekday_heating_setpoints,
                &mut control.weekend_heating_setpoints,
            ],
            Self::Cooling => [
                &mut control.weekday_cooling_setpoints,
                &mut control.weekend_cooling_setpoints,
            ],
        }
    }
}

/// Thermostat representation for one season
#[derive(Debug, Clone, PartialEq)]
pub enum SetpointControl {
    /// Constant setpoint with an optional setback or setup
    Constant {
        /// Setpoint temperature
        setpoint: Option<f64>,
        /// Setback (heating) or setup (cooling) temperature
        setback: Option<f64>,
    },
    /// Comma-delimited hourly schedules
    Hourly {
        /// Weekday schedule
        weekday: Option<String>,
        /// Weekend schedule
        weekend: Option<String>,
    },
}

impl SetpointControl {
    /// Resolve the representation used for `season`
    ///
    /// # Errors
    /// Returns [`Ambiguity`] when both constant and hourly fields are set
    pub fn locate(control: &HvacControl, season: Season) -> Result<Option<Self>, Ambiguity> {
        let names = season.fields();
        let (setpoint, setback, weekday, weekend) = match season {
            Season::Heating => (
                control.heating_setpoint_temp,
                control.heating_setback_temp,
                &control.weekday_heating_setpoints,
                &control.weekend_heating_setpoints,
            ),
            Season::Cooling => (
                control.cooling_setpoint_temp,
                control.cooling_setup_temp,
                &control.weekday_cooling_setpoints,
                &control.weekend_cooling_setpoints,
            ),
        };

        let constant = (setpoint.is_some() || setback.is_some())
            .then_some(Self::Constant { setpoint, setback });
        let hourly = (weekday.is_some() || weekend.is_some()).then(|| Self::Hourly {
            weekday: weekday.clone(),
            weekend: weekend.clone(),
        });

        if constant.is_some() && hourly.is_some() {
            let fields = [
                (names.setpoint, setpoint.is_some()),
                (names.setback, setback.is_some()),
                (names.weekday, weekday.is_some()),
                (names.weekend, weekend.is_some()),
            ]
            .into_iter()
            .filter_map(|(name, populated)| populated.then_some(name))
            .collect();
            return Err(Ambiguity { fields });
        }

        Ok(constant.or(hourly))
    }
}

impl fmt::Display for SetpointControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constant { setpoint, setback } => {
                write!(f, "constant (setpoint {setpoint:?}, setback/setup {setback:?})")
            }
            Self::Hourly { weekday, weekend } => write!(
                f,
                "hourly ({} weekday, {} weekend entries)",
                weekday.as_deref().map_or(0, |s| s.split(',').count()),
                weekend.as_deref().map_or(0, |s| s.split(',').count()),
            ),
        }
    }
}

/// Infiltration representation
#[derive(Debug, Clone, PartialEq)]
pub enum Infiltration {
    /// `air_leakage` rate
    Rate(f64),
    /// `effective_leakage_area`
    LeakageArea(f64),
    /// `leakiness_description`, which has no numeric form to scale
    UnsupportedDescription(String),
}

impl Infiltration {
    /// Resolve the representation on a measurement
    ///
    /// # Errors
    /// Returns [`Ambiguity`] when more than one representation is populated
    pub fn locate(measurement: &AirInfiltrationMeasurement) -> Result<Option<Self>, Ambiguity> {
        let located = exclusive([
            ("air_leakage", measurement.air_leakage.map(Self::Rate)),
            (
                "effective_leakage_area",
                measurement.effective_leakage_area.map(Self::LeakageArea),
            ),
            (
                "leakiness_description",
                measurement
                    .leakiness_description
                    .clone()
                    .map(Self::UnsupportedDescription),
            ),
        ])?;
        Ok(located.map(|(_, value)| value))
    }

    /// Field name of the located variant
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Rate(_) => "air_leakage",
            Self::LeakageArea(_) => "effective_leakage_area",
            Self::UnsupportedDescription(_) => "leakiness_description",
        }
    }
}

impl fmt::Display for Infiltration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rate(value) | Self::LeakageArea(value) => write!(f, "{} = {value}", self.field()),
            Self::UnsupportedDescription(text) => write!(f, "{} = {text:?}", self.field()),
        }
    }
}

/// Foundation wall insulation representation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FoundationWallInsulation {
    /// Whole-assembly R-value
    Assembly(f64),
    /// Separate exterior and interior layers
    Layers {
        /// Exterior layer R-value
        exterior: Option<f64>,
        /// Interior layer R-value
        interior: Option<f64>,
    },
}

impl FoundationWallInsulation {
    /// Resolve the representation on a foundation wall
    ///
    /// # Errors
    /// Returns [`Ambiguity`] when an assembly value and a layer are both set
    pub fn locate(wall: &FoundationWall) -> Result<Option<Self>, Ambiguity> {
        let exterior = wall.insulation_exterior_r_value;
        let interior = wall.insulation_interior_r_value;
        let layers = (exterior.is_some() || interior.is_some())
            .then_some(Self::Layers { exterior, interior });

        match (wall.insulation_assembly_r_value, layers) {
            (Some(_), Some(_)) => Err(Ambiguity {
                fields: [
                    ("insulation_assembly_r_value", true),
                    ("insulation_exterior_r_value", exterior.is_some()),
                    ("insulation_interior_r_value", interior.is_some()),
                ]
                .into_iter()
                .filter_map(|(name, populated)| populated.then_some(name))
                .collect(),
            }),
            (Some(assembly), None) => Ok(Some(Self::Assembly(assembly))),
            (None, layers) => Ok(layers),
        }
    }
}

impl fmt::Display for FoundationWallInsulation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Assembly(value) => write!(f, "insulation_assembly_r_value = {value}"),
            Self::Layers { exterior, interior } => {
                write!(f, "layers (exterior {exterior:?}, interior {interior:?})")
            }
        }
    }
}

/// Active representation of one concept on one entity
#[derive(Debug, Clone, PartialEq)]
pub struct LocatedQuantity {
    /// Entity kind
    pub entity_kind: &'static str,
    /// Entity identifier
    pub entity_id: String,
    /// Concept looked up
    pub concept: &'static str,
    /// Rendered representation, `None` when nothing is populated
    pub representation: Result<Option<String>, Ambiguity>,
}

fn located<E: Entity, T: fmt::Display>(
    entity: &E,
    concept: &'static str,
    result: Result<Option<T>, Ambiguity>,
) -> LocatedQuantity {
    LocatedQuantity {
        entity_kind: E::KIND,
        entity_id: entity.id().to_string(),
        concept,
        representation: result.map(|found| found.map(|value| value.to_string())),
    }
}

/// Locate every concept with alternate representations on a building
///
/// Entities are visited in collection order; read-only.
#[must_use]
pub fn survey(building: &Building) -> Vec<LocatedQuantity> {
    let mut found = Vec::new();

    for control in &building.hvac_controls {
        for (season, concept) in [
            (Season::Heating, "heating setpoints"),
            (Season::Cooling, "cooling setpoints"),
        ] {
            found.push(located(control, concept, SetpointControl::locate(control, season)));
        }
    }
    for system in &building.heating_systems {
        found.push(located(system, "heating efficiency", HeatingEfficiency::locate(system)));
    }
    for system in &building.cooling_systems {
        found.push(located(system, "cooling efficiency", CoolingEfficiency::locate(system)));
    }
    for heat_pump in &building.heat_pumps {
        found.push(located(
            heat_pump,
            "heating efficiency",
            HeatPumpHeatingEfficiency::locate(heat_pump),
        ));
        found.push(located(
            heat_pump,
            "cooling efficiency",
            HeatPumpCoolingEfficiency::locate(heat_pump),
        ));
    }
    for measurement in &building.air_infiltration_measurements {
        found.push(located(measurement, "infiltration", Infiltration::locate(measurement)));
    }
    for wall in &building.foundation_walls {
        found.push(located(wall, "insulation", FoundationWallInsulation::locate(wall)));
    }
    for heater in &building.water_heating_systems {
        found.push(located(
            heater,
            "water heater efficiency",
            WaterHeaterEfficiency::locate(heater),
        ));
    }

    found
}
