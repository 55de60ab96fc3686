//! HPXML Model
//!
//! Typed, in-memory view of a building-performance document.
//!
//! # Core Concepts
//!
//! - [`BuildingDocument`]: Root object; owns one or more [`Building`]s
//! - [`Building`]: Ordered entity collections (HVAC, enclosure, loads)
//! - [`Entity`]: Stable identifier shared by every collection member
//! - [`FuelSummary`]: Fuels providing heating and cooling for a building
//!
//! Every entity keeps the fields it does not model in a flattened `extra`
//! map, so a parse → edit → serialize round trip preserves everything the
//! caller did not touch.
//!
//! # Example
//!
//! ```
//! use hpxml_model::BuildingDocument;
//!
//! let json = r#"{"buildings": [{"building_id": "b1",
//!     "hvac_controls": [{"id": "c1", "heating_setpoint_temp": 68.0}]}]}"#;
//! let document = BuildingDocument::from_json_str(json).unwrap();
//! let building = document.building(None).unwrap();
//! assert_eq!(building.hvac_controls[0].heating_setpoint_temp, Some(68.0));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

mod document;
mod enclosure;
mod error;
mod fuel;
mod hvac;
mod loads;

pub use document::{Building, BuildingDocument, DocumentFormat, Entity};
pub use enclosure::{
    AirInfiltrationMeasurement, Floor, FloorOrCeiling, FoundationWall, RimJoist, Roof, Slab,
    Wall, Window,
};
pub use error::DocumentError;
pub use fuel::FuelSummary;
pub use hvac::{CoolingSystem, HeatPump, HeatingSystem, HvacControl};
pub use loads::{
    Appliance, Appliances, FuelLoad, Lighting, PermanentSpa, PlugLoad, Pool, WaterHeaterType,
    WaterHeatingSystem, WaterHeatingUsage,
};

/// Unmodelled fields carried verbatim through a round trip
pub type ExtraFields = serde_json::Map<String, serde_json::Value>;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
