//! Testing utilities for the HPXML calibration workspace
//!
//! Shared fixtures: a representative single-building document touching every
//! adjustable entity collection, plus small builders for one-off entities.

#![allow(missing_docs)]

use hpxml_model::{
    AirInfiltrationMeasurement, Appliance, Building, BuildingDocument, CoolingSystem, Floor,
    FloorOrCeiling, FoundationWall, FuelLoad, HeatPump, HeatingSystem, HvacControl, Lighting,
    PlugLoad, Pool, RimJoist, Roof, Slab, Wall, WaterHeaterType, WaterHeatingSystem,
    WaterHeatingUsage, Window,
};
use serde_json::json;

pub const BUILDING_ID: &str = "MyBuilding";

/// Single-building document with one populated representation per concept
#[must_use]
pub fn sample_document() -> BuildingDocument {
    BuildingDocument::with_building(sample_building())
}

#[must_use]
pub fn sample_building() -> Building {
    let mut building = Building::new(BUILDING_ID);
    building.extra.insert(
        "site".into(),
        json!({"zip_code": "80401", "fuels": ["electricity", "natural gas"]}),
    );

    let mut control = HvacControl::new("HVACControl1");
    control.heating_setpoint_temp = Some(68.0);
    control.heating_setback_temp = Some(64.0);
    control.cooling_setpoint_temp = Some(78.0);
    control.cooling_setup_temp = Some(82.0);
    building.hvac_controls.push(control);

    let mut furnace = HeatingSystem::new("HeatingSystem1");
    furnace.heating_system_type = Some("Furnace".into());
    furnace.heating_system_fuel = Some("natural gas".into());
    furnace.heating_efficiency_afue = Some(0.92);
    building.heating_systems.push(furnace);

    let mut ac = CoolingSystem::new("CoolingSystem1");
    ac.cooling_system_type = Some("central air conditioner".into());
    ac.cooling_system_fuel = Some("electricity".into());
    ac.cooling_efficiency_seer = Some(13.0);
    building.cooling_systems.push(ac);

    let mut heat_pump = HeatPump::new("HeatPump1");
    heat_pump.heat_pump_type = Some("mini-split".into());
    heat_pump.heat_pump_fuel = Some("electricity".into());
    heat_pump.heating_efficiency_hspf = Some(10.0);
    heat_pump.cooling_efficiency_seer = Some(19.0);
    building.heat_pumps.push(heat_pump);

    let mut leakage = AirInfiltrationMeasurement::new("AirInfiltrationMeasurement1");
    leakage.air_leakage = Some(3.0);
    leakage
        .extra
        .insert("unit_of_measure".into(), json!("ACH"));
    leakage.extra.insert("house_pressure".into(), json!(50));
    building.air_infiltration_measurements.push(leakage);

    let mut roof = Roof::new("Roof1");
    roof.insulation_assembly_r_value = Some(2.3);
    building.roofs.push(roof);

    let mut ceiling = Floor::new("Floor1");
    ceiling.exterior_adjacent_to = Some("attic - vented".into());
    ceiling.interior_adjacent_to = Some("conditioned space".into());
    ceiling.insulation_assembly_r_value = Some(39.3);
    building.floors.push(ceiling);

    let mut floor = Floor::new("Floor2");
    floor.exterior_adjacent_to = Some("crawlspace - vented".into());
    floor.interior_adjacent_to = Some("conditioned space".into());
    floor.floor_or_ceiling = Some(FloorOrCeiling::Floor);
    floor.insulation_assembly_r_value = Some(18.7);
    building.floors.push(floor);

    let mut wall = Wall::new("Wall1");
    wall.insulation_assembly_r_value = Some(23.0);
    building.walls.push(wall);

    let mut rim_joist = RimJoist::new("RimJoist1");
    rim_joist.insulation_assembly_r_value = Some(23.0);
    building.rim_joists.push(rim_joist);

    let mut foundation_wall = FoundationWall::new("FoundationWall1");
    foundation_wall.insulation_exterior_r_value = Some(8.9);
    foundation_wall.insulation_interior_r_value = Some(0.0);
    building.foundation_walls.push(foundation_wall);

    let mut slab = Slab::new("Slab1");
    slab.perimeter_insulation_r_value = Some(10.0);
    slab.under_slab_insulation_r_value = Some(0.0);
    building.slabs.push(slab);

    let mut water_heater = WaterHeatingSystem::new("WaterHeatingSystem1");
    water_heater.water_heater_type = Some(WaterHeaterType::Storage);
    water_heater.fuel_type = Some("natural gas".into());
    water_heater.energy_factor = Some(0.59);
    water_heater.recovery_efficiency = Some(0.76);
    building.water_heating_systems.push(water_heater);

    building.water_heating = Some(WaterHeatingUsage::new("WaterFixtures"));

    let mut lighting = Lighting::new("Lighting");
    lighting.interior_usage_multiplier = Some(1.0);
    building.lighting = Some(lighting);

    let mut window = Window::new("Window1");
    window.u_factor = Some(0.33);
    window.shgc = Some(0.45);
    building.windows.push(window);

    let mut television = PlugLoad::new("PlugLoad1");
    television.plug_load_type = Some("TV other".into());
    building.plug_loads.push(television);

    let mut grill = FuelLoad::new("FuelLoad1");
    grill.fuel_load_type = Some("grill".into());
    grill.usage_multiplier = Some(0.8);
    building.fuel_loads.push(grill);

    let mut pool = Pool::new("Pool1");
    pool.pump_usage_multiplier = Some(1.0);
    pool.heater_type = Some("gas fired".into());
    building.pools.push(pool);

    let mut spa = Pool::new("PermanentSpa1");
    spa.heater_type = Some("none".into());
    building.permanent_spas.push(spa);

    building
        .appliances
        .refrigerators
        .push(Appliance::new("Refrigerator1"));
    let mut washer = Appliance::new("ClothesWasher1");
    washer.usage_multiplier = Some(1.5);
    building.appliances.clothes_washers.push(washer);
    building
        .appliances
        .cooking_ranges
        .push(Appliance::new("CookingRange1"));

    building
}

/// Thermostat with hourly schedules instead of constant setpoints
#[must_use]
pub fn hourly_control(id: &str, heating: &str, cooling: &str) -> HvacControl {
    let mut control = HvacControl::new(id);
    control.weekday_heating_setpoints = Some(heating.to_string());
    control.weekend_heating_setpoints = Some(heating.to_string());
    control.weekday_cooling_setpoints = Some(cooling.to_string());
    control.weekend_cooling_setpoints = Some(cooling.to_string());
    control
}

/// Heat-pump water heater with a derived recovery efficiency
#[must_use]
pub fn heat_pump_water_heater(id: &str, energy_factor: f64) -> WaterHeatingSystem {
    let mut heater = WaterHeatingSystem::new(id);
    heater.water_heater_type = Some(WaterHeaterType::HeatPump);
    heater.fuel_type = Some("electricity".into());
    heater.energy_factor = Some(energy_factor);
    heater.recovery_efficiency = Some(0.98);
    heater
}

/// Wrap a building in a document
#[must_use]
pub fn document_with(building: Building) -> BuildingDocument {
    BuildingDocument::with_building(building)
}
