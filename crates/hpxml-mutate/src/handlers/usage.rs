//! Usage multiplier percentage changes
//!
//! An absent multiplier counts as 1.0, so every handled entity ends the pass
//! with an explicit multiplier.

use hpxml_model::{
    Appliance, Building, Entity, FuelLoad, Lighting, PlugLoad, Pool, WaterHeatingUsage,
};

use crate::category::Category;
use crate::handler::{ApplyContext, CategoryHandler, Pass};
use crate::outcome::MutationOutcome;
use crate::policy::FieldRule;

/// Loads a usage category applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UsageTarget {
    /// Hot water fixtures
    WaterFixtures,
    /// Major appliances
    Appliances,
    /// Interior lighting
    Lighting,
    /// Electric plug loads
    PlugLoads,
    /// Fuel-burning loads
    FuelLoads,
    /// Pool and spa pumps, and heaters that exist
    PoolsAndSpas,
}

/// Scales usage multipliers
#[derive(Debug, Clone, Copy)]
pub struct UsageHandler {
    target: UsageTarget,
}

impl UsageHandler {
    /// Handler for one group of loads
    #[must_use]
    pub const fn new(target: UsageTarget) -> Self {
        Self { target }
    }
}

fn multiplier(
    pass: &mut Pass<'_, '_>,
    kind: &'static str,
    id: &str,
    field: &'static str,
    slot: &mut Option<f64>,
) {
    pass.number(kind, id, field, slot, &FieldRule::USAGE_MULTIPLIER);
}

fn pools(pass: &mut Pass<'_, '_>, pools: &mut [Pool], kind: &'static str) {
    for pool in pools {
        multiplier(
            pass,
            kind,
            &pool.id,
            "pump_usage_multiplier",
            &mut pool.pump_usage_multiplier,
        );
        if pool.has_heater() {
            multiplier(
                pass,
                kind,
                &pool.id,
                "heater_usage_multiplier",
                &mut pool.heater_usage_multiplier,
            );
        }
    }
}

impl CategoryHandler for UsageHandler {
    fn category(&self) -> Category {
        match self.target {
            UsageTarget::WaterFixtures => Category::WaterFixturesUsagePctChange,
            UsageTarget::Appliances => Category::ApplianceUsagePctChange,
            UsageTarget::Lighting => Category::LightingLoadPctChange,
            UsageTarget::PlugLoads => Category::PlugLoadUsagePctChange,
            UsageTarget::FuelLoads => Category::FuelLoadUsagePctChange,
            UsageTarget::PoolsAndSpas => Category::PoolSpaUsagePctChange,
        }
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        match self.target {
            UsageTarget::WaterFixtures => {
                if let Some(usage) = &mut building.water_heating {
                    multiplier(
                        &mut pass,
                        WaterHeatingUsage::KIND,
                        &usage.id,
                        "water_fixtures_usage_multiplier",
                        &mut usage.water_fixtures_usage_multiplier,
                    );
                }
            }
            UsageTarget::Appliances => {
                for appliance in building.appliances.iter_mut() {
                    multiplier(
                        &mut pass,
                        Appliance::KIND,
                        &appliance.id,
                        "usage_multiplier",
                        &mut appliance.usage_multiplier,
                    );
                }
            }
            UsageTarget::Lighting => {
                if let Some(lighting) = &mut building.lighting {
                    multiplier(
                        &mut pass,
                        Lighting::KIND,
                        &lighting.id,
                        "interior_usage_multiplier",
                        &mut lighting.interior_usage_multiplier,
                    );
                }
            }
            UsageTarget::PlugLoads => {
                for load in &mut building.plug_loads {
                    multiplier(
                        &mut pass,
                        PlugLoad::KIND,
                        &load.id,
                        "usage_multiplier",
                        &mut load.usage_multiplier,
                    );
                }
            }
            UsageTarget::FuelLoads => {
                for load in &mut building.fuel_loads {
                    multiplier(
                        &mut pass,
                        FuelLoad::KIND,
                        &load.id,
                        "usage_multiplier",
                        &mut load.usage_multiplier,
                    );
                }
            }
            UsageTarget::PoolsAndSpas => {
                pools(&mut pass, &mut building.pools, Pool::KIND);
                pools(&mut pass, &mut building.permanent_spas, "permanent_spa");
            }
        }

        pass.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::apply;

    #[test]
    fn absent_multiplier_is_established() {
        let mut building = Building::new("b");
        building.plug_loads.push(PlugLoad::new("tv"));

        let (outcome, _) = apply(&UsageHandler::new(UsageTarget::PlugLoads), &mut building, 0.25);

        assert_eq!(building.plug_loads[0].usage_multiplier, Some(1.25));
        assert_eq!(outcome.changed_fields(), 1);
    }

    #[test]
    fn present_multiplier_is_scaled() {
        let mut grill = FuelLoad::new("grill");
        grill.usage_multiplier = Some(0.8);
        let mut building = Building::new("b");
        building.fuel_loads.push(grill);

        apply(&UsageHandler::new(UsageTarget::FuelLoads), &mut building, -0.25);

        assert_eq!(building.fuel_loads[0].usage_multiplier, Some(0.6));
    }

    #[test]
    fn appliances_cover_every_collection() {
        let mut building = Building::new("b");
        building.appliances.refrigerators.push(Appliance::new("fridge"));
        building.appliances.dishwashers.push(Appliance::new("dw"));
        let mut washer = Appliance::new("cw");
        washer.usage_multiplier = Some(1.5);
        building.appliances.clothes_washers.push(washer);

        apply(&UsageHandler::new(UsageTarget::Appliances), &mut building, 0.1);

        let appliances = &building.appliances;
        assert_eq!(appliances.refrigerators[0].usage_multiplier, Some(1.1));
        assert_eq!(appliances.dishwashers[0].usage_multiplier, Some(1.1));
        assert_eq!(appliances.clothes_washers[0].usage_multiplier, Some(1.65));
    }

    #[test]
    fn missing_records_are_a_noop() {
        let mut building = Building::new("b");

        let (lighting, _) = apply(&UsageHandler::new(UsageTarget::Lighting), &mut building, 0.5);
        let (fixtures, _) =
            apply(&UsageHandler::new(UsageTarget::WaterFixtures), &mut building, 0.5);

        assert!(lighting.is_noop());
        assert!(fixtures.is_noop());
        assert_eq!(building, Building::new("b"));
    }

    #[test]
    fn heaterless_spa_keeps_no_heater_multiplier() {
        let mut pool = Pool::new("pool");
        pool.heater_type = Some("gas fired".into());
        let mut spa = Pool::new("spa");
        spa.heater_type = Some("none".into());
        let mut building = Building::new("b");
        building.pools.push(pool);
        building.permanent_spas.push(spa);

        apply(&UsageHandler::new(UsageTarget::PoolsAndSpas), &mut building, -0.2);

        assert_eq!(building.pools[0].pump_usage_multiplier, Some(0.8));
        assert_eq!(building.pools[0].heater_usage_multiplier, Some(0.8));
        assert_eq!(building.permanent_spas[0].pump_usage_multiplier, Some(0.8));
        assert_eq!(building.permanent_spas[0].heater_usage_multiplier, None);
    }
}
