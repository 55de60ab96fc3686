//! Heating, cooling and water heater efficiency percentage changes

use hpxml_model::{Building, Entity, WaterHeatingSystem};

use crate::category::Category;
use crate::handler::{ApplyContext, CategoryHandler, Pass};
use crate::locate::{
    CoolingEfficiency, HeatPumpCoolingEfficiency, HeatPumpHeatingEfficiency, HeatingEfficiency,
    WaterHeaterEfficiency,
};
use crate::outcome::MutationOutcome;
use crate::policy::FieldRule;

/// Heating systems (AFUE or percent, capped at 1.0) and heat pumps
/// (HSPF, HSPF2 or COP)
#[derive(Debug, Clone, Copy, Default)]
pub struct HeatingEfficiencyHandler;

impl CategoryHandler for HeatingEfficiencyHandler {
    fn category(&self) -> Category {
        Category::HeatingEfficiencyPctChange
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        for system in &mut building.heating_systems {
            pass.alternate::<_, HeatingEfficiency>(system, &FieldRule::FRACTIONAL_EFFICIENCY);
        }
        for heat_pump in &mut building.heat_pumps {
            pass.alternate::<_, HeatPumpHeatingEfficiency>(heat_pump, &FieldRule::EFFICIENCY_RATIO);
        }

        pass.finish()
    }
}

/// Cooling systems (SEER, SEER2, EER, EER2 or CEER) and heat pumps
#[derive(Debug, Clone, Copy, Default)]
pub struct CoolingEfficiencyHandler;

impl CategoryHandler for CoolingEfficiencyHandler {
    fn category(&self) -> Category {
        Category::CoolingEfficiencyPctChange
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        for system in &mut building.cooling_systems {
            pass.alternate::<_, CoolingEfficiency>(system, &FieldRule::EFFICIENCY_RATIO);
        }
        for heat_pump in &mut building.heat_pumps {
            pass.alternate::<_, HeatPumpCoolingEfficiency>(heat_pump, &FieldRule::EFFICIENCY_RATIO);
        }

        pass.finish()
    }
}

/// Water heater energy factor or uniform energy factor
///
/// Clamped by heater technology. A changed value clears
/// `recovery_efficiency`, which was derived from the old one.
#[derive(Debug, Clone, Copy, Default)]
pub struct WaterHeaterEfficiencyHandler;

impl CategoryHandler for WaterHeaterEfficiencyHandler {
    fn category(&self) -> Category {
        Category::WaterHeaterEfficiencyPctChange
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        for heater in &mut building.water_heating_systems {
            let rule = FieldRule::water_heater(heater.is_heat_pump());
            let step = pass.alternate::<_, WaterHeaterEfficiency>(heater, &rule);

            if step.changed() {
                pass.invalidate(
                    WaterHeatingSystem::KIND,
                    &heater.id,
                    "recovery_efficiency",
                    &mut heater.recovery_efficiency,
                );
            }
        }

        pass.finish()
    }
}
