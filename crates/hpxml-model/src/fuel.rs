//! Fuel types providing space conditioning

use std::collections::BTreeSet;

use crate::document::Building;

/// Distinct fuels that provide heating and cooling for a building
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FuelSummary {
    pub heating: BTreeSet<String>,
    pub cooling: BTreeSet<String>,
}

impl Building {
    /// Collect the fuels used by every heating system, heat pump (including
    /// its backup) and cooling system
    ///
    /// Heat pump fuels count toward heating only; the cooling set comes from
    /// cooling systems alone.
    #[must_use]
    pub fn fuel_summary(&self) -> FuelSummary {
        fn add(set: &mut BTreeSet<String>, fuel: Option<&String>) {
            if let Some(fuel) = fuel.map(|f| f.trim()).filter(|f| !f.is_empty()) {
                set.insert(fuel.to_string());
            }
        }

        let mut summary = FuelSummary::default();

        for system in &self.heating_systems {
            add(&mut summary.heating, system.heating_system_fuel.as_ref());
        }
        for heat_pump in &self.heat_pumps {
            add(&mut summary.heating, heat_pump.heat_pump_fuel.as_ref());
            add(&mut summary.heating, heat_pump.backup_system_fuel.as_ref());
        }
        for system in &self.cooling_systems {
            add(&mut summary.cooling, system.cooling_system_fuel.as_ref());
        }

        summary
    }
}
