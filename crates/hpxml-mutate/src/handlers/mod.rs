//! Built-in category handlers
//!
//! One handler type per concept family; families that cover several
//! categories are parameterised by a target enum.

mod efficiency;
mod infiltration;
mod insulation;
mod setpoint;
mod usage;
mod window;

pub use efficiency::{
    CoolingEfficiencyHandler, HeatingEfficiencyHandler, WaterHeaterEfficiencyHandler,
};
pub use infiltration::InfiltrationHandler;
pub use insulation::{InsulationHandler, InsulationTarget};
pub use setpoint::SetpointHandler;
pub use usage::{UsageHandler, UsageTarget};
pub use window::{WindowHandler, WindowProperty};

#[cfg(test)]
pub(crate) mod testing {
    use hpxml_model::Building;

    use crate::config::MutationConfig;
    use crate::handler::{ApplyContext, CategoryHandler};
    use crate::outcome::MutationOutcome;
    use crate::report::CollectingReporter;

    /// Run one handler with default configuration
    pub(crate) fn apply(
        handler: &dyn CategoryHandler,
        building: &mut Building,
        directive: f64,
    ) -> (MutationOutcome, CollectingReporter) {
        apply_with(handler, building, directive, &MutationConfig::default())
    }

    pub(crate) fn apply_with(
        handler: &dyn CategoryHandler,
        building: &mut Building,
        directive: f64,
        config: &MutationConfig,
    ) -> (MutationOutcome, CollectingReporter) {
        let mut reporter = CollectingReporter::new();
        let outcome = {
            let mut ctx = ApplyContext::new(config, &mut reporter);
            handler.apply(building, directive, &mut ctx)
        };
        (outcome, reporter)
    }
}
