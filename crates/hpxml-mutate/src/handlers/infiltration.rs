//! Air leakage percentage change

use hpxml_model::{AirInfiltrationMeasurement, Building, Entity};

use crate::category::Category;
use crate::handler::{ApplyContext, CategoryHandler, Pass};
use crate::locate::Infiltration;
use crate::outcome::MutationOutcome;
use crate::policy::FieldRule;

/// Scales the leakage rate or effective leakage area of every measurement
///
/// A qualitative leakiness description is reported and left as is.
#[derive(Debug, Clone, Copy, Default)]
pub struct InfiltrationHandler;

impl CategoryHandler for InfiltrationHandler {
    fn category(&self) -> Category {
        Category::AirLeakagePctChange
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        const KIND: &str = AirInfiltrationMeasurement::KIND;
        let mut pass = Pass::new(self.category(), directive, ctx);

        for measurement in &mut building.air_infiltration_measurements {
            let located = match Infiltration::locate(measurement) {
                Ok(Some(located)) => located,
                Ok(None) => continue,
                Err(ambiguity) => {
                    pass.ambiguous(KIND, &measurement.id, ambiguity);
                    continue;
                }
            };

            let field = located.field();
            match located {
                Infiltration::Rate(_) => {
                    pass.number(
                        KIND,
                        &measurement.id,
                        field,
                        &mut measurement.air_leakage,
                        &FieldRule::AIR_LEAKAGE,
                    );
                }
                Infiltration::LeakageArea(_) => {
                    pass.number(
                        KIND,
                        &measurement.id,
                        field,
                        &mut measurement.effective_leakage_area,
                        &FieldRule::LEAKAGE_AREA,
                    );
                }
                Infiltration::UnsupportedDescription(description) => pass.unsupported(
                    KIND,
                    &measurement.id,
                    field,
                    format!("qualitative leakiness {description:?} has no value to scale"),
                ),
            }
        }

        pass.finish()
    }
}
