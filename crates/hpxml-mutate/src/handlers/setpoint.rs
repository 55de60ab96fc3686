//! Thermostat setpoint offsets

use hpxml_model::{Building, Entity, HvacControl};

use crate::category::Category;
use crate::handler::{ApplyContext, CategoryHandler, Pass};
use crate::locate::{Season, SetpointControl};
use crate::outcome::MutationOutcome;
use crate::policy::FieldRule;
use crate::transform::HourlySchedule;

/// Adds a degree offset to one season's setpoints
///
/// Constant controls get the offset on the setpoint and on the
/// setback/setup. Hourly controls get it on every schedule entry; if either
/// schedule fails to parse, neither is written.
#[derive(Debug, Clone, Copy)]
pub struct SetpointHandler {
    season: Season,
}

impl SetpointHandler {
    /// `heating_setpoint_offset`
    #[must_use]
    pub const fn heating() -> Self {
        Self {
            season: Season::Heating,
        }
    }

    /// `cooling_setpoint_offset`
    #[must_use]
    pub const fn cooling() -> Self {
        Self {
            season: Season::Cooling,
        }
    }

    fn constant(&self, pass: &mut Pass<'_, '_>, control: &mut HvacControl) {
        let names = self.season.fields();
        let id = control.id.clone();
        let [setpoint, setback] = self.season.constant_slots(control);

        pass.number(HvacControl::KIND, &id, names.setpoint, setpoint, &FieldRule::SETPOINT);
        pass.number(HvacControl::KIND, &id, names.setback, setback, &FieldRule::SETPOINT);
    }

    fn hourly(
        &self,
        pass: &mut Pass<'_, '_>,
        control: &mut HvacControl,
        weekday: Option<String>,
        weekend: Option<String>,
    ) {
        let names = self.season.fields();
        let id = control.id.clone();

        let mut shifted = [None, None];
        for (i, (field, text)) in [(names.weekday, weekday), (names.weekend, weekend)]
            .into_iter()
            .enumerate()
        {
            let Some(text) = text else { continue };
            match text.parse::<HourlySchedule>() {
                Ok(schedule) => {
                    let moved = schedule.offset(pass.directive(), FieldRule::SETPOINT.precision);
                    if let Some(hour) = moved.first_non_finite() {
                        pass.non_finite(HvacControl::KIND, &id, field, schedule.values()[hour]);
                        return;
                    }
                    shifted[i] = Some(moved);
                }
                Err(err) => {
                    pass.unsupported(HvacControl::KIND, &id, field, err.to_string());
                    return;
                }
            }
        }

        let fields = [names.weekday, names.weekend];
        let slots = self.season.hourly_slots(control);
        for ((field, slot), schedule) in fields.into_iter().zip(slots).zip(shifted) {
            if let Some(schedule) = schedule {
                pass.schedule(HvacControl::KIND, &id, field, slot, &schedule);
            }
        }
    }
}

impl CategoryHandler for SetpointHandler {
    fn category(&self) -> Category {
        match self.season {
            Season::Heating => Category::HeatingSetpointOffset,
            Season::Cooling => Category::CoolingSetpointOffset,
        }
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        for control in &mut building.hvac_controls {
            match SetpointControl::locate(control, self.season) {
                Ok(Some(SetpointControl::Constant { .. })) => self.constant(&mut pass, control),
                Ok(Some(SetpointControl::Hourly { weekday, weekend })) => {
                    self.hourly(&mut pass, control, weekday, weekend);
                }
                Ok(None) => {}
                Err(ambiguity) => pass.ambiguous(HvacControl::KIND, &control.id, ambiguity),
            }
        }

        pass.finish()
    }
}
