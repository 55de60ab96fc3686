//! Window U-factor and SHGC percentage changes

use hpxml_model::{Building, Entity, Window};

use crate::category::Category;
use crate::handler::{ApplyContext, CategoryHandler, Pass};
use crate::outcome::MutationOutcome;
use crate::policy::FieldRule;

/// Window property a category adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowProperty {
    /// Thermal transmittance
    UFactor,
    /// Solar heat gain coefficient, capped at 0.99
    Shgc,
}

/// Scales one window property on every window
#[derive(Debug, Clone, Copy)]
pub struct WindowHandler {
    property: WindowProperty,
}

impl WindowHandler {
    /// Handler for one property
    #[must_use]
    pub const fn new(property: WindowProperty) -> Self {
        Self { property }
    }
}

impl CategoryHandler for WindowHandler {
    fn category(&self) -> Category {
        match self.property {
            WindowProperty::UFactor => Category::WindowUFactorPctChange,
            WindowProperty::Shgc => Category::WindowShgcPctChange,
        }
    }

    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome {
        let mut pass = Pass::new(self.category(), directive, ctx);

        for window in &mut building.windows {
            let (field, slot, rule) = match self.property {
                WindowProperty::UFactor => ("u_factor", &mut window.u_factor, &FieldRule::U_FACTOR),
                WindowProperty::Shgc => ("shgc", &mut window.shgc, &FieldRule::SHGC),
            };
            pass.number(Window::KIND, &window.id, field, slot, rule);
        }

        pass.finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::apply;

    fn window(u_factor: f64, shgc: f64) -> Building {
        let mut window = Window::new("w1");
        window.u_factor = Some(u_factor);
        window.shgc = Some(shgc);
        let mut building = Building::new("b");
        building.windows.push(window);
        building
    }

    #[test]
    fn u_factor_leaves_shgc() {
        let mut building = window(0.33, 0.45);
        apply(&WindowHandler::new(WindowProperty::UFactor), &mut building, -0.1);

        assert_eq!(building.windows[0].u_factor, Some(0.3));
        assert_eq!(building.windows[0].shgc, Some(0.45));
    }

    #[test]
    fn shgc_is_capped() {
        let mut building = window(0.33, 0.8);
        apply(&WindowHandler::new(WindowProperty::Shgc), &mut building, 0.5);

        assert_eq!(building.windows[0].shgc, Some(0.99));
    }
}
