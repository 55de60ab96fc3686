//! HPXML Mutate
//!
//! Directive-driven parameter mutation for building documents.
//!
//! # Core Concepts
//!
//! - [`Category`]: A named class of adjustment with a transform policy and a
//!   declared range
//! - [`DirectiveSet`]: Validated map from category to directive value
//! - [`Alternate`] and the concept enums in [`locate`]: which of several
//!   mutually exclusive fields holds a quantity
//! - [`FieldRule`]: Precision, clamp, eligibility and absent-field treatment
//!   for one kind of quantity
//! - [`CategoryHandler`] / [`HandlerRegistry`]: Table-driven dispatch
//! - [`MutationEngine`]: Two-phase apply with all-or-nothing commit
//! - [`Reporter`]: Injected diagnostic sink
//!
//! # Example
//!
//! ```
//! use hpxml_model::{Building, BuildingDocument, Window};
//! use hpxml_mutate::{Category, CollectingReporter, DirectiveSet, MutationConfig, MutationEngine};
//!
//! let mut window = Window::new("w1");
//! window.shgc = Some(0.8);
//! let mut building = Building::new("b1");
//! building.windows.push(window);
//! let mut document = BuildingDocument::with_building(building);
//!
//! let directives = DirectiveSet::builder()
//!     .set(Category::WindowShgcPctChange, 0.5)
//!     .build()
//!     .unwrap();
//!
//! let engine = MutationEngine::new(MutationConfig::default());
//! let report = engine
//!     .apply(&mut document, &directives, &mut CollectingReporter::new())
//!     .unwrap();
//!
//! assert_eq!(document.buildings[0].windows[0].shgc, Some(0.99));
//! assert_eq!(report.changed_fields(), 1);
//! ```

#![warn(unreachable_pub)]

pub mod category;
pub mod config;
pub mod directive;
pub mod engine;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod locate;
pub mod outcome;
pub mod policy;
pub mod registry;
pub mod report;
pub mod transform;

pub use category::{Category, DeclaredRange, UnknownCategory};
pub use config::MutationConfig;
pub use directive::{DirectiveSet, DirectiveSetBuilder};
pub use engine::MutationEngine;
pub use error::{ConfigError, DirectiveError, DirectiveProblem, MutationError};
pub use handler::{ApplyContext, CategoryHandler};
pub use locate::{Alternate, Ambiguity, Infiltration, Season, SetpointControl};
pub use outcome::{FieldChange, FieldValue, MutationOutcome, MutationReport};
pub use policy::{Bounds, FieldRule, Step, UNINSULATED_R_VALUE_THRESHOLD};
pub use registry::HandlerRegistry;
pub use report::{
    CollectingReporter, Diagnostic, DiagnosticKind, EntityRef, Reporter, Severity,
    TracingReporter,
};
pub use transform::{HourlySchedule, Policy, Precision};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;
    use hpxml_model::{Building, BuildingDocument, HeatingSystem};

    #[test]
    fn empty_directive_set_changes_nothing() {
        let mut furnace = HeatingSystem::new("h1");
        furnace.heating_efficiency_afue = Some(0.8);
        let mut building = Building::new("b1");
        building.heating_systems.push(furnace);
        let mut document = BuildingDocument::with_building(building);
        let before = document.clone();

        let report = MutationEngine::default()
            .apply(&mut document, &DirectiveSet::empty(), &mut CollectingReporter::new())
            .unwrap();

        assert_eq!(document, before);
        assert!(report.outcomes.is_empty());
        assert_eq!(report.skipped, Category::ALL);
    }
}
