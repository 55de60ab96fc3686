//! Mutation dispatcher
//!
//! Two phases: a [`DirectiveSet`] is validated when it is built, then
//! [`MutationEngine::apply`] walks the category catalogue in order and hands
//! each present directive to its handler. Writes land on a working copy of
//! the building that replaces the original only when the pass completes; a
//! strict-mode abort or any error leaves the document as it was.

use std::collections::BTreeMap;

use hpxml_model::BuildingDocument;
use serde_json::Value;

use crate::category::Category;
use crate::config::MutationConfig;
use crate::directive::DirectiveSet;
use crate::error::{DirectiveError, MutationError};
use crate::handler::ApplyContext;
use crate::outcome::MutationReport;
use crate::registry::HandlerRegistry;
use crate::report::{Diagnostic, Reporter};

/// Applies directive sets to building documents
#[derive(Debug, Default)]
pub struct MutationEngine {
    registry: HandlerRegistry,
    config: MutationConfig,
}

impl MutationEngine {
    /// Engine with the default handlers
    #[must_use]
    pub fn new(config: MutationConfig) -> Self {
        Self::with_registry(config, HandlerRegistry::with_defaults())
    }

    /// Engine with a custom registry
    #[must_use]
    pub fn with_registry(config: MutationConfig, registry: HandlerRegistry) -> Self {
        Self { registry, config }
    }

    /// Active configuration
    #[inline]
    #[must_use]
    pub fn config(&self) -> &MutationConfig {
        &self.config
    }

    /// Registered handlers
    #[inline]
    #[must_use]
    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Validate raw directives and apply them
    ///
    /// Every validation problem is reported as a fatal diagnostic before the
    /// error is returned; nothing is applied in that case.
    ///
    /// # Errors
    /// As [`Self::apply`], plus [`MutationError::InvalidDirectives`]
    pub fn apply_values(
        &self,
        document: &mut BuildingDocument,
        values: &BTreeMap<String, Value>,
        reporter: &mut dyn Reporter,
    ) -> Result<MutationReport, MutationError> {
        let directives =
            DirectiveSet::from_values(values.iter().map(|(name, value)| (name.as_str(), value)))
                .map_err(|err| report_invalid(err, reporter))?;
        self.apply(document, &directives, reporter)
    }

    /// Apply a validated directive set to the configured building
    ///
    /// # Errors
    /// - [`MutationError::Config`] if the configuration is invalid
    /// - [`MutationError::Document`] if the building cannot be found
    /// - [`MutationError::MissingHandler`] if a directive has no handler
    /// - [`MutationError::StrictAbort`] in strict mode when any warning or
    ///   ambiguity was raised
    ///
    /// The document is unchanged whenever an error is returned.
    pub fn apply(
        &self,
        document: &mut BuildingDocument,
        directives: &DirectiveSet,
        reporter: &mut dyn Reporter,
    ) -> Result<MutationReport, MutationError> {
        self.config.validate()?;

        if let Some((category, _)) = directives
            .iter()
            .find(|(category, _)| !self.registry.contains(*category))
        {
            return Err(MutationError::MissingHandler(category));
        }

        let building = document.building_mut(self.config.building_id.as_deref())?;
        let mut staged = building.clone();
        let mut report = MutationReport {
            building_id: building.building_id.clone(),
            ..MutationReport::default()
        };

        tracing::info!(
            building = %report.building_id,
            directives = directives.len(),
            strict = self.config.strict,
            "starting mutation pass"
        );

        {
            let mut ctx = ApplyContext::new(&self.config, reporter);
            for category in Category::ALL {
                match (directives.get(category), self.registry.get(category)) {
                    (Some(value), Some(handler)) => {
                        report.outcomes.push(handler.apply(&mut staged, value, &mut ctx));
                    }
                    _ => {
                        ctx.reporter.info(Diagnostic::skipped(category));
                        report.skipped.push(category);
                    }
                }
            }
        }

        let (warnings, ambiguities) = (report.warnings(), report.ambiguities());
        if self.config.strict && (warnings > 0 || ambiguities > 0) {
            reporter.fatal(Diagnostic::strict_abort(warnings, ambiguities));
            return Err(MutationError::StrictAbort {
                warnings,
                ambiguities,
            });
        }

        *building = staged;

        tracing::info!(
            building = %report.building_id,
            changed = report.changed_fields(),
            warnings,
            ambiguities,
            skipped = report.skipped.len(),
            "mutation pass complete"
        );

        Ok(report)
    }
}

fn report_invalid(err: DirectiveError, reporter: &mut dyn Reporter) -> MutationError {
    for problem in err.problems() {
        reporter.fatal(Diagnostic::malformed(problem));
    }
    MutationError::InvalidDirectives(err)
}
