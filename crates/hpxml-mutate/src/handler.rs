//! Category handler trait and the shared write path
//!
//! Handlers decide *which* entities and alternates a category touches.
//! [`Pass`] owns *how* a located field is written: rule evaluation, the
//! write itself, change recording, diagnostics and per-field tracing.

use hpxml_model::{Building, Entity};

use crate::category::Category;
use crate::config::MutationConfig;
use crate::locate::{Alternate, Ambiguity};
use crate::outcome::{FieldChange, FieldValue, MutationOutcome};
use crate::policy::{FieldRule, Step};
use crate::report::{Diagnostic, EntityRef, Reporter};
use crate::transform::HourlySchedule;

/// Applies one category to a building
///
/// Implementations must touch only the fields of their own category, and
/// must resolve each entity's representation once before writing.
pub trait CategoryHandler: Send + Sync {
    /// Category handled
    fn category(&self) -> Category;

    /// Apply `directive` to every relevant entity of `building`
    fn apply(
        &self,
        building: &mut Building,
        directive: f64,
        ctx: &mut ApplyContext<'_>,
    ) -> MutationOutcome;
}

/// Shared state handed to every handler during a pass
pub struct ApplyContext<'a> {
    /// Pass configuration
    pub config: &'a MutationConfig,
    /// Diagnostic sink
    pub reporter: &'a mut dyn Reporter,
}

impl std::fmt::Debug for ApplyContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplyContext")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<'a> ApplyContext<'a> {
    /// Create a context
    #[inline]
    pub fn new(config: &'a MutationConfig, reporter: &'a mut dyn Reporter) -> Self {
        Self { config, reporter }
    }
}

/// One category's walk over a building
pub(crate) struct Pass<'c, 'a> {
    category: Category,
    directive: f64,
    ctx: &'c mut ApplyContext<'a>,
    outcome: MutationOutcome,
}

impl<'c, 'a> Pass<'c, 'a> {
    pub(crate) fn new(category: Category, directive: f64, ctx: &'c mut ApplyContext<'a>) -> Self {
        Self {
            category,
            directive,
            ctx,
            outcome: MutationOutcome::new(category, directive),
        }
    }

    /// Directive value being applied
    pub(crate) fn directive(&self) -> f64 {
        self.directive
    }

    /// Evaluate `rule` against one numeric field and store the result
    pub(crate) fn number(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        field: &'static str,
        slot: &mut Option<f64>,
        rule: &FieldRule,
    ) -> Step {
        let step = rule.evaluate(
            *slot,
            self.directive,
            self.ctx.config.uninsulated_r_value_threshold,
        );

        match step {
            Step::Absent => {}
            Step::Ineligible { value } => {
                tracing::trace!(
                    category = %self.category,
                    entity = entity_id,
                    field,
                    value,
                    "field not eligible"
                );
                self.outcome.ineligible += 1;
            }
            Step::NonFinite { value } => self.non_finite(entity_kind, entity_id, field, value),
            Step::Written { before, after } => {
                *slot = Some(after);
                tracing::debug!(
                    category = %self.category,
                    entity = entity_id,
                    field,
                    ?before,
                    after,
                    "field written"
                );
                self.record(entity_kind, entity_id, field, before.into(), Some(after).into());
            }
        }

        step
    }

    /// Locate a numeric alternate on `entity` and write it through `rule`
    ///
    /// Ambiguous entities are reported and left untouched.
    pub(crate) fn alternate<E, A>(&mut self, entity: &mut E, rule: &FieldRule) -> Step
    where
        E: Entity,
        A: Alternate<E>,
    {
        match A::locate(entity) {
            Ok(Some(located)) => {
                let id = entity.id().to_string();
                let field = located.field();
                self.number(E::KIND, &id, field, located.slot(entity), rule)
            }
            Ok(None) => Step::Absent,
            Err(ambiguity) => {
                self.ambiguous(E::KIND, entity.id(), ambiguity);
                Step::Absent
            }
        }
    }

    /// Replace an hourly schedule with an already shifted one
    pub(crate) fn schedule(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        field: &'static str,
        slot: &mut Option<String>,
        shifted: &HourlySchedule,
    ) {
        let after = shifted.to_string();
        tracing::debug!(
            category = %self.category,
            entity = entity_id,
            field,
            before = ?slot,
            after = %after,
            "schedule written"
        );
        let before = slot.replace(after.clone());
        self.record(entity_kind, entity_id, field, before.into(), FieldValue::Text(after));
    }

    /// Clear a derived field made stale by a write
    pub(crate) fn invalidate(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        field: &'static str,
        slot: &mut Option<f64>,
    ) {
        if let Some(before) = slot.take() {
            tracing::debug!(
                category = %self.category,
                entity = entity_id,
                field,
                before,
                "derived field cleared"
            );
            self.record(
                entity_kind,
                entity_id,
                field,
                FieldValue::Number(before),
                FieldValue::Absent,
            );
        }
    }

    /// Report an entity whose representation cannot be adjusted
    pub(crate) fn unsupported(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        field: &'static str,
        detail: impl Into<String>,
    ) {
        self.outcome.warnings += 1;
        self.ctx.reporter.warn(Diagnostic::unsupported(
            self.category,
            entity_ref(entity_kind, entity_id),
            field,
            detail,
        ));
    }

    /// Report a field whose adjustment overflowed; the field keeps `located`
    pub(crate) fn non_finite(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        field: &'static str,
        located: f64,
    ) {
        self.outcome.warnings += 1;
        self.ctx.reporter.warn(Diagnostic::non_finite(
            self.category,
            entity_ref(entity_kind, entity_id),
            field,
            located,
        ));
    }

    /// Report an entity with more than one populated alternate
    pub(crate) fn ambiguous(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        ambiguity: Ambiguity,
    ) {
        self.outcome.ambiguities += 1;
        self.ctx.reporter.fatal(Diagnostic::ambiguous(
            self.category,
            entity_ref(entity_kind, entity_id),
            ambiguity.fields,
        ));
    }

    fn record(
        &mut self,
        entity_kind: &'static str,
        entity_id: &str,
        field: &'static str,
        before: FieldValue,
        after: FieldValue,
    ) {
        self.outcome.changes.push(FieldChange {
            entity_kind,
            entity_id: entity_id.to_string(),
            field,
            before,
            after,
        });
    }

    /// Close the pass and return its outcome
    pub(crate) fn finish(self) -> MutationOutcome {
        tracing::info!(
            category = %self.category,
            directive = self.directive,
            written = self.outcome.changes.len(),
            changed = self.outcome.changed_fields(),
            ineligible = self.outcome.ineligible,
            warnings = self.outcome.warnings,
            ambiguities = self.outcome.ambiguities,
            "category applied"
        );
        self.outcome
    }
}

fn entity_ref(kind: &'static str, id: &str) -> EntityRef {
    EntityRef {
        kind,
        id: id.to_string(),
    }
}
