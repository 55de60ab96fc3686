//! Diagnostics and the injected reporter
//!
//! The engine never logs or prints on its own: every skipped category,
//! unsupported representation, ambiguous entity and malformed directive is
//! handed to a [`Reporter`] supplied by the caller.

use std::fmt;

use serde::Serialize;

use crate::category::Category;
use crate::error::DirectiveProblem;

/// Diagnostic severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Expected no-op, e.g. a category absent from the directive set
    Info,
    /// Representation the engine cannot adjust; entity left untouched
    Warning,
    /// Ambiguous state or malformed input
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Fatal => "fatal",
        })
    }
}

/// Entity a diagnostic refers to
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntityRef {
    /// Entity kind
    pub kind: &'static str,
    /// Entity identifier
    pub id: String,
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}", self.kind, self.id)
    }
}

/// What happened
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// Category absent from the directive set
    Skipped,

    /// Located representation cannot be adjusted
    UnsupportedRepresentation {
        /// Field holding the representation
        field: &'static str,
        /// Human-readable reason
        detail: String,
    },

    /// Adjusted value overflowed; field left unchanged
    NonFiniteResult {
        /// Field that would have been written
        field: &'static str,
        /// Value before adjustment
        located: f64,
    },

    /// More than one alternate populated on one entity
    AmbiguousState {
        /// Every populated alternate
        fields: Vec<&'static str>,
    },

    /// Directive rejected during validation
    MalformedDirective {
        /// Rendered problem
        problem: String,
    },

    /// Strict mode discarded the pass
    StrictAbort {
        /// Warnings raised during the pass
        warnings: usize,
        /// Ambiguous entities encountered during the pass
        ambiguities: usize,
    },
}

impl DiagnosticKind {
    /// Severity implied by the kind
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::Skipped => Severity::Info,
            Self::UnsupportedRepresentation { .. } | Self::NonFiniteResult { .. } => {
                Severity::Warning
            }
            Self::AmbiguousState { .. }
            | Self::MalformedDirective { .. }
            | Self::StrictAbort { .. } => Severity::Fatal,
        }
    }
}

/// Structured diagnostic
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    /// Category being applied, when the diagnostic belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,

    /// Entity concerned, when the diagnostic belongs to one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity: Option<EntityRef>,

    /// What happened
    #[serde(flatten)]
    pub kind: DiagnosticKind,
}

impl Diagnostic {
    /// Severity of this diagnostic
    #[inline]
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.kind.severity()
    }

    /// Category absent from the directive set
    #[must_use]
    pub fn skipped(category: Category) -> Self {
        Self {
            category: Some(category),
            entity: None,
            kind: DiagnosticKind::Skipped,
        }
    }

    /// Representation on `entity` cannot be adjusted
    #[must_use]
    pub fn unsupported(
        category: Category,
        entity: EntityRef,
        field: &'static str,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            category: Some(category),
            entity: Some(entity),
            kind: DiagnosticKind::UnsupportedRepresentation {
                field,
                detail: detail.into(),
            },
        }
    }

    /// Adjusting `field` on `entity` produced a non-finite value
    #[must_use]
    pub fn non_finite(
        category: Category,
        entity: EntityRef,
        field: &'static str,
        located: f64,
    ) -> Self {
        Self {
            category: Some(category),
            entity: Some(entity),
            kind: DiagnosticKind::NonFiniteResult { field, located },
        }
    }

    /// Several alternates populated on `entity`
    #[must_use]
    pub fn ambiguous(category: Category, entity: EntityRef, fields: Vec<&'static str>) -> Self {
        Self {
            category: Some(category),
            entity: Some(entity),
            kind: DiagnosticKind::AmbiguousState { fields },
        }
    }

    /// Directive rejected during validation
    #[must_use]
    pub fn malformed(problem: &DirectiveProblem) -> Self {
        let category = match problem {
            DirectiveProblem::NotFinite { category }
            | DirectiveProblem::OutOfRange { category, .. } => Some(*category),
            DirectiveProblem::UnknownCategory { .. } | DirectiveProblem::NotNumeric { .. } => None,
        };
        Self {
            category,
            entity: None,
            kind: DiagnosticKind::MalformedDirective {
                problem: problem.to_string(),
            },
        }
    }

    /// Strict mode discarded the pass
    #[must_use]
    pub fn strict_abort(warnings: usize, ambiguities: usize) -> Self {
        Self {
            category: None,
            entity: None,
            kind: DiagnosticKind::StrictAbort {
                warnings,
                ambiguities,
            },
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(category) = self.category {
            write!(f, "[{category}] ")?;
        }
        if let Some(entity) = &self.entity {
            write!(f, "{entity}: ")?;
        }
        match &self.kind {
            DiagnosticKind::Skipped => f.write_str("no directive; skipped"),
            DiagnosticKind::UnsupportedRepresentation { field, detail } => {
                write!(f, "unsupported representation {field}: {detail}")
            }
            DiagnosticKind::NonFiniteResult { field, located } => {
                write!(f, "{field} = {located} does not adjust to a finite value; left unchanged")
            }
            DiagnosticKind::AmbiguousState { fields } => {
                write!(f, "ambiguous state, populated: {}", fields.join(", "))
            }
            DiagnosticKind::MalformedDirective { problem } => {
                write!(f, "malformed directive: {problem}")
            }
            DiagnosticKind::StrictAbort {
                warnings,
                ambiguities,
            } => write!(
                f,
                "strict mode: {warnings} warning(s), {ambiguities} ambiguous state(s); nothing committed"
            ),
        }
    }
}

/// Sink for engine diagnostics
pub trait Reporter {
    /// Expected no-op
    fn info(&mut self, diagnostic: Diagnostic);

    /// Entity left untouched because its representation is unsupported
    fn warn(&mut self, diagnostic: Diagnostic);

    /// Ambiguous state or malformed input
    fn fatal(&mut self, diagnostic: Diagnostic);

    /// Route a diagnostic by its severity
    fn report(&mut self, diagnostic: Diagnostic) {
        match diagnostic.severity() {
            Severity::Info => self.info(diagnostic),
            Severity::Warning => self.warn(diagnostic),
            Severity::Fatal => self.fatal(diagnostic),
        }
    }
}

/// Forwards diagnostics to `tracing` at info, warn and error level
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn info(&mut self, diagnostic: Diagnostic) {
        tracing::info!(category = ?diagnostic.category, "{diagnostic}");
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        tracing::warn!(category = ?diagnostic.category, "{diagnostic}");
    }

    fn fatal(&mut self, diagnostic: Diagnostic) {
        tracing::error!(category = ?diagnostic.category, "{diagnostic}");
    }
}

/// Records every diagnostic in arrival order
#[derive(Debug, Default, Clone)]
pub struct CollectingReporter {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingReporter {
    /// Create an empty reporter
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every diagnostic received
    #[inline]
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    /// Diagnostics of one severity
    pub fn with_severity(&self, severity: Severity) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics
            .iter()
            .filter(move |d| d.severity() == severity)
    }

    /// Number of diagnostics of one severity
    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.with_severity(severity).count()
    }

    /// Take the recorded diagnostics
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl Reporter for CollectingReporter {
    fn info(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn warn(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }

    fn fatal(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wall() -> EntityRef {
        EntityRef {
            kind: "foundation_wall",
            id: "FoundationWall1".into(),
        }
    }

    #[test]
    fn severity_follows_kind() {
        assert_eq!(
            Diagnostic::skipped(Category::RoofRValuePctChange).severity(),
            Severity::Info
        );
        assert_eq!(
            Diagnostic::unsupported(Category::AirLeakagePctChange, wall(), "f", "x").severity(),
            Severity::Warning
        );
        assert_eq!(
            Diagnostic::non_finite(Category::RoofRValuePctChange, wall(), "f", 30.0).severity(),
            Severity::Warning
        );
        assert_eq!(
            Diagnostic::ambiguous(Category::BelowGroundWallsRValuePctChange, wall(), vec![])
                .severity(),
            Severity::Fatal
        );
    }

    #[test]
    fn report_routes_by_severity() {
        let mut reporter = CollectingReporter::new();
        reporter.report(Diagnostic::skipped(Category::SlabRValuePctChange));
        reporter.report(Diagnostic::strict_abort(1, 0));

        assert_eq!(reporter.count(Severity::Info), 1);
        assert_eq!(reporter.count(Severity::Fatal), 1);
        assert_eq!(reporter.count(Severity::Warning), 0);
    }

    #[test]
    fn display_names_category_and_entity() {
        let diagnostic = Diagnostic::ambiguous(
            Category::BelowGroundWallsRValuePctChange,
            wall(),
            vec!["insulation_assembly_r_value", "insulation_exterior_r_value"],
        );
        assert_eq!(
            diagnostic.to_string(),
            "[below_ground_walls_r_value_pct_change] foundation_wall \"FoundationWall1\": \
             ambiguous state, populated: insulation_assembly_r_value, insulation_exterior_r_value"
        );
    }

    #[test]
    fn malformed_keeps_known_category() {
        let diagnostic = Diagnostic::malformed(&DirectiveProblem::NotFinite {
            category: Category::WindowShgcPctChange,
        });
        assert_eq!(diagnostic.category, Some(Category::WindowShgcPctChange));

        let diagnostic = Diagnostic::malformed(&DirectiveProblem::UnknownCategory {
            name: "nope".into(),
        });
        assert_eq!(diagnostic.category, None);
    }

    #[test]
    fn serializes_with_kind_tag() {
        let json =
            serde_json::to_value(Diagnostic::skipped(Category::LightingLoadPctChange)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"category": "lighting_load_pct_change", "kind": "skipped"})
        );
    }
}
