//! Per-category outcomes and the pass report

use std::fmt;

use serde::Serialize;

use crate::category::Category;

/// Stored value of a quantity field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// Field not populated
    Absent,
    /// Numeric quantity
    Number(f64),
    /// Hourly schedule
    Text(String),
}

impl From<Option<f64>> for FieldValue {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Self::Absent, Self::Number)
    }
}

impl From<Option<String>> for FieldValue {
    fn from(value: Option<String>) -> Self {
        value.map_or(Self::Absent, Self::Text)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absent => f.write_str("(absent)"),
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(text) => write!(f, "{text:?}"),
        }
    }
}

/// One field written during the pass
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldChange {
    /// Entity kind
    pub entity_kind: &'static str,
    /// Entity identifier
    pub entity_id: String,
    /// Field written
    pub field: &'static str,
    /// Value before the pass
    pub before: FieldValue,
    /// Value after the pass
    pub after: FieldValue,
}

impl FieldChange {
    /// True when `after` differs from `before`
    #[inline]
    #[must_use]
    pub fn is_change(&self) -> bool {
        self.before != self.after
    }
}

impl fmt::Display for FieldChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {:?} {}: {} -> {}",
            self.entity_kind, self.entity_id, self.field, self.before, self.after
        )
    }
}

/// Result of applying one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MutationOutcome {
    /// Category applied
    pub category: Category,
    /// Directive value applied
    pub directive: f64,
    /// Fields written, in document order
    pub changes: Vec<FieldChange>,
    /// Fields located but left alone (e.g. uninsulated surfaces)
    pub ineligible: usize,
    /// Entities skipped with a warning
    pub warnings: usize,
    /// Entities skipped as ambiguous
    pub ambiguities: usize,
}

impl MutationOutcome {
    /// Empty outcome
    #[must_use]
    pub fn new(category: Category, directive: f64) -> Self {
        Self {
            category,
            directive,
            changes: Vec::new(),
            ineligible: 0,
            warnings: 0,
            ambiguities: 0,
        }
    }

    /// Number of fields whose value actually changed
    #[must_use]
    pub fn changed_fields(&self) -> usize {
        self.changes.iter().filter(|c| c.is_change()).count()
    }

    /// True when nothing was written
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Result of a whole mutation pass
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MutationReport {
    /// Building the pass ran against
    pub building_id: String,
    /// Outcomes in dispatch order
    pub outcomes: Vec<MutationOutcome>,
    /// Categories absent from the directive set
    pub skipped: Vec<Category>,
}

impl MutationReport {
    /// Outcome for one category
    #[must_use]
    pub fn outcome(&self, category: Category) -> Option<&MutationOutcome> {
        self.outcomes.iter().find(|o| o.category == category)
    }

    /// Every field written, in dispatch order
    pub fn changes(&self) -> impl Iterator<Item = &FieldChange> {
        self.outcomes.iter().flat_map(|o| &o.changes)
    }

    /// Field writes touching one entity
    pub fn changes_for<'a>(&'a self, entity_id: &'a str) -> impl Iterator<Item = &'a FieldChange> {
        self.changes().filter(move |c| c.entity_id == entity_id)
    }

    /// Warnings across all categories
    #[must_use]
    pub fn warnings(&self) -> usize {
        self.outcomes.iter().map(|o| o.warnings).sum()
    }

    /// Ambiguous entities across all categories
    #[must_use]
    pub fn ambiguities(&self) -> usize {
        self.outcomes.iter().map(|o| o.ambiguities).sum()
    }

    /// Number of fields whose value actually changed
    #[must_use]
    pub fn changed_fields(&self) -> usize {
        self.outcomes.iter().map(MutationOutcome::changed_fields).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn change(id: &str, before: Option<f64>, after: Option<f64>) -> FieldChange {
        FieldChange {
            entity_kind: "window",
            entity_id: id.into(),
            field: "u_factor",
            before: before.into(),
            after: after.into(),
        }
    }

    #[test]
    fn report_totals() {
        let mut u_factor = MutationOutcome::new(Category::WindowUFactorPctChange, 0.1);
        u_factor.changes.push(change("w1", Some(0.3), Some(0.33)));
        u_factor.changes.push(change("w2", Some(0.0), Some(0.0)));
        u_factor.warnings = 1;

        let mut shgc = MutationOutcome::new(Category::WindowShgcPctChange, 0.1);
        shgc.ambiguities = 2;

        let report = MutationReport {
            building_id: "b".into(),
            outcomes: vec![u_factor, shgc],
            skipped: vec![Category::RoofRValuePctChange],
        };

        assert_eq!(report.changed_fields(), 1);
        assert_eq!(report.warnings(), 1);
        assert_eq!(report.ambiguities(), 2);
        assert_eq!(report.changes_for("w2").count(), 1);
        assert!(report.outcome(Category::WindowShgcPctChange).unwrap().is_noop());
        assert!(report.outcome(Category::RoofRValuePctChange).is_none());
    }

    #[test]
    fn field_value_serializes_plainly() {
        let change = change("w1", None, Some(1.25));
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json["before"], serde_json::Value::Null);
        assert_eq!(json["after"], serde_json::json!(1.25));
        assert_eq!(change.to_string(), "window \"w1\" u_factor: (absent) -> 1.25");
    }
}
