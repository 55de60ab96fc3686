//! Bounds & invalidation policy
//!
//! A [`FieldRule`] describes how one kind of quantity is adjusted: which
//! transform applies, the stored precision, the clamp, whether the entity is
//! eligible at all, and what an absent field means. [`FieldRule::evaluate`]
//! walks a single (entity, field) pair through the mutation stages and
//! reports how far it got.

use crate::transform::{round_to, Policy, Precision};

/// Default R-value at or below which a surface counts as uninsulated
pub const UNINSULATED_R_VALUE_THRESHOLD: f64 = 4.0;

/// Clamp applied after rounding
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// No clamp
    Unbounded,
    /// Upper limit only
    Ceiling(f64),
    /// Inclusive lower and upper limits
    Range {
        /// Lower limit
        min: f64,
        /// Upper limit
        max: f64,
    },
}

impl Bounds {
    /// Clamp `value` into the bounds
    #[inline]
    #[must_use]
    pub fn clamp(self, value: f64) -> f64 {
        match self {
            Self::Unbounded => value,
            Self::Ceiling(max) => value.min(max),
            Self::Range { min, max } => value.clamp(min, max),
        }
    }
}

/// Which entities a rule may touch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    /// Every entity with a located value
    Always,
    /// Only values strictly above the uninsulated threshold
    AboveThreshold,
}

/// Meaning of an absent field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WhenAbsent {
    /// Nothing to adjust
    Skip,
    /// Treat as `1.0` and establish the field
    AssumeUnity,
}

/// Adjustment rule for one kind of quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldRule {
    /// Transform
    pub policy: Policy,
    /// Rounding applied to the transformed value
    pub precision: Precision,
    /// Clamp applied to the rounded value
    pub bounds: Bounds,
    /// Entity filter
    pub eligibility: Eligibility,
    /// Treatment of an absent field
    pub when_absent: WhenAbsent,
}

impl FieldRule {
    const fn percent(precision: Precision) -> Self {
        Self {
            policy: Policy::Percent,
            precision,
            bounds: Bounds::Unbounded,
            eligibility: Eligibility::Always,
            when_absent: WhenAbsent::Skip,
        }
    }

    /// Constant setpoints and setbacks/setups
    pub const SETPOINT: Self = Self {
        policy: Policy::Offset,
        ..Self::percent(Precision::TWO)
    };

    /// Air leakage rate
    pub const AIR_LEAKAGE: Self = Self::percent(Precision::TWO);

    /// Effective leakage area
    pub const LEAKAGE_AREA: Self = Self::percent(Precision::ONE);

    /// AFUE and percent heating efficiency
    pub const FRACTIONAL_EFFICIENCY: Self = Self {
        bounds: Bounds::Ceiling(1.0),
        ..Self::percent(Precision::TWO)
    };

    /// HSPF, HSPF2, COP, SEER, SEER2, EER, EER2, CEER
    pub const EFFICIENCY_RATIO: Self = Self::percent(Precision::TWO);

    /// Insulation R-values
    pub const R_VALUE: Self = Self {
        eligibility: Eligibility::AboveThreshold,
        ..Self::percent(Precision::ONE)
    };

    /// Usage multipliers
    pub const USAGE_MULTIPLIER: Self = Self {
        when_absent: WhenAbsent::AssumeUnity,
        ..Self::percent(Precision::TWO)
    };

    /// Window U-factor
    pub const U_FACTOR: Self = Self::percent(Precision::TWO);

    /// Window solar heat gain coefficient
    pub const SHGC: Self = Self {
        bounds: Bounds::Ceiling(0.99),
        ..Self::percent(Precision::TWO)
    };

    /// Water heater energy factor or uniform energy factor
    #[must_use]
    pub const fn water_heater(is_heat_pump: bool) -> Self {
        let bounds = if is_heat_pump {
            Bounds::Range {
                min: 1.01,
                max: 5.0,
            }
        } else {
            Bounds::Ceiling(0.99)
        };
        Self {
            bounds,
            ..Self::percent(Precision::TWO)
        }
    }

    /// Walk one field through locate → transform → round → bound
    ///
    /// `threshold` only matters for [`Eligibility::AboveThreshold`] rules.
    /// A transform that overflows stops at [`Step::NonFinite`] before the
    /// clamp, so a bound never masks it.
    #[must_use]
    pub fn evaluate(&self, prior: Option<f64>, directive: f64, threshold: f64) -> Step {
        let located = match (prior, self.when_absent) {
            (Some(value), _) => value,
            (None, WhenAbsent::AssumeUnity) => 1.0,
            (None, WhenAbsent::Skip) => return Step::Absent,
        };

        if self.eligibility == Eligibility::AboveThreshold && located <= threshold {
            return Step::Ineligible { value: located };
        }

        let rounded = round_to(self.policy.apply(located, directive), self.precision);
        if !rounded.is_finite() {
            return Step::NonFinite { value: located };
        }
        let after = self.bounds.clamp(rounded);

        Step::Written {
            before: prior,
            after,
        }
    }
}

/// How far a field got through the mutation stages
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Step {
    /// Nothing located; no-op
    Absent,
    /// Located but not eligible; no-op
    Ineligible {
        /// The located value
        value: f64,
    },
    /// Transform overflowed; no-op
    NonFinite {
        /// The located value
        value: f64,
    },
    /// Transformed, rounded, bounded and ready to store
    Written {
        /// Stored value before the pass, if any
        before: Option<f64>,
        /// Value to store
        after: f64,
    },
}

impl Step {
    /// True when the stored value differs after the write
    #[inline]
    #[must_use]
    pub fn changed(&self) -> bool {
        match self {
            Self::Written { before, after } => *before != Some(*after),
            Self::Absent | Self::Ineligible { .. } | Self::NonFinite { .. } => false,
        }
    }

    /// Value to store, if the field reached the write stage
    #[inline]
    #[must_use]
    pub fn written(&self) -> Option<f64> {
        match self {
            Self::Written { after, .. } => Some(*after),
            Self::Absent | Self::Ineligible { .. } | Self::NonFinite { .. } => None,
        }
    }
}
