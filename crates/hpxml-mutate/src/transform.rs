//! Transform functions
//!
//! Pure numeric transforms: additive offsets, multiplicative percentage
//! changes, decimal rounding, and offsets over comma-delimited hourly
//! schedules.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

/// How a directive value combines with a quantity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// `v + d`
    Offset,
    /// `v * (1 + p)`
    Percent,
}

impl Policy {
    /// Apply the directive to a value, without rounding
    #[inline]
    #[must_use]
    pub fn apply(self, value: f64, directive: f64) -> f64 {
        match self {
            Self::Offset => offset(value, directive),
            Self::Percent => scale(value, directive),
        }
    }
}

/// Additive offset
#[inline]
#[must_use]
pub fn offset(value: f64, delta: f64) -> f64 {
    value + delta
}

/// Multiplicative percentage change
///
/// A change of `-1.0` yields exactly zero for any finite value.
#[inline]
#[must_use]
pub fn scale(value: f64, pct: f64) -> f64 {
    value * (1.0 + pct)
}

/// Number of decimal places a quantity is stored with
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Precision(u8);

impl Precision {
    /// One decimal place (R-values, leakage area)
    pub const ONE: Self = Self(1);

    /// Two decimal places (efficiencies, multipliers, window properties,
    /// leakage rates, setpoints)
    pub const TWO: Self = Self(2);

    /// Precision with `places` decimal places
    #[inline]
    #[must_use]
    pub const fn places(places: u8) -> Self {
        Self(places)
    }

    /// Decimal places
    #[inline]
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

/// Round half away from zero to `precision` decimal places
///
/// Negative zero is normalised to zero.
#[must_use]
pub fn round_to(value: f64, precision: Precision) -> f64 {
    let factor = 10f64.powi(i32::from(precision.0));
    (value * factor).round() / factor + 0.0
}

/// Comma-delimited list of hourly values
#[derive(Debug, Clone, PartialEq)]
pub struct HourlySchedule(Vec<f64>);

impl HourlySchedule {
    /// Hourly values
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.0
    }

    /// Number of entries
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the schedule holds no entries
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First entry that is not finite
    #[must_use]
    pub fn first_non_finite(&self) -> Option<usize> {
        self.0.iter().position(|value| !value.is_finite())
    }

    /// Add `delta` to every entry, rounding each result
    #[must_use]
    pub fn offset(&self, delta: f64, precision: Precision) -> Self {
        Self(
            self.0
                .iter()
                .map(|value| round_to(offset(*value, delta), precision))
                .collect(),
        )
    }
}

/// Hourly schedule entry that is not a finite number
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("schedule entry {position} is not a number: {entry:?}")]
pub struct ScheduleParseError {
    /// Zero-based entry position
    pub position: usize,
    /// The offending entry, trimmed
    pub entry: String,
}

impl FromStr for HourlySchedule {
    type Err = ScheduleParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.split(',')
            .enumerate()
            .map(|(position, entry)| {
                let entry = entry.trim();
                entry
                    .parse::<f64>()
                    .ok()
                    .filter(|value| value.is_finite())
                    .ok_or_else(|| ScheduleParseError {
                        position,
                        entry: entry.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self)
    }
}

impl fmt::Display for HourlySchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{value}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_of_minus_one_is_zero() {
        assert_eq!(scale(39.3, -1.0), 0.0);
        assert_eq!(round_to(scale(39.3, -1.0), Precision::ONE), 0.0);
    }

    #[test]
    fn rounding_is_half_away_from_zero() {
        assert_eq!(round_to(2.25, Precision::ONE), 2.3);
        assert_eq!(round_to(-2.25, Precision::ONE), -2.3);
        assert_eq!(round_to(1.045_000_1, Precision::TWO), 1.05);
    }

    #[test]
    fn negative_zero_is_normalised() {
        let rounded = round_to(-0.001, Precision::TWO);
        assert_eq!(rounded, 0.0);
        assert!(rounded.is_sign_positive());
    }

    #[test]
    fn schedule_offset_keeps_length() {
        let schedule: HourlySchedule = "62,62,68".parse().unwrap();
        let shifted = schedule.offset(-1.5, Precision::TWO);

        assert_eq!(shifted.len(), 3);
        assert_eq!(shifted.to_string(), "60.5,60.5,66.5");
    }

    #[test]
    fn schedule_tolerates_whitespace() {
        let schedule: HourlySchedule = " 70 , 71.5,72 ".parse().unwrap();
        assert_eq!(schedule.values(), [70.0, 71.5, 72.0]);
        assert_eq!(schedule.to_string(), "70,71.5,72");
    }

    #[test]
    fn schedule_rejects_bad_entries() {
        let err = "68,,70".parse::<HourlySchedule>().unwrap_err();
        assert_eq!(err.position, 1);

        let err = "68,warm".parse::<HourlySchedule>().unwrap_err();
        assert_eq!(err.entry, "warm");

        assert!("".parse::<HourlySchedule>().is_err());
        assert!("68,NaN".parse::<HourlySchedule>().is_err());
    }
}
