//! Validated numeric input sequences
//!
//! A [`NumericSequence`] is the only way data enters the engine. It is built
//! from comma-separated text (or an existing vector), checked against a
//! [`ValueRange`] policy, and never mutated afterwards.
//!
//! # Examples
//!
//! ```
//! use statlens_stats::sequence::{NumericSequence, ValueRange};
//!
//! let data = NumericSequence::parse("4, 8, 6, 5, 7", &ValueRange::STANDARD).unwrap();
//! assert_eq!(data.as_slice(), &[4.0, 8.0, 6.0, 5.0, 7.0]);
//!
//! // Negative values are rejected by the standard range...
//! assert!(NumericSequence::parse("-1, 2", &ValueRange::STANDARD).is_err());
//! // ...but accepted when the range is unbounded.
//! assert!(NumericSequence::parse("-1, 2", &ValueRange::UNBOUNDED).is_ok());
//! ```

use std::{fmt, str::FromStr};

use serde::Serialize;

use crate::StatsError;

/// The closed interval of values a sequence may contain.
///
/// Either bound may be absent, in which case that side is unrestricted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueRange {
    min: Option<f64>,
    max: Option<f64>,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self::UNBOUNDED
    }
}

impl fmt::Display for ValueRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let min = self.min.unwrap_or(f64::NEG_INFINITY);
        let max = self.max.unwrap_or(f64::INFINITY);
        write!(f, "[{min}, {max}]")
    }
}

impl ValueRange {
    /// Accepts every finite value.
    pub const UNBOUNDED: Self = Self {
        min: None,
        max: None,
    };

    /// Accepts values in `[0, 1_000_000]`.
    pub const STANDARD: Self = Self {
        min: Some(0.0),
        max: Some(1_000_000.0),
    };

    /// Creates a range from optional bounds.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::sequence::ValueRange;
    /// let range = ValueRange::new(Some(0.0), None).unwrap();
    /// assert!(range.contains(1e12));
    /// assert!(!range.contains(-0.5));
    ///
    /// assert!(ValueRange::new(Some(10.0), Some(1.0)).is_err());
    /// assert!(ValueRange::new(Some(f64::NAN), None).is_err());
    /// ```
    pub fn new(min: Option<f64>, max: Option<f64>) -> Result<Self, StatsError> {
        let lower = min.unwrap_or(f64::NEG_INFINITY);
        let upper = max.unwrap_or(f64::INFINITY);
        if lower.is_nan() || upper.is_nan() || lower > upper {
            return Err(StatsError::InvalidRange {
                min: lower,
                max: upper,
            });
        }
        Ok(Self { min, max })
    }

    #[must_use]
    pub fn min(&self) -> Option<f64> {
        self.min
    }

    #[must_use]
    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// Returns `true` if `value` lies within the range, bounds included.
    #[must_use]
    pub fn contains(&self, value: f64) -> bool {
        self.min.is_none_or(|min| value >= min) && self.max.is_none_or(|max| value <= max)
    }
}

/// An ordered, non-empty sequence of finite real numbers.
///
/// Construction validates every element; once built, a sequence is immutable.
/// Derived sequences (such as aligned prefixes) are new values.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct NumericSequence {
    values: Vec<f64>,
}

impl NumericSequence {
    /// Builds a sequence from already-parsed values.
    ///
    /// # Errors
    ///
    /// * [`StatsError::EmptySequence`] if `values` is empty
    /// * [`StatsError::NonFinite`] if any value is infinite or NaN
    /// * [`StatsError::OutOfRange`] for the first value outside `range`
    pub fn new(values: Vec<f64>, range: &ValueRange) -> Result<Self, StatsError> {
        if values.is_empty() {
            return Err(StatsError::EmptySequence);
        }
        for (index, &value) in values.iter().enumerate() {
            if !value.is_finite() {
                return Err(StatsError::NonFinite {
                    token: value.to_string(),
                });
            }
            if !range.contains(value) {
                return Err(StatsError::OutOfRange {
                    index,
                    value,
                    range: *range,
                });
            }
        }
        Ok(Self { values })
    }

    /// Parses comma-separated text into a validated sequence.
    ///
    /// Tokens are trimmed and blank tokens are ignored, so trailing commas and
    /// doubled separators are tolerated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::sequence::{NumericSequence, ValueRange};
    /// let data = NumericSequence::parse(" 1.5,, 2 ,3,", &ValueRange::UNBOUNDED).unwrap();
    /// assert_eq!(data.as_slice(), &[1.5, 2.0, 3.0]);
    ///
    /// assert!(NumericSequence::parse(" , ", &ValueRange::UNBOUNDED).is_err());
    /// assert!(NumericSequence::parse("1, two", &ValueRange::UNBOUNDED).is_err());
    /// ```
    pub fn parse(raw_text: &str, range: &ValueRange) -> Result<Self, StatsError> {
        let values = raw_text
            .split(',')
            .map(str::trim)
            .filter(|token| !token.is_empty())
            .map(parse_token)
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(values, range)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Number of values; always at least one.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Always `false`; provided for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = f64> + '_ {
        self.values.iter().copied()
    }

    /// Returns the values sorted in ascending order.
    #[must_use]
    pub fn sorted(&self) -> Vec<f64> {
        let mut sorted = self.values.clone();
        sorted.sort_by(f64::total_cmp);
        sorted
    }

    /// Returns a new sequence holding the first `len` values.
    ///
    /// The elements were validated when `self` was built, so no check is repeated.
    pub(crate) fn prefix(&self, len: usize) -> Self {
        debug_assert!(
            (1..=self.len()).contains(&len),
            "prefix length must be within 1..=len"
        );
        Self {
            values: self.values[..len].to_vec(),
        }
    }
}

impl FromStr for NumericSequence {
    type Err = StatsError;

    /// Parses with [`ValueRange::UNBOUNDED`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s, &ValueRange::UNBOUNDED)
    }
}

impl fmt::Display for NumericSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{value}")?;
        }
        write!(f, "]")
    }
}

fn parse_token(token: &str) -> Result<f64, StatsError> {
    let value = token
        .parse::<f64>()
        .map_err(|_| StatsError::InvalidNumber {
            token: token.to_owned(),
        })?;
    if !value.is_finite() {
        return Err(StatsError::NonFinite {
            token: token.to_owned(),
        });
    }
    Ok(value)
}
