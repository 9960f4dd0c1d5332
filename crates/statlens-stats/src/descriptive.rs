//! Descriptive statistics over a single sequence

use std::fmt;

use serde::Serialize;

use crate::{StatsError, require_finite, require_len, sequence::NumericSequence};

/// The most frequent value of a sequence, if one exists.
///
/// A sequence in which no value repeats has no mode. This is a distinct
/// variant rather than a numeric placeholder, so it cannot be used in arithmetic
/// by accident.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Value(f64),
    NoMode,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Value(value) => fmt::Display::fmt(value, f),
            Mode::NoMode => f.write_str("NO MODE"),
        }
    }
}

impl Mode {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Mode::Value(value) => Some(value),
            Mode::NoMode => None,
        }
    }
}

/// Descriptive statistics summarizing a sequence.
///
/// Dispersion measures use the sample (`n - 1`) estimator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DescriptiveStats {
    /// The number of values in the sequence.
    pub count: usize,
    /// The minimum value.
    pub min: f64,
    /// The maximum value.
    pub max: f64,
    /// The arithmetic mean.
    pub mean: f64,
    /// The middle of the sorted values (mean of the two middle values for even lengths).
    pub median: f64,
    /// The most frequent value.
    pub mode: Mode,
    /// The sample variance.
    pub variance: f64,
    /// The sample standard deviation.
    pub std_dev: f64,
    /// `std_dev / mean * 100`, or `0` when the mean is zero.
    pub coefficient_of_variation: f64,
}

impl DescriptiveStats {
    /// Computes every descriptive statistic of `sequence`.
    ///
    /// The input is sorted once and shared by the order-based statistics.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError::InsufficientData`] if the sequence has fewer than two
    /// values, since the sample variance is undefined there, and
    /// [`StatsError::Overflow`] if a dispersion measure exceeds the `f64` range.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{descriptive::{DescriptiveStats, Mode}, sequence::NumericSequence};
    /// let data: NumericSequence = "2, 4, 4, 4, 5, 5, 7, 9".parse().unwrap();
    /// let stats = DescriptiveStats::new(&data).unwrap();
    /// assert_eq!(stats.mean, 5.0);
    /// assert_eq!(stats.median, 4.5);
    /// assert_eq!(stats.mode, Mode::Value(4.0));
    /// assert!((stats.variance - 32.0 / 7.0).abs() < 1e-12);
    ///
    /// let single: NumericSequence = "3".parse().unwrap();
    /// assert!(DescriptiveStats::new(&single).is_err());
    /// ```
    pub fn new(sequence: &NumericSequence) -> Result<Self, StatsError> {
        let sorted = sequence.sorted();
        let count = sorted.len();
        require_len("variance", 2, count)?;

        let mean = mean(sequence);
        let spread = Spread::new(sequence.as_slice(), mean);
        let variance = require_finite("variance", spread.variance)?;
        let std_dev = require_finite("standard deviation", spread.std_dev)?;
        let coefficient_of_variation =
            require_finite("coefficient of variation", relative_spread(std_dev, mean))?;

        Ok(Self {
            count,
            min: sorted[0],
            max: sorted[count - 1],
            mean,
            median: median_of_sorted(&sorted),
            mode: mode_of_sorted(&sorted),
            variance,
            std_dev,
            coefficient_of_variation,
        })
    }
}

/// The smallest value of the sequence.
#[must_use]
pub fn min(sequence: &NumericSequence) -> f64 {
    sequence.iter().fold(f64::INFINITY, f64::min)
}

/// The largest value of the sequence.
#[must_use]
pub fn max(sequence: &NumericSequence) -> f64 {
    sequence.iter().fold(f64::NEG_INFINITY, f64::max)
}

/// The arithmetic mean.
///
/// The result is always finite, even when the plain sum of the values is not.
///
/// ```
/// # use statlens_stats::{descriptive::mean, sequence::NumericSequence};
/// let data: NumericSequence = "1, 2, 3, 4".parse().unwrap();
/// assert_eq!(mean(&data), 2.5);
///
/// let huge: NumericSequence = "1e308, 1e308".parse().unwrap();
/// assert_eq!(mean(&huge), 1e308);
/// ```
#[must_use]
pub fn mean(sequence: &NumericSequence) -> f64 {
    mean_of(sequence.as_slice())
}

/// The median; independent of element order.
///
/// ```
/// # use statlens_stats::{descriptive::median, sequence::NumericSequence};
/// let odd: NumericSequence = "5, 1, 3".parse().unwrap();
/// assert_eq!(median(&odd), 3.0);
/// let even: NumericSequence = "4, 1, 3, 2".parse().unwrap();
/// assert_eq!(median(&even), 2.5);
/// ```
#[must_use]
pub fn median(sequence: &NumericSequence) -> f64 {
    median_of_sorted(&sequence.sorted())
}

/// The most frequent value.
///
/// Returns [`Mode::NoMode`] when every value occurs exactly once. When several
/// values share the highest frequency, the smallest of them is returned.
///
/// ```
/// # use statlens_stats::{descriptive::{mode, Mode}, sequence::NumericSequence};
/// let data: NumericSequence = "1, 2, 2, 3".parse().unwrap();
/// assert_eq!(mode(&data), Mode::Value(2.0));
///
/// let distinct: NumericSequence = "1, 2, 3".parse().unwrap();
/// assert_eq!(mode(&distinct), Mode::NoMode);
/// ```
#[must_use]
pub fn mode(sequence: &NumericSequence) -> Mode {
    mode_of_sorted(&sequence.sorted())
}

/// The sample variance (divisor `n - 1`).
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] for a single-value sequence
/// * [`StatsError::Overflow`] if the variance exceeds the `f64` range
pub fn variance(sequence: &NumericSequence) -> Result<f64, StatsError> {
    require_len("variance", 2, sequence.len())?;
    let spread = Spread::new(sequence.as_slice(), mean(sequence));
    require_finite("variance", spread.variance)
}

/// The sample standard deviation.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] for a single-value sequence
/// * [`StatsError::Overflow`] if the standard deviation exceeds the `f64` range
///
/// The standard deviation can stay representable when the variance does not:
///
/// ```
/// # use statlens_stats::{descriptive::{std_dev, variance}, sequence::NumericSequence};
/// let data: NumericSequence = "-1e308, 1e308".parse().unwrap();
/// assert!(variance(&data).is_err());
/// assert!((std_dev(&data).unwrap() / 1e308 - 2.0_f64.sqrt()).abs() < 1e-12);
/// ```
pub fn std_dev(sequence: &NumericSequence) -> Result<f64, StatsError> {
    require_len("standard deviation", 2, sequence.len())?;
    let spread = Spread::new(sequence.as_slice(), mean(sequence));
    require_finite("standard deviation", spread.std_dev)
}

/// The coefficient of variation as a percentage.
///
/// A zero mean yields `0` instead of a division fault.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] for a single-value sequence
/// * [`StatsError::Overflow`] if the result exceeds the `f64` range
///
/// ```
/// # use statlens_stats::{descriptive::coefficient_of_variation, sequence::NumericSequence};
/// let constant: NumericSequence = "5, 5, 5, 5".parse().unwrap();
/// assert_eq!(coefficient_of_variation(&constant).unwrap(), 0.0);
///
/// let zeros: NumericSequence = "0, 0, 0".parse().unwrap();
/// assert_eq!(coefficient_of_variation(&zeros).unwrap(), 0.0);
/// ```
pub fn coefficient_of_variation(sequence: &NumericSequence) -> Result<f64, StatsError> {
    require_len("coefficient of variation", 2, sequence.len())?;
    let mean = mean(sequence);
    let std_dev = require_finite(
        "standard deviation",
        Spread::new(sequence.as_slice(), mean).std_dev,
    )?;
    require_finite("coefficient of variation", relative_spread(std_dev, mean))
}

/// Mean of a non-empty slice that stays finite for any finite input.
#[expect(clippy::cast_precision_loss)]
pub(crate) fn mean_of(values: &[f64]) -> f64 {
    let n = values.len() as f64;
    let sum = values.iter().sum::<f64>();
    if sum.is_finite() {
        sum / n
    } else {
        values.iter().map(|v| v / n).sum()
    }
}

/// The largest absolute value, or `1` for an all-zero slice.
pub(crate) fn magnitude(values: &[f64]) -> f64 {
    let largest = values.iter().fold(0.0, |acc: f64, v| acc.max(v.abs()));
    if largest == 0.0 { 1.0 } else { largest }
}

/// Sample variance and standard deviation (divisor `n - 1`).
///
/// Either may be infinite when the true value is beyond the `f64` range;
/// callers turn that into [`StatsError::Overflow`].
struct Spread {
    variance: f64,
    std_dev: f64,
}

impl Spread {
    #[expect(clippy::cast_precision_loss)]
    fn new(values: &[f64], mean: f64) -> Self {
        debug_assert!(values.len() >= 2, "sample variance needs two values");
        let dof = (values.len() - 1) as f64;
        let sum_sq = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>();
        if sum_sq.is_finite() {
            let variance = sum_sq / dof;
            return Self {
                variance,
                std_dev: variance.sqrt(),
            };
        }

        // Deviations are taken on values divided by the largest magnitude, so
        // each squared term is at most 4.
        log::debug!("variance: rescaling deviations to avoid overflow");
        let scale = magnitude(values);
        let scaled = values
            .iter()
            .map(|v| (v / scale - mean / scale).powi(2))
            .sum::<f64>()
            / dof;
        Self {
            variance: scaled * scale * scale,
            std_dev: scaled.sqrt() * scale,
        }
    }
}

fn relative_spread(std_dev: f64, mean: f64) -> f64 {
    if mean == 0.0 {
        log::debug!("coefficient of variation: mean is zero, reporting 0");
        return 0.0;
    }
    std_dev / mean * 100.0
}

fn median_of_sorted(sorted: &[f64]) -> f64 {
    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        f64::midpoint(sorted[mid - 1], sorted[mid])
    } else {
        sorted[mid]
    }
}

#[allow(clippy::float_cmp)]
fn mode_of_sorted(sorted: &[f64]) -> Mode {
    // Ascending scan; only a strictly higher count replaces the candidate,
    // so the smallest value wins ties.
    let mut best: Option<(f64, usize)> = None;
    for run in sorted.chunk_by(|a, b| a == b) {
        let count = run.len();
        if count > 1 && best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((run[0], count));
        }
    }
    best.map_or(Mode::NoMode, |(value, _)| Mode::Value(value))
}
