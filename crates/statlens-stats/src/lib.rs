//! Descriptive and bivariate statistics engine for the Statlens project.
//!
//! This crate turns raw, user-entered numeric data into summary statistics:
//!
//! - **Sequences**: Validated, immutable numeric input with a configurable range policy
//! - **Descriptive statistics**: Mean, median, mode, sample variance, standard deviation,
//!   and coefficient of variation
//! - **Alignment**: Reconciling two sequences of different lengths before pairing them
//! - **Bivariate statistics**: Sample covariance and Pearson correlation
//! - **Regression**: Ordinary least-squares line fitting
//! - **Histogram**: Equal-width binning for distribution plots
//! - **Report**: Human-readable summaries of all of the above
//!
//! # Modules
//!
//! - [`sequence`]: Parsing and validation of numeric sequences
//! - [`descriptive`]: Statistics over a single sequence
//! - [`alignment`]: Building equal-length pairs from two sequences
//! - [`bivariate`]: Statistics over an aligned pair
//! - [`regression`]: Linear least-squares fitting
//! - [`histogram`]: Frequency distributions for plotting
//! - [`report`]: Display-ready summaries
//! - [`config`]: Policies shared by a whole analysis
//!
//! # Examples
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use statlens_stats::{
//!     descriptive::{DescriptiveStats, Mode},
//!     sequence::{NumericSequence, ValueRange},
//! };
//!
//! let data = NumericSequence::parse("4, 8, 6, 5, 7, 8", &ValueRange::UNBOUNDED).unwrap();
//! let stats = DescriptiveStats::new(&data).unwrap();
//! assert_eq!(stats.median, 6.5);
//! assert_eq!(stats.mode, Mode::Value(8.0));
//! ```
//!
//! ## Comparing two sequences
//!
//! ```
//! use statlens_stats::{
//!     alignment::AlignedPair,
//!     bivariate::{BivariateStats, Correlation},
//!     sequence::NumericSequence,
//! };
//!
//! let first: NumericSequence = "1, 2, 3".parse().unwrap();
//! let second: NumericSequence = "2, 4, 6, 8, 10".parse().unwrap();
//! let pair = AlignedPair::truncate(&first, &second);
//! assert_eq!(pair.len(), 3);
//!
//! let stats = BivariateStats::new(&pair).unwrap();
//! assert_eq!(stats.covariance, 2.0);
//! assert!(matches!(stats.correlation, Correlation::Defined(r) if (r - 1.0).abs() < 1e-9));
//! ```
//!
//! ## Fitting a regression line
//!
//! ```
//! use statlens_stats::regression::fit_linear;
//!
//! let fit = fit_linear(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
//! assert!((fit.slope - 2.0).abs() < 1e-9);
//! assert!(fit.intercept.abs() < 1e-9);
//! ```

use self::sequence::ValueRange;

pub mod alignment;
pub mod bivariate;
pub mod config;
pub mod descriptive;
pub mod histogram;
pub mod regression;
pub mod report;
pub mod sequence;

/// Failures reported by the statistics engine.
///
/// Input validation failures (`EmptySequence`, `InvalidNumber`, `NonFinite`,
/// `OutOfRange`) are raised while building a [`NumericSequence`](sequence::NumericSequence);
/// the remaining variants are precondition violations of individual statistics.
#[derive(Debug, Clone, PartialEq, derive_more::Display, derive_more::Error)]
pub enum StatsError {
    #[display("no data values were entered")]
    EmptySequence,
    #[display("'{token}' is not a number")]
    InvalidNumber { token: String },
    #[display("'{token}' is not a finite number")]
    NonFinite { token: String },
    #[display("value {value} at position {} is outside the valid range {range}", index + 1)]
    OutOfRange {
        index: usize,
        value: f64,
        range: ValueRange,
    },
    #[display("invalid range [{min}, {max}]: bounds must be numbers with minimum <= maximum")]
    InvalidRange { min: f64, max: f64 },
    #[display("{statistic} requires at least {required} values, got {actual}")]
    InsufficientData {
        statistic: &'static str,
        required: usize,
        actual: usize,
    },
    #[display("sequence lengths differ: {first} and {second}")]
    LengthMismatch { first: usize, second: usize },
    #[display("regression is undefined when every x value is identical")]
    DegenerateRegressor,
    #[display("{statistic} is too large to represent")]
    Overflow { statistic: &'static str },
}

pub(crate) fn require_len(
    statistic: &'static str,
    required: usize,
    actual: usize,
) -> Result<(), StatsError> {
    if actual < required {
        return Err(StatsError::InsufficientData {
            statistic,
            required,
            actual,
        });
    }
    Ok(())
}

pub(crate) fn require_finite(statistic: &'static str, value: f64) -> Result<f64, StatsError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(StatsError::Overflow { statistic })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StatsError::OutOfRange {
            index: 2,
            value: -1.0,
            range: ValueRange::STANDARD,
        };
        assert_eq!(
            err.to_string(),
            "value -1 at position 3 is outside the valid range [0, 1000000]"
        );

        let err = StatsError::InsufficientData {
            statistic: "variance",
            required: 2,
            actual: 1,
        };
        assert_eq!(err.to_string(), "variance requires at least 2 values, got 1");

        let err = StatsError::Overflow {
            statistic: "variance",
        };
        assert_eq!(err.to_string(), "variance is too large to represent");
    }

    #[test]
    fn test_require_len() {
        assert!(require_len("covariance", 2, 2).is_ok());
        assert_eq!(
            require_len("covariance", 2, 1),
            Err(StatsError::InsufficientData {
                statistic: "covariance",
                required: 2,
                actual: 1,
            })
        );
    }

    #[test]
    fn test_require_finite() {
        assert_eq!(require_finite("covariance", 1.5), Ok(1.5));
        assert_eq!(
            require_finite("covariance", f64::INFINITY),
            Err(StatsError::Overflow {
                statistic: "covariance"
            })
        );
    }
}
