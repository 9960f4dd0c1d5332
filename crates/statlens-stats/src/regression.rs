//! Ordinary least-squares line fitting
//!
//! Fits `y ≈ slope · x + intercept` by minimizing the sum of squared vertical
//! residuals. A single sequence is fitted against its 1-based positions; two
//! sequences are fitted second-on-first.

use serde::Serialize;

use crate::{
    StatsError, alignment::AlignedPair, bivariate::CoMoments, require_finite, require_len,
    sequence::NumericSequence,
};

/// A fitted regression line.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// Evaluates the line at `x`.
    #[must_use]
    pub fn predict(&self, x: f64) -> f64 {
        self.slope.mul_add(x, self.intercept)
    }

    /// Evaluates the line at each of `xs`, returning `(x, y)` points for an overlay.
    ///
    /// ```
    /// # use statlens_stats::regression::LinearFit;
    /// let fit = LinearFit { slope: 2.0, intercept: 1.0 };
    /// assert_eq!(fit.line([0.0, 1.0, 2.0]), vec![(0.0, 1.0), (1.0, 3.0), (2.0, 5.0)]);
    /// ```
    pub fn line<I>(&self, xs: I) -> Vec<(f64, f64)>
    where
        I: IntoIterator<Item = f64>,
    {
        xs.into_iter().map(|x| (x, self.predict(x))).collect()
    }
}

/// Fits a least-squares line through the points `(x[i], y[i])`.
///
/// # Errors
///
/// * [`StatsError::LengthMismatch`] if `x` and `y` differ in length
/// * [`StatsError::InsufficientData`] if fewer than two points are given
/// * [`StatsError::DegenerateRegressor`] if every `x` is the same value
/// * [`StatsError::Overflow`] if the slope or intercept exceeds the `f64` range
///
/// # Examples
///
/// ```
/// # use statlens_stats::regression::fit_linear;
/// let fit = fit_linear(&[1.0, 2.0, 3.0], &[3.0, 5.0, 7.0]).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!((fit.intercept - 1.0).abs() < 1e-12);
///
/// assert!(fit_linear(&[1.0], &[1.0]).is_err());
/// assert!(fit_linear(&[2.0, 2.0], &[1.0, 5.0]).is_err());
/// ```
pub fn fit_linear(x: &[f64], y: &[f64]) -> Result<LinearFit, StatsError> {
    if x.len() != y.len() {
        return Err(StatsError::LengthMismatch {
            first: x.len(),
            second: y.len(),
        });
    }
    require_len("linear regression", 2, x.len())?;

    let moments = CoMoments::from_slices(x, y);
    if moments.sxx == 0.0 {
        return Err(StatsError::DegenerateRegressor);
    }
    let slope = moments.sxy / moments.sxx * (moments.scale_y / moments.scale_x);
    let slope = require_finite("linear regression", slope)?;
    let intercept = require_finite("linear regression", moments.mean_y - slope * moments.mean_x)?;
    Ok(LinearFit { slope, intercept })
}

/// Fits `sequence` against its positions `1, 2, ..., n`.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] for a single-value sequence.
///
/// ```
/// # use statlens_stats::{regression::fit_against_index, sequence::NumericSequence};
/// let data: NumericSequence = "2, 4, 6, 8".parse().unwrap();
/// let fit = fit_against_index(&data).unwrap();
/// assert!((fit.slope - 2.0).abs() < 1e-12);
/// assert!(fit.intercept.abs() < 1e-12);
/// ```
pub fn fit_against_index(sequence: &NumericSequence) -> Result<LinearFit, StatsError> {
    fit_linear(&positions(sequence.len()), sequence.as_slice())
}

/// Fits the second sequence of `pair` against the first.
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] if the pair has fewer than two points
/// * [`StatsError::DegenerateRegressor`] if the first sequence is constant
pub fn fit_pair(pair: &AlignedPair) -> Result<LinearFit, StatsError> {
    fit_linear(pair.first().as_slice(), pair.second().as_slice())
}

/// The 1-based positions `1.0, 2.0, ..., len`.
#[expect(clippy::cast_precision_loss)]
#[must_use]
pub fn positions(len: usize) -> Vec<f64> {
    (1..=len).map(|i| i as f64).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_exact_line() {
        let fit = fit_linear(&[1.0, 2.0, 3.0, 4.0], &[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert_close(fit.slope, 2.0);
        assert_close(fit.intercept, 0.0);
    }

    #[test]
    fn test_noisy_fit() {
        // mean_x 2.5, mean_y 2.5, sxy 4, sxx 5
        let fit = fit_linear(&[1.0, 2.0, 3.0, 4.0], &[1.0, 3.0, 2.0, 4.0]).unwrap();
        assert_close(fit.slope, 0.8);
        assert_close(fit.intercept, 0.5);
    }

    #[test]
    fn test_negative_slope() {
        let fit = fit_linear(&[0.0, 1.0, 2.0], &[10.0, 7.0, 4.0]).unwrap();
        assert_close(fit.slope, -3.0);
        assert_close(fit.intercept, 10.0);
        assert_close(fit.predict(5.0), -5.0);
    }

    #[test]
    fn test_constant_y_gives_flat_line() {
        let fit = fit_linear(&[1.0, 2.0, 3.0], &[4.0, 4.0, 4.0]).unwrap();
        assert_close(fit.slope, 0.0);
        assert_close(fit.intercept, 4.0);
    }

    #[test]
    fn test_preconditions() {
        assert_eq!(
            fit_linear(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch {
                first: 2,
                second: 1
            })
        );
        assert_eq!(
            fit_linear(&[], &[]),
            Err(StatsError::InsufficientData {
                statistic: "linear regression",
                required: 2,
                actual: 0,
            })
        );
        assert!(matches!(
            fit_linear(&[3.0], &[1.0]),
            Err(StatsError::InsufficientData { actual: 1, .. })
        ));
        assert_eq!(
            fit_linear(&[5.0, 5.0, 5.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::DegenerateRegressor)
        );
    }

    #[test]
    fn test_values_near_f64_max() {
        let fit = fit_linear(&[-1e308, 1e308], &[-1e308, 1e308]).unwrap();
        assert_close(fit.slope, 1.0);
        assert_close(fit.intercept, 0.0);

        let fit = fit_linear(&[-1e308, 1e308], &[1.0, 3.0]).unwrap();
        assert_close(fit.slope * 1e308, 1.0);
        assert_close(fit.intercept, 2.0);

        assert_eq!(
            fit_linear(&[0.0, 1.0], &[-1e308, 1e308]),
            Err(StatsError::Overflow {
                statistic: "linear regression"
            })
        );
    }

    #[test]
    fn test_fit_against_index() {
        let data: NumericSequence = "4, 8, 6, 5, 7".parse().unwrap();
        let fit = fit_against_index(&data).unwrap();
        // mean_x 3, mean_y 6, sxy 3, sxx 10
        assert_close(fit.slope, 0.3);
        assert_close(fit.intercept, 5.1);

        let single: NumericSequence = "4".parse().unwrap();
        assert!(fit_against_index(&single).is_err());
    }

    #[test]
    fn test_fit_pair() {
        let x: NumericSequence = "1, 2, 3".parse().unwrap();
        let y: NumericSequence = "5, 7, 9, 100".parse().unwrap();
        let fit = fit_pair(&AlignedPair::truncate(&x, &y)).unwrap();
        assert_close(fit.slope, 2.0);
        assert_close(fit.intercept, 3.0);
    }

    #[test]
    fn test_positions_and_line() {
        assert_eq!(positions(3), vec![1.0, 2.0, 3.0]);
        assert!(positions(0).is_empty());

        let fit = LinearFit {
            slope: 0.5,
            intercept: -1.0,
        };
        assert_eq!(fit.line(positions(2)), vec![(1.0, -0.5), (2.0, 0.0)]);
    }
}
