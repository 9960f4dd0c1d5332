//! Covariance and correlation over an aligned pair

use std::fmt;

use serde::Serialize;

use crate::{
    StatsError,
    alignment::AlignedPair,
    descriptive::{magnitude, mean_of},
    require_finite, require_len,
};

/// A Pearson correlation coefficient, if it is defined.
///
/// The coefficient is undefined when either sequence has zero variance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum Correlation {
    Defined(f64),
    Undefined,
}

impl fmt::Display for Correlation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Correlation::Defined(r) => fmt::Display::fmt(r, f),
            Correlation::Undefined => f.write_str("UNDEFINED"),
        }
    }
}

impl Correlation {
    #[must_use]
    pub fn value(self) -> Option<f64> {
        match self {
            Correlation::Defined(r) => Some(r),
            Correlation::Undefined => None,
        }
    }
}

/// Covariance and correlation of an aligned pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BivariateStats {
    /// The number of paired values used.
    pub count: usize,
    /// The sample covariance.
    pub covariance: f64,
    /// The Pearson correlation coefficient.
    pub correlation: Correlation,
}

impl BivariateStats {
    /// Computes covariance and correlation in one pass over the deviations.
    ///
    /// # Errors
    ///
    /// * [`StatsError::InsufficientData`] if the pair has fewer than two points
    /// * [`StatsError::Overflow`] if the covariance exceeds the `f64` range
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{alignment::AlignedPair, bivariate::BivariateStats, sequence::NumericSequence};
    /// let x: NumericSequence = "1, 2, 3, 4".parse().unwrap();
    /// let y: NumericSequence = "8, 6, 4, 2".parse().unwrap();
    /// let stats = BivariateStats::new(&AlignedPair::truncate(&x, &y)).unwrap();
    /// assert!((stats.covariance + 10.0 / 3.0).abs() < 1e-12);
    /// let r = stats.correlation.value().unwrap();
    /// assert!((r + 1.0).abs() < 1e-12);
    /// ```
    pub fn new(pair: &AlignedPair) -> Result<Self, StatsError> {
        require_len("covariance", 2, pair.len())?;
        let moments = CoMoments::from_pair(pair);
        Ok(Self {
            count: pair.len(),
            covariance: moments.covariance()?,
            correlation: moments.correlation(),
        })
    }
}

/// The sample covariance (divisor `n - 1`).
///
/// # Errors
///
/// * [`StatsError::InsufficientData`] if the pair has fewer than two points
/// * [`StatsError::Overflow`] if the covariance exceeds the `f64` range
pub fn covariance(pair: &AlignedPair) -> Result<f64, StatsError> {
    require_len("covariance", 2, pair.len())?;
    CoMoments::from_pair(pair).covariance()
}

/// The Pearson correlation coefficient, clamped to `[-1, 1]`.
///
/// # Errors
///
/// Returns [`StatsError::InsufficientData`] if the pair has fewer than two points.
///
/// # Examples
///
/// ```
/// # use statlens_stats::{alignment::AlignedPair, bivariate::{correlation, Correlation}, sequence::NumericSequence};
/// let x: NumericSequence = "1, 2, 3".parse().unwrap();
/// let flat: NumericSequence = "5, 5, 5".parse().unwrap();
/// let pair = AlignedPair::truncate(&x, &flat);
/// assert_eq!(correlation(&pair).unwrap(), Correlation::Undefined);
/// ```
pub fn correlation(pair: &AlignedPair) -> Result<Correlation, StatsError> {
    require_len("correlation", 2, pair.len())?;
    Ok(CoMoments::from_pair(pair).correlation())
}

/// Centered sums of squares and cross-products.
///
/// The sums are taken over `x / scale_x` and `y / scale_y`. Both scales are `1`
/// unless the plain sums would overflow.
#[derive(Debug, Clone, Copy)]
pub(crate) struct CoMoments {
    pub(crate) count: usize,
    pub(crate) mean_x: f64,
    pub(crate) mean_y: f64,
    pub(crate) scale_x: f64,
    pub(crate) scale_y: f64,
    pub(crate) sxx: f64,
    pub(crate) syy: f64,
    pub(crate) sxy: f64,
}

impl CoMoments {
    pub(crate) fn from_pair(pair: &AlignedPair) -> Self {
        Self::from_slices(pair.first().as_slice(), pair.second().as_slice())
    }

    pub(crate) fn from_slices(xs: &[f64], ys: &[f64]) -> Self {
        debug_assert_eq!(xs.len(), ys.len(), "slices must have equal length");
        let moments = Self::centered(xs, ys, 1.0, 1.0);
        if moments.sxx.is_finite() && moments.syy.is_finite() && moments.sxy.is_finite() {
            return moments;
        }
        log::debug!("co-moments: rescaling deviations to avoid overflow");
        Self::centered(xs, ys, magnitude(xs), magnitude(ys))
    }

    fn centered(xs: &[f64], ys: &[f64], scale_x: f64, scale_y: f64) -> Self {
        let mean_x = mean_of(xs);
        let mean_y = mean_of(ys);
        let (mut sxx, mut syy, mut sxy) = (0.0, 0.0, 0.0);
        for (&x, &y) in xs.iter().zip(ys) {
            let dx = x / scale_x - mean_x / scale_x;
            let dy = y / scale_y - mean_y / scale_y;
            sxx += dx * dx;
            syy += dy * dy;
            sxy += dx * dy;
        }
        Self {
            count: xs.len(),
            mean_x,
            mean_y,
            scale_x,
            scale_y,
            sxx,
            syy,
            sxy,
        }
    }

    #[expect(clippy::cast_precision_loss)]
    fn covariance(&self) -> Result<f64, StatsError> {
        let covariance = self.sxy / (self.count - 1) as f64 * self.scale_x * self.scale_y;
        require_finite("covariance", covariance)
    }

    fn correlation(&self) -> Correlation {
        if self.sxx == 0.0 || self.syy == 0.0 {
            log::debug!("correlation: zero variance in at least one sequence");
            return Correlation::Undefined;
        }
        // The n - 1 divisors and the scales cancel.
        let r = self.sxy / (self.sxx.sqrt() * self.syy.sqrt());
        Correlation::Defined(r.clamp(-1.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{descriptive, sequence::NumericSequence};

    fn pair(a: &str, b: &str) -> AlignedPair {
        let a: NumericSequence = a.parse().unwrap();
        let b: NumericSequence = b.parse().unwrap();
        AlignedPair::truncate(&a, &b)
    }

    #[test]
    fn test_covariance_matches_sample_estimator() {
        // x mean 3, y mean 6; sum of cross-products = 20
        let p = pair("1, 2, 3, 4, 5", "2, 4, 6, 8, 10");
        assert!((covariance(&p).unwrap() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_covariance_with_itself_is_variance() {
        let s: NumericSequence = "2, 4, 4, 4, 5, 5, 7, 9".parse().unwrap();
        let p = AlignedPair::truncate(&s, &s);
        let var = descriptive::variance(&s).unwrap();
        assert!((covariance(&p).unwrap() - var).abs() < 1e-12);
    }

    #[test]
    fn test_self_correlation_is_one() {
        let p = pair("3.5, 1.25, 9, 4, 4", "3.5, 1.25, 9, 4, 4");
        let r = correlation(&p).unwrap().value().unwrap();
        assert!((r - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_perfect_negative_correlation() {
        let p = pair("1, 2, 3", "30, 20, 10");
        let r = correlation(&p).unwrap().value().unwrap();
        assert!((r + 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_correlation_is_bounded() {
        let p = pair("0.1, 0.2, 0.3, 0.4", "0.1, 0.2, 0.3, 0.4");
        let r = correlation(&p).unwrap().value().unwrap();
        assert!((-1.0..=1.0).contains(&r));
    }

    #[test]
    fn test_zero_variance_is_undefined() {
        assert_eq!(
            correlation(&pair("4, 4, 4", "1, 2, 3")).unwrap(),
            Correlation::Undefined
        );
        assert_eq!(
            correlation(&pair("1, 2, 3", "7, 7, 7")).unwrap(),
            Correlation::Undefined
        );
        assert_eq!(Correlation::Undefined.to_string(), "UNDEFINED");

        // covariance stays defined (and zero)
        assert_eq!(covariance(&pair("4, 4, 4", "1, 2, 3")).unwrap(), 0.0);
    }

    #[test]
    fn test_requires_two_points() {
        let p = pair("1", "2, 3");
        assert_eq!(
            covariance(&p),
            Err(StatsError::InsufficientData {
                statistic: "covariance",
                required: 2,
                actual: 1,
            })
        );
        assert!(correlation(&p).is_err());
        assert!(BivariateStats::new(&p).is_err());
    }

    #[test]
    fn test_bivariate_stats_after_truncation() {
        let stats = BivariateStats::new(&pair("1, 2, 3", "2, 4, 6, 100, -5")).unwrap();
        assert_eq!(stats.count, 3);
        assert!((stats.covariance - 2.0).abs() < 1e-12);
        assert!(stats.correlation.is_defined());
    }

    #[test]
    fn test_values_near_f64_max() {
        let p = pair("-1e308, 1e308, 5e307", "-1e308, 1e308, 5e307");
        assert_eq!(
            covariance(&p),
            Err(StatsError::Overflow {
                statistic: "covariance"
            })
        );
        assert!(BivariateStats::new(&p).is_err());
        let r = correlation(&p).unwrap().value().unwrap();
        assert!((r - 1.0).abs() < 1e-12);

        let r = correlation(&pair("-1e308, 1e308", "1, 0")).unwrap().value().unwrap();
        assert!((r + 1.0).abs() < 1e-12);
        // Rescaled sums still yield a representable covariance.
        let cov = covariance(&pair("-1e308, 1e308", "0, 1e-300")).unwrap();
        assert!((cov - 1e8).abs() < 1e-3);
    }
}
