//! Common-length pairing of two sequences
//!
//! Bivariate statistics need two sequences of equal length. Inputs entered
//! separately rarely agree, so the default [`AlignmentPolicy::Truncate`] keeps
//! the shared prefix of both; [`AlignmentPolicy::Strict`] refuses to pair
//! sequences of different lengths instead.

use serde::Serialize;

use crate::{StatsError, sequence::NumericSequence};

/// How to reconcile sequences of different lengths.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentPolicy {
    /// Keep the first `min(m, n)` values of each sequence.
    #[default]
    Truncate,
    /// Reject sequences of different lengths.
    Strict,
}

/// Two sequences with identical length.
///
/// The inputs are never modified; an aligned pair owns its own copies.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlignedPair {
    first: NumericSequence,
    second: NumericSequence,
}

impl AlignedPair {
    /// Pairs `first` and `second`, truncating both to the shorter length.
    ///
    /// Order is preserved; no values are reordered or interpolated.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{alignment::AlignedPair, sequence::NumericSequence};
    /// let a: NumericSequence = "1, 2, 3".parse().unwrap();
    /// let b: NumericSequence = "1, 2, 3, 4, 5".parse().unwrap();
    /// let pair = AlignedPair::truncate(&a, &b);
    /// assert_eq!(pair.first().as_slice(), &[1.0, 2.0, 3.0]);
    /// assert_eq!(pair.second().as_slice(), &[1.0, 2.0, 3.0]);
    /// ```
    #[must_use]
    pub fn truncate(first: &NumericSequence, second: &NumericSequence) -> Self {
        let len = usize::min(first.len(), second.len());
        if first.len() != second.len() {
            log::debug!(
                "aligning sequences of length {} and {} to common length {len}",
                first.len(),
                second.len()
            );
        }
        Self {
            first: first.prefix(len),
            second: second.prefix(len),
        }
    }

    #[must_use]
    pub fn first(&self) -> &NumericSequence {
        &self.first
    }

    #[must_use]
    pub fn second(&self) -> &NumericSequence {
        &self.second
    }

    /// The common length of both sequences.
    #[must_use]
    pub fn len(&self) -> usize {
        self.first.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.first.is_empty()
    }

    /// Iterates over `(first[i], second[i])` pairs, e.g. for a scatter plot.
    pub fn points(&self) -> impl ExactSizeIterator<Item = (f64, f64)> + '_ {
        self.first.iter().zip(self.second.iter())
    }

    #[must_use]
    pub fn into_parts(self) -> (NumericSequence, NumericSequence) {
        (self.first, self.second)
    }
}

/// Pairs two sequences according to `policy`.
///
/// # Errors
///
/// Returns [`StatsError::LengthMismatch`] under [`AlignmentPolicy::Strict`] when
/// the lengths differ. [`AlignmentPolicy::Truncate`] never fails.
///
/// # Examples
///
/// ```
/// # use statlens_stats::{alignment::{align, AlignmentPolicy}, sequence::NumericSequence};
/// let a: NumericSequence = "1, 2".parse().unwrap();
/// let b: NumericSequence = "1, 2, 3".parse().unwrap();
/// assert_eq!(align(&a, &b, AlignmentPolicy::Truncate).unwrap().len(), 2);
/// assert!(align(&a, &b, AlignmentPolicy::Strict).is_err());
/// ```
pub fn align(
    first: &NumericSequence,
    second: &NumericSequence,
    policy: AlignmentPolicy,
) -> Result<AlignedPair, StatsError> {
    match policy {
        AlignmentPolicy::Strict if first.len() != second.len() => {
            Err(StatsError::LengthMismatch {
                first: first.len(),
                second: second.len(),
            })
        }
        AlignmentPolicy::Strict | AlignmentPolicy::Truncate => {
            Ok(AlignedPair::truncate(first, second))
        }
    }
}
