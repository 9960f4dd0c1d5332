use std::ops::Range;

use serde::Serialize;

use crate::{descriptive, sequence::NumericSequence};

/// A frequency distribution of a sequence over equal-width bins.
///
/// The bins span the data range `[min, max]` exactly; this is the data an
/// external renderer needs to draw a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    /// The bins in ascending order. Empty only when zero bins were requested.
    pub bins: Vec<HistogramBin>,
}

/// A single bin in a histogram.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    /// The range of values covered by this bin (inclusive start, exclusive end).
    /// The last bin's end is nudged up so that the maximum value is included.
    pub range: Range<f64>,
    /// The number of values `v` with `range.contains(&v)`.
    pub count: u64,
}

impl Histogram {
    /// Bins `sequence` into `num_bins` equal-width bins.
    ///
    /// A constant sequence has no spread to divide, so it yields a single
    /// unit-width bin centred on its value regardless of `num_bins`.
    ///
    /// # Examples
    ///
    /// ```
    /// # use statlens_stats::{histogram::Histogram, sequence::NumericSequence};
    /// let data: NumericSequence = "1, 2, 2, 3, 4, 5".parse().unwrap();
    /// let histogram = Histogram::new(&data, 4);
    /// assert_eq!(histogram.bins.len(), 4);
    /// assert_eq!(histogram.counts(), vec![1, 2, 1, 2]);
    /// ```
    #[expect(clippy::cast_precision_loss)]
    #[must_use]
    pub fn new(sequence: &NumericSequence, num_bins: usize) -> Self {
        if num_bins == 0 {
            return Self { bins: vec![] };
        }

        let min = descriptive::min(sequence);
        let max = descriptive::max(sequence);

        if max - min == 0.0 {
            // Near f64::MAX, `min + 0.5` rounds back to `min`.
            let end = (min + 0.5).max(min.next_up());
            return Self {
                bins: vec![HistogramBin {
                    range: (min - 0.5)..end,
                    count: sequence.len() as u64,
                }],
            };
        }

        // Edges interpolate between `min` and `max` instead of stepping by the
        // span, which can overflow. They stay non-decreasing and within the data.
        let mut floor = min;
        let mut edges = (0..=num_bins)
            .map(|idx| {
                let t = idx as f64 / num_bins as f64;
                floor = min.mul_add(1.0 - t, max * t).clamp(floor, max);
                floor
            })
            .collect::<Vec<_>>();
        if let Some(last) = edges.last_mut() {
            *last = max.next_up();
        }
        let mut bins = edges
            .windows(2)
            .map(|pair| HistogramBin {
                range: pair[0]..pair[1],
                count: 0,
            })
            .collect::<Vec<_>>();

        // Binning searches the published edges, so every value is counted in
        // the bin whose range contains it.
        for value in sequence.iter() {
            let idx = bins.partition_point(|bin| bin.range.end <= value);
            bins[idx.min(num_bins - 1)].count += 1;
        }

        Self { bins }
    }

    /// The count of every bin, in order.
    #[must_use]
    pub fn counts(&self) -> Vec<u64> {
        self.bins.iter().map(|bin| bin.count).collect()
    }

    /// The sum of all bin counts; equals the length of the binned sequence.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).sum()
    }

    /// The largest bin count, or `0` for an empty histogram.
    #[must_use]
    pub fn max_count(&self) -> u64 {
        self.bins.iter().map(|bin| bin.count).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequence::ValueRange;

    fn seq(text: &str) -> NumericSequence {
        text.parse().unwrap()
    }

    #[test]
    fn test_zero_bins() {
        let histogram = Histogram::new(&seq("1, 2, 3"), 0);
        assert!(histogram.bins.is_empty());
        assert_eq!(histogram.total(), 0);
        assert_eq!(histogram.max_count(), 0);
    }

    #[test]
    fn test_constant_sequence() {
        let histogram = Histogram::new(&seq("7, 7, 7"), 10);
        assert_eq!(histogram.bins.len(), 1);
        assert_eq!(histogram.bins[0].range, 6.5..7.5);
        assert_eq!(histogram.bins[0].count, 3);
    }

    #[test]
    fn test_bins_span_data_range() {
        let histogram = Histogram::new(&seq("0, 10, 3, 7"), 5);
        assert_eq!(histogram.bins.len(), 5);
        assert_eq!(histogram.bins[0].range.start, 0.0);
        assert!(histogram.bins[4].range.contains(&10.0));
        for pair in histogram.bins.windows(2) {
            assert_eq!(pair[0].range.end, pair[1].range.start);
        }
    }

    #[test]
    fn test_max_value_lands_in_last_bin() {
        let histogram = Histogram::new(&seq("0, 1, 2, 3, 4"), 2);
        // [0, 2) and [2, 4]
        assert_eq!(histogram.counts(), vec![2, 3]);
    }

    #[test]
    fn test_counts_sum_to_length() {
        let data = seq("4.2, 8.9, 6.1, 5.5, 7.3, 4.2, 9.0, 0.5, 3.3");
        for num_bins in [1, 2, 3, 7, 20] {
            let histogram = Histogram::new(&data, num_bins);
            assert_eq!(histogram.total(), data.len() as u64);
        }
    }

    fn counted_by_range(histogram: &Histogram, data: &NumericSequence) -> Vec<u64> {
        histogram
            .bins
            .iter()
            .map(|bin| data.iter().filter(|v| bin.range.contains(v)).count() as u64)
            .collect()
    }

    #[test]
    fn test_counts_match_bin_ranges() {
        for len in 2..40 {
            let values = (0..len).map(|i| 0.3 * f64::from(i) + 0.7).collect();
            let data = NumericSequence::new(values, &ValueRange::UNBOUNDED).unwrap();
            for num_bins in 1..25 {
                let histogram = Histogram::new(&data, num_bins);
                assert_eq!(
                    histogram.counts(),
                    counted_by_range(&histogram, &data),
                    "{len} values in {num_bins} bins"
                );
            }
        }
    }

    #[test]
    fn test_values_near_f64_max() {
        let data = seq("-1e308, 1e308");
        let histogram = Histogram::new(&data, 4);
        assert_eq!(histogram.bins.len(), 4);
        assert_eq!(histogram.bins[0].range.start, -1e308);
        assert!(histogram.bins.iter().all(|bin| bin.range.start.is_finite()));
        assert!(histogram.bins.iter().all(|bin| bin.range.end.is_finite()));
        assert_eq!(histogram.counts(), vec![1, 0, 0, 1]);
        assert_eq!(histogram.counts(), counted_by_range(&histogram, &data));

        let data = seq("1.7e308, 1.7e308");
        let histogram = Histogram::new(&data, 3);
        assert_eq!(histogram.counts(), counted_by_range(&histogram, &data));
        assert_eq!(histogram.counts(), vec![2]);
    }

    #[test]
    fn test_single_bin() {
        let histogram = Histogram::new(&seq("1, 5, 9"), 1);
        assert_eq!(histogram.counts(), vec![3]);
        assert_eq!(histogram.max_count(), 3);
    }
}
