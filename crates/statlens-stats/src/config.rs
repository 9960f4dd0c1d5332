use crate::{alignment::AlignmentPolicy, sequence::ValueRange};

/// Policies applied across one analysis run.
///
/// Nothing here is global: callers build a config and pass the relevant parts
/// to each operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnalysisConfig {
    /// Values accepted when parsing input.
    pub range: ValueRange,
    /// How two sequences of different lengths are paired.
    pub alignment: AlignmentPolicy,
    /// Decimal places shown in reports.
    pub precision: usize,
    /// Number of histogram bins.
    pub histogram_bins: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            range: ValueRange::UNBOUNDED,
            alignment: AlignmentPolicy::Truncate,
            precision: 2,
            histogram_bins: 10,
        }
    }
}
