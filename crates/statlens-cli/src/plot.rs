//! Plot data for external renderers
//!
//! Statlens does not draw images. Instead it can export everything a plotting
//! tool needs (histogram bins, scatter points, and the regression overlay) as
//! a JSON document, and it draws a plain-text histogram for the terminal.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use serde::Serialize;
use statlens_stats::{
    alignment::AlignedPair, histogram::Histogram, regression::LinearFit,
    sequence::NumericSequence,
};

/// Width of the longest bar in [`text_histogram`].
const BAR_WIDTH: u64 = 40;

#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    pub generated_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
    pub scatter: ScatterPlot,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub regression: Option<RegressionOverlay>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScatterPlot {
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<(f64, f64)>,
}

/// A fitted line evaluated at every x value of the scatter plot.
#[derive(Debug, Clone, Serialize)]
pub struct RegressionOverlay {
    pub slope: f64,
    pub intercept: f64,
    pub line: Vec<(f64, f64)>,
}

impl RegressionOverlay {
    fn new(fit: &LinearFit, xs: impl IntoIterator<Item = f64>) -> Self {
        Self {
            slope: fit.slope,
            intercept: fit.intercept,
            line: fit.line(xs),
        }
    }
}

impl PlotData {
    /// Plots a single dataset: a histogram, plus values against their positions
    /// with the fitted trend.
    pub fn single(data: &NumericSequence, histogram: &Histogram, fit: &LinearFit) -> Self {
        let positions = statlens_stats::regression::positions(data.len());
        let points = positions.iter().copied().zip(data.iter()).collect();
        Self {
            generated_at: Utc::now(),
            histogram: Some(histogram.clone()),
            scatter: ScatterPlot {
                x_label: "Position".to_owned(),
                y_label: "Value".to_owned(),
                points,
            },
            regression: Some(RegressionOverlay::new(fit, positions)),
        }
    }

    /// Plots two aligned datasets against each other.
    pub fn paired(pair: &AlignedPair, fit: Option<&LinearFit>) -> Self {
        Self {
            generated_at: Utc::now(),
            histogram: None,
            scatter: ScatterPlot {
                x_label: "First dataset".to_owned(),
                y_label: "Second dataset".to_owned(),
                points: pair.points().collect(),
            },
            regression: fit.map(|fit| RegressionOverlay::new(fit, pair.first().iter())),
        }
    }
}

/// Renders a histogram as one text bar per bin.
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_sign_loss,
    clippy::cast_possible_truncation
)]
pub fn text_histogram(histogram: &Histogram, precision: usize) -> String {
    let max_count = histogram.max_count();
    let mut out = String::new();
    for bin in &histogram.bins {
        let bar_len = if max_count == 0 {
            0
        } else {
            ((bin.count * BAR_WIDTH) as f64 / max_count as f64).round() as usize
        };
        let _ = writeln!(
            out,
            "  [{:>10.precision$}, {:>10.precision$}) | {:<width$} {}",
            bin.range.start,
            bin.range.end,
            "#".repeat(bar_len),
            bin.count,
            width = BAR_WIDTH as usize,
        );
    }
    out
}
