use std::fmt::Write as _;

use anyhow::Context;
use serde::Serialize;
use statlens_stats::{
    descriptive::DescriptiveStats,
    histogram::Histogram,
    regression::{self, LinearFit},
    report::Report,
    sequence::NumericSequence,
};

use crate::{
    command::analysis::{self, AnalysisArg, OutputFormat},
    plot::{self, PlotData},
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct DescribeArg {
    /// Comma-separated values, e.g. "4, 8, 6, 5, 7"
    #[arg(allow_hyphen_values = true)]
    pub data: String,
    #[clap(flatten)]
    pub analysis: AnalysisArg,
}

#[derive(Debug, Serialize)]
struct DescribeOutput<'a> {
    data: &'a NumericSequence,
    reports: &'a [Report],
    histogram: &'a Histogram,
}

/// Everything computed for a single dataset.
#[derive(Debug)]
struct Description {
    statistics: DescriptiveStats,
    trend: LinearFit,
    histogram: Histogram,
}

impl Description {
    fn compute(data: &NumericSequence, bins: usize) -> anyhow::Result<Self> {
        let statistics =
            DescriptiveStats::new(data).context("Failed to compute descriptive statistics")?;
        let trend =
            regression::fit_against_index(data).context("Failed to fit the regression line")?;
        let histogram = Histogram::new(data, bins);
        Ok(Self {
            statistics,
            trend,
            histogram,
        })
    }

    fn reports(&self, precision: usize) -> Vec<Report> {
        vec![
            Report::descriptive("Descriptive statistics", &self.statistics, precision),
            Report::regression("Linear regression (value vs. position)", &self.trend, precision),
        ]
    }
}

pub(crate) fn run(arg: &DescribeArg) -> anyhow::Result<()> {
    let config = arg.analysis.config()?;
    let data = analysis::parse_dataset("input", &arg.data, &config)?;
    let description = Description::compute(&data, config.histogram_bins)?;
    let reports = description.reports(config.precision);

    let mut output = Output::open(arg.analysis.output.as_deref())?;
    match arg.analysis.format {
        OutputFormat::Text => {
            let text = render_text(&data, &reports, &description.histogram, config.precision);
            output.write_text(&text)?;
        }
        OutputFormat::Json => output.write_json(&DescribeOutput {
            data: &data,
            reports: &reports,
            histogram: &description.histogram,
        })?,
    }

    if let Some(path) = &arg.analysis.plot_data {
        let plot = PlotData::single(&data, &description.histogram, &description.trend);
        Output::save_json(&plot, Some(path.as_path()))?;
    }

    Ok(())
}

fn render_text(
    data: &NumericSequence,
    reports: &[Report],
    histogram: &Histogram,
    precision: usize,
) -> String {
    let mut text = format!("Data entered: {data}\n\n");
    for report in reports {
        let _ = writeln!(text, "{report}");
    }
    text.push_str("Histogram\n=========\n");
    text.push_str(&plot::text_histogram(histogram, precision));
    text
}
