use std::fmt::Write as _;

use anyhow::Context;
use serde::Serialize;
use statlens_stats::{
    StatsError,
    alignment::{self, AlignedPair},
    bivariate::BivariateStats,
    regression::{self, LinearFit},
    report::Report,
    sequence::NumericSequence,
};

use crate::{
    command::analysis::{self, AnalysisArg, OutputFormat},
    plot::PlotData,
    util::Output,
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct CompareArg {
    /// First dataset, comma-separated
    #[arg(allow_hyphen_values = true)]
    pub first: String,
    /// Second dataset, comma-separated
    #[arg(allow_hyphen_values = true)]
    pub second: String,
    #[clap(flatten)]
    pub analysis: AnalysisArg,
}

#[derive(Debug, Serialize)]
struct CompareOutput<'a> {
    pair: &'a AlignedPair,
    dropped: Dropped,
    reports: &'a [Report],
}

/// How many trailing values each dataset lost to alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
struct Dropped {
    first: usize,
    second: usize,
}

#[derive(Debug)]
struct Comparison {
    pair: AlignedPair,
    dropped: Dropped,
    statistics: BivariateStats,
    fit: Option<LinearFit>,
}

impl Comparison {
    fn compute(
        first: &NumericSequence,
        second: &NumericSequence,
        policy: alignment::AlignmentPolicy,
    ) -> anyhow::Result<Self> {
        let pair = alignment::align(first, second, policy).context("Failed to align datasets")?;
        let dropped = Dropped {
            first: first.len() - pair.len(),
            second: second.len() - pair.len(),
        };
        if dropped.first > 0 || dropped.second > 0 {
            log::warn!(
                "datasets truncated to {} paired values ({} and {} values dropped)",
                pair.len(),
                dropped.first,
                dropped.second
            );
        }

        let statistics =
            BivariateStats::new(&pair).context("Failed to compute bivariate statistics")?;
        let fit = match regression::fit_pair(&pair) {
            Ok(fit) => Some(fit),
            Err(StatsError::DegenerateRegressor) => {
                log::warn!("first dataset is constant; skipping regression");
                None
            }
            Err(err) => return Err(err).context("Failed to fit the regression line"),
        };

        Ok(Self {
            pair,
            dropped,
            statistics,
            fit,
        })
    }

    fn reports(&self, precision: usize) -> Vec<Report> {
        let mut reports = vec![Report::bivariate(
            "Comparison of datasets",
            &self.statistics,
            precision,
        )];
        if let Some(fit) = &self.fit {
            reports.push(Report::regression(
                "Linear regression (second vs. first)",
                fit,
                precision,
            ));
        }
        reports
    }
}

pub(crate) fn run(arg: &CompareArg) -> anyhow::Result<()> {
    let config = arg.analysis.config()?;
    let first = analysis::parse_dataset("first", &arg.first, &config)?;
    let second = analysis::parse_dataset("second", &arg.second, &config)?;
    let comparison = Comparison::compute(&first, &second, config.alignment)?;
    let reports = comparison.reports(config.precision);

    let mut output = Output::open(arg.analysis.output.as_deref())?;
    match arg.analysis.format {
        OutputFormat::Text => output.write_text(&render_text(&comparison, &reports))?,
        OutputFormat::Json => output.write_json(&CompareOutput {
            pair: &comparison.pair,
            dropped: comparison.dropped,
            reports: &reports,
        })?,
    }

    if let Some(path) = &arg.analysis.plot_data {
        let plot = PlotData::paired(&comparison.pair, comparison.fit.as_ref());
        Output::save_json(&plot, Some(path.as_path()))?;
    }

    Ok(())
}

fn render_text(comparison: &Comparison, reports: &[Report]) -> String {
    let pair = &comparison.pair;
    let mut text = format!(
        "First dataset:  {}\nSecond dataset: {}\n",
        pair.first(),
        pair.second()
    );
    let Dropped { first, second } = comparison.dropped;
    if first > 0 || second > 0 {
        let _ = writeln!(
            text,
            "(truncated to the first {} values of each dataset)",
            pair.len()
        );
    }
    text.push('\n');
    for report in reports {
        let _ = writeln!(text, "{report}");
    }
    text
}
