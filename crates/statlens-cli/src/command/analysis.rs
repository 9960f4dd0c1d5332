//! Options shared by every analysis command

use std::path::PathBuf;

use anyhow::Context;
use statlens_stats::{
    alignment::AlignmentPolicy,
    config::AnalysisConfig,
    sequence::{NumericSequence, ValueRange},
};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub(crate) enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct AnalysisArg {
    /// Smallest accepted data value
    #[arg(long, allow_negative_numbers = true)]
    pub min: Option<f64>,
    /// Largest accepted data value
    #[arg(long, allow_negative_numbers = true)]
    pub max: Option<f64>,
    /// Only accept values in [0, 1000000]
    #[arg(long, conflicts_with_all = ["min", "max"])]
    pub standard_range: bool,
    /// Reject datasets of different lengths instead of truncating to the shorter
    #[arg(long)]
    pub strict_length: bool,
    /// Decimal places shown in reports
    #[arg(long, default_value_t = 2)]
    pub precision: usize,
    /// Number of histogram bins
    #[arg(long, default_value_t = 10)]
    pub bins: usize,
    /// Report format (text or json)
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
    /// Write the report to this file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,
    /// Write plot data (JSON) for an external renderer to this file
    #[arg(long)]
    pub plot_data: Option<PathBuf>,
}

impl AnalysisArg {
    pub(crate) fn config(&self) -> anyhow::Result<AnalysisConfig> {
        let range = if self.standard_range {
            ValueRange::STANDARD
        } else {
            ValueRange::new(self.min, self.max).context("Invalid --min/--max")?
        };
        let alignment = if self.strict_length {
            AlignmentPolicy::Strict
        } else {
            AlignmentPolicy::Truncate
        };
        Ok(AnalysisConfig {
            range,
            alignment,
            precision: self.precision,
            histogram_bins: self.bins,
        })
    }
}

/// Parses one dataset argument, naming it in the error if validation fails.
pub(crate) fn parse_dataset(
    name: &str,
    raw: &str,
    config: &AnalysisConfig,
) -> anyhow::Result<NumericSequence> {
    let data = NumericSequence::parse(raw, &config.range)
        .with_context(|| format!("Invalid {name} dataset"))?;
    log::info!("{name} dataset: {} values", data.len());
    Ok(data)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[derive(Debug, Parser)]
    struct TestArgs {
        #[clap(flatten)]
        analysis: AnalysisArg,
    }

    fn parse(args: &[&str]) -> AnalysisArg {
        let argv = std::iter::once("test").chain(args.iter().copied());
        TestArgs::try_parse_from(argv).unwrap().analysis
    }

    #[test]
    fn test_default_config() {
        let config = parse(&[]).config().unwrap();
        assert_eq!(config, AnalysisConfig::default());
    }

    #[test]
    fn test_standard_range_flag() {
        let config = parse(&["--standard-range"]).config().unwrap();
        assert_eq!(config.range, ValueRange::STANDARD);
    }

    #[test]
    fn test_custom_bounds() {
        let config = parse(&["--min", "-5", "--max", "5"]).config().unwrap();
        assert!(config.range.contains(-5.0));
        assert!(!config.range.contains(5.5));

        assert!(parse(&["--min", "3", "--max", "1"]).config().is_err());
    }

    #[test]
    fn test_standard_range_conflicts_with_bounds() {
        let argv = ["test", "--standard-range", "--min", "1"];
        assert!(TestArgs::try_parse_from(argv).is_err());
    }

    #[test]
    fn test_strict_length_and_format() {
        let arg = parse(&["--strict-length", "--format", "json", "--precision", "4"]);
        assert_eq!(arg.format, OutputFormat::Json);
        let config = arg.config().unwrap();
        assert_eq!(config.alignment, AlignmentPolicy::Strict);
        assert_eq!(config.precision, 4);
    }

    #[test]
    fn test_parse_dataset_error_names_dataset() {
        let config = AnalysisConfig {
            range: ValueRange::STANDARD,
            ..AnalysisConfig::default()
        };
        let err = parse_dataset("first", "1, -2", &config).unwrap_err();
        assert_eq!(err.to_string(), "Invalid first dataset");
        assert!(format!("{err:#}").contains("outside the valid range"));
    }
}
