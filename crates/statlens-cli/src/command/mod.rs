use clap::{Parser, Subcommand};

use self::{compare::CompareArg, describe::DescribeArg};

mod analysis;
mod compare;
mod describe;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// What analysis to run
    #[command(subcommand)]
    mode: Mode,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Summarize a single dataset
    Describe(#[clap(flatten)] DescribeArg),
    /// Compare two datasets (covariance, correlation, regression)
    Compare(#[clap(flatten)] CompareArg),
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    match args.mode {
        Mode::Describe(arg) => describe::run(&arg)?,
        Mode::Compare(arg) => compare::run(&arg)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory as _;

    use super::*;

    #[test]
    fn test_command_definition_is_valid() {
        CommandArgs::command().debug_assert();
    }

    #[test]
    fn test_parse_describe() {
        let args = CommandArgs::try_parse_from(["statlens", "describe", "1, 2, 3", "--bins", "4"])
            .unwrap();
        let Mode::Describe(arg) = args.mode else {
            panic!("expected describe mode");
        };
        assert_eq!(arg.data, "1, 2, 3");
        assert_eq!(arg.analysis.bins, 4);
    }

    #[test]
    fn test_parse_compare() {
        let args = CommandArgs::try_parse_from([
            "statlens",
            "compare",
            "1,2,3",
            "4,5",
            "--strict-length",
            "--format",
            "json",
        ])
        .unwrap();
        let Mode::Compare(arg) = args.mode else {
            panic!("expected compare mode");
        };
        assert_eq!(arg.first, "1,2,3");
        assert_eq!(arg.second, "4,5");
        assert!(arg.analysis.strict_length);
        assert_eq!(arg.analysis.format, analysis::OutputFormat::Json);
    }

    #[test]
    fn test_missing_subcommand_is_an_error() {
        assert!(CommandArgs::try_parse_from(["statlens"]).is_err());
    }
}
