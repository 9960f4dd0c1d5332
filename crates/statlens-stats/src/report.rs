//! Human-readable summaries
//!
//! A [`Report`] is a titled list of labelled values, rounded to a fixed
//! number of decimal places. Sentinels such as "NO MODE" are carried as text
//! so that no placeholder number ever reaches the output.
//!
//! # Examples
//!
//! ```
//! use statlens_stats::{
//!     descriptive::DescriptiveStats,
//!     report::{Report, ReportValue},
//!     sequence::NumericSequence,
//! };
//!
//! let data: NumericSequence = "1, 2, 3".parse().unwrap();
//! let stats = DescriptiveStats::new(&data).unwrap();
//! let report = Report::descriptive("Data", &stats, 2);
//! assert_eq!(report.get("Mean"), Some(&ReportValue::Number(2.0)));
//! assert_eq!(report.get("Mode"), Some(&ReportValue::Text("NO MODE".to_owned())));
//!
//! let text = report.to_string();
//! assert!(text.starts_with("Data\n====\n"));
//! assert!(text.lines().any(|line| line.trim_start().starts_with("Mean") && line.ends_with(": 2.00")));
//! ```

use std::fmt;

use serde::Serialize;

use crate::{
    bivariate::{BivariateStats, Correlation},
    descriptive::{DescriptiveStats, Mode},
    regression::LinearFit,
};

/// A single value in a report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportValue {
    /// A measured quantity, already rounded to the report precision.
    Number(f64),
    /// A count of items.
    Count(u64),
    /// A sentinel or other non-numeric result.
    Text(String),
}

/// A labelled report value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportEntry {
    pub label: String,
    pub value: ReportValue,
}

/// A titled collection of statistics ready for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub title: String,
    pub precision: usize,
    pub entries: Vec<ReportEntry>,
}

impl Report {
    #[must_use]
    pub fn new(title: impl Into<String>, precision: usize) -> Self {
        Self {
            title: title.into(),
            precision,
            entries: vec![],
        }
    }

    /// Summarizes a single sequence.
    #[must_use]
    pub fn descriptive(
        title: impl Into<String>,
        stats: &DescriptiveStats,
        precision: usize,
    ) -> Self {
        let mut report = Self::new(title, precision);
        report.push_count("Count", stats.count);
        report.push_number("Minimum", stats.min);
        report.push_number("Maximum", stats.max);
        report.push_number("Mean", stats.mean);
        report.push_number("Median", stats.median);
        match stats.mode {
            Mode::Value(value) => report.push_number("Mode", value),
            Mode::NoMode => report.push_text("Mode", Mode::NoMode.to_string()),
        }
        report.push_number("Variance", stats.variance);
        report.push_number("Standard deviation", stats.std_dev);
        report.push_number("Coefficient of variation (%)", stats.coefficient_of_variation);
        report
    }

    /// Summarizes the relationship between two aligned sequences.
    #[must_use]
    pub fn bivariate(title: impl Into<String>, stats: &BivariateStats, precision: usize) -> Self {
        let mut report = Self::new(title, precision);
        report.push_count("Paired values", stats.count);
        report.push_number("Covariance", stats.covariance);
        match stats.correlation {
            Correlation::Defined(r) => report.push_number("Correlation coefficient", r),
            Correlation::Undefined => {
                report.push_text("Correlation coefficient", Correlation::Undefined.to_string());
            }
        }
        report
    }

    /// Summarizes a fitted regression line.
    ///
    /// ```
    /// # use statlens_stats::{regression::LinearFit, report::{Report, ReportValue}};
    /// let fit = LinearFit { slope: 2.0, intercept: -0.004 };
    /// let report = Report::regression("Fit", &fit, 2);
    /// assert_eq!(report.get("Slope"), Some(&ReportValue::Number(2.0)));
    /// assert_eq!(report.get("Intercept"), Some(&ReportValue::Number(-0.0)));
    /// ```
    #[must_use]
    pub fn regression(title: impl Into<String>, fit: &LinearFit, precision: usize) -> Self {
        let mut report = Self::new(title, precision);
        report.push_number("Slope", fit.slope);
        report.push_number("Intercept", fit.intercept);
        report
    }

    pub fn push_number(&mut self, label: impl Into<String>, value: f64) {
        let value = ReportValue::Number(round_to(value, self.precision));
        self.push(label, value);
    }

    pub fn push_count(&mut self, label: impl Into<String>, count: usize) {
        self.push(label, ReportValue::Count(count as u64));
    }

    pub fn push_text(&mut self, label: impl Into<String>, text: impl Into<String>) {
        self.push(label, ReportValue::Text(text.into()));
    }

    fn push(&mut self, label: impl Into<String>, value: ReportValue) {
        self.entries.push(ReportEntry {
            label: label.into(),
            value,
        });
    }

    /// Looks up an entry by label.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&ReportValue> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| &entry.value)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "{}", "=".repeat(self.title.chars().count()))?;
        let width = self
            .entries
            .iter()
            .map(|entry| entry.label.chars().count())
            .max()
            .unwrap_or(0);
        let precision = self.precision;
        for ReportEntry { label, value } in &self.entries {
            match value {
                ReportValue::Number(number) => {
                    writeln!(f, "  {label:<width$} : {number:.precision$}")?;
                }
                ReportValue::Count(count) => writeln!(f, "  {label:<width$} : {count}")?,
                ReportValue::Text(text) => writeln!(f, "  {label:<width$} : {text}")?,
            }
        }
        Ok(())
    }
}

fn round_to(value: f64, precision: usize) -> f64 {
    format!("{value:.precision$}").parse().unwrap_or(value)
}
