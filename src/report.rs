//! Report - the finalized, persisted record of one experiment run

use std::fmt;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ReportFormat;
use crate::float;
use crate::metric::Metrics;
use crate::Result;

/// Finalized outcome of an experiment.
///
/// Field order is the on-disk key order:
/// `name`, `project`, `passed`, `execution_time`, `metrics`.
/// A non-finite `execution_time` is written as a token (see [`crate::float`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    name: String,
    project: String,
    passed: bool,
    #[serde(with = "crate::float")]
    execution_time: f64,
    metrics: Metrics,
}

impl PartialEq for Report {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.project == other.project
            && self.passed == other.passed
            && float::same(self.execution_time, other.execution_time)
            && self.metrics == other.metrics
    }
}

impl Report {
    pub(crate) const fn new(
        name: String,
        project: String,
        passed: bool,
        execution_time: f64,
        metrics: Metrics,
    ) -> Self {
        Self {
            name,
            project,
            passed,
            execution_time,
            metrics,
        }
    }

    /// Get the experiment name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the project tag.
    #[must_use]
    pub fn project(&self) -> &str {
        &self.project
    }

    /// Whether the workload passed.
    #[must_use]
    pub const fn passed(&self) -> bool {
        self.passed
    }

    /// Execution time reported by the workload, in seconds.
    #[must_use]
    pub const fn execution_time(&self) -> f64 {
        self.execution_time
    }

    /// Metrics recorded during the run, in insertion order.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Report file name for the given format: `<name>.<ext>`.
    #[must_use]
    pub fn file_name(&self, format: ReportFormat) -> String {
        format!("{}.{}", self.name, format.extension())
    }

    /// Serialize the report to a string.
    ///
    /// # Errors
    ///
    /// Returns error if serialization fails.
    pub fn to_json_string(&self, format: ReportFormat) -> Result<String> {
        let text = match format {
            ReportFormat::Json => serde_json::to_string(self)?,
            ReportFormat::JsonPretty => serde_json::to_string_pretty(self)?,
        };
        Ok(text)
    }

    /// Parse a report from JSON text.
    ///
    /// # Errors
    ///
    /// Returns error if the text is not a complete report.
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a report file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        Self::from_json_str(&fs::read_to_string(path)?)
    }

    /// Write the report to `path`, truncating any existing file.
    ///
    /// The file handle is dropped on every return path.
    pub(crate) fn write_to(&self, path: &Path, format: ReportFormat) -> Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        match format {
            ReportFormat::Json => serde_json::to_writer(&mut writer, self)?,
            ReportFormat::JsonPretty => serde_json::to_writer_pretty(&mut writer, self)?,
        }
        writer.flush()?;
        Ok(())
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Test Information:")?;
        writeln!(f, "  name:           {}", self.name)?;
        writeln!(f, "  project:        {}", self.project)?;
        writeln!(f, "  passed:         {}", self.passed)?;
        writeln!(f, "  execution_time: {} s", self.execution_time)?;
        if self.metrics.is_empty() {
            writeln!(f, "  metrics:        (none)")
        } else {
            writeln!(f, "  metrics:")?;
            for (name, value) in self.metrics.iter() {
                writeln!(f, "    {name}: {value}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Report {
        let metrics: Metrics = [("num_steps", 200)].into_iter().collect();
        Report::new("utest_demo".into(), "demo".into(), true, 0.0123, metrics)
    }

    #[test]
    fn test_report_key_order() {
        let json = sample().to_json_string(ReportFormat::Json).unwrap();
        assert_eq!(
            json,
            r#"{"name":"utest_demo","project":"demo","passed":true,"execution_time":0.0123,"metrics":{"num_steps":200}}"#
        );
    }

    #[test]
    fn test_report_missing_key_rejected() {
        let result = Report::from_json_str(r#"{"name":"a","project":"b","metrics":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_nan_execution_time_roundtrip() {
        let report = Report::new("nan".into(), "demo".into(), false, f64::NAN, Metrics::new());
        let json = report.to_json_string(ReportFormat::Json).unwrap();
        assert!(json.contains(r#""execution_time":"NaN""#));
        assert_eq!(Report::from_json_str(&json).unwrap(), report);
    }

    #[test]
    fn test_report_display() {
        let text = sample().to_string();
        assert!(text.starts_with("Test Information:"));
        assert!(text.contains("utest_demo"));
        assert!(text.contains("num_steps: 200"));
    }

    #[test]
    fn test_file_name() {
        assert_eq!(sample().file_name(ReportFormat::JsonPretty), "utest_demo.json");
    }
}
