//! Report Store - in-memory collection of finalized reports for a batch
//!
//! Batch drivers run several experiments into one output directory and then
//! summarize them, either from the reports they hold or by reading the
//! directory back.

use std::collections::BTreeMap;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::report::Report;
use crate::Result;

/// In-memory store of finalized reports, keyed by experiment name.
///
/// ## Design
///
/// Names are unique like report file names: adding a report whose name is
/// already present replaces the earlier one, the same way a later run
/// overwrites the earlier file. Iteration is in name order.
#[derive(Debug, Default)]
pub struct ReportStore {
    reports: BTreeMap<String, Report>,
}

impl ReportStore {
    /// Create a new empty report store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read every `*.json` report in `dir`.
    ///
    /// Files that do not parse as reports are skipped with a warning, so a
    /// directory can hold other JSON output alongside the reports.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be listed.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let mut store = Self::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() || path.extension() != Some(OsStr::new("json")) {
                continue;
            }
            match Report::load(&path) {
                Ok(report) => store.add_report(report),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping non-report file"),
            }
        }
        debug!(reports = store.report_count(), "loaded report directory");
        Ok(store)
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Get the number of reports in the store.
    #[must_use]
    pub fn report_count(&self) -> usize {
        self.reports.len()
    }

    /// Add a report, replacing any report with the same name.
    pub fn add_report(&mut self, report: Report) {
        if let Some(old) = self.reports.insert(report.name().to_string(), report) {
            debug!(name = old.name(), "report replaced");
        }
    }

    /// Get a report by experiment name.
    #[must_use]
    pub fn get_report(&self, name: &str) -> Option<&Report> {
        self.reports.get(name)
    }

    /// Iterate all reports in name order.
    pub fn reports(&self) -> impl Iterator<Item = &Report> {
        self.reports.values()
    }

    /// Get all reports tagged with `project`, in name order.
    #[must_use]
    pub fn reports_for_project(&self, project: &str) -> Vec<&Report> {
        self.reports
            .values()
            .filter(|report| report.project() == project)
            .collect()
    }

    /// Number of reports that passed.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.reports.values().filter(|r| r.passed()).count()
    }

    /// Reports that did not pass, in name order.
    #[must_use]
    pub fn failed_reports(&self) -> Vec<&Report> {
        self.reports.values().filter(|r| !r.passed()).collect()
    }
}
