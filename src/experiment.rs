//! Experiment - a named, project-tagged, reportable run of one workload
//!
//! ## Lifecycle
//!
//! ```text
//! new(name, project, workload, config)     metrics = {}, no report
//!   └─ add_metric(..) *                    before or during the run
//!        └─ run()                          workload -> finalize -> <dir>/<name>.json
//! ```
//!
//! `run()` is not idempotent: calling it again reruns the workload and
//! rewrites the report file. Metrics accumulate across runs with last write
//! winning for repeated names.

use std::io::{self, Write};

use tracing::{debug, info, info_span, warn};

use crate::config::HarnessConfig;
use crate::metric::{MetricValue, Metrics};
use crate::report::Report;
use crate::workload::Workload;
use crate::{Error, Result};

/// A timed experiment that owns one workload and writes one report per run.
#[derive(Debug)]
pub struct Experiment<W> {
    name: String,
    project: String,
    config: HarnessConfig,
    workload: W,
    metrics: Metrics,
    report: Option<Report>,
}

impl<W: Workload> Experiment<W> {
    /// Create an experiment.
    ///
    /// # Arguments
    ///
    /// * `name` - Report identifier, also the report file stem
    /// * `project` - Tag grouping reports by owning subsystem
    /// * `workload` - Computation to run and time
    /// * `config` - Output directory and format
    ///
    /// # Errors
    ///
    /// Returns error if `name` is empty, `.`/`..`, or contains a path
    /// separator, or if `project` is empty.
    pub fn new(
        name: impl Into<String>,
        project: impl Into<String>,
        workload: W,
        config: HarnessConfig,
    ) -> Result<Self> {
        let name = name.into();
        let project = project.into();
        validate_name(&name)?;
        if project.is_empty() {
            return Err(Error::InvalidProject);
        }
        debug!(experiment = %name, project = %project, "experiment created");

        Ok(Self {
            name,
            project,
            config,
            workload,
            metrics: Metrics::new(),
            report: None,
        })
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

    /// Get the output configuration.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Whether the last run passed. `false` until the experiment has run.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.report.as_ref().is_some_and(Report::passed)
    }

    /// Metrics recorded so far.
    #[must_use]
    pub const fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// The finalized report of the last run, if any.
    #[must_use]
    pub const fn report(&self) -> Option<&Report> {
        self.report.as_ref()
    }

    /// Get the workload.
    #[must_use]
    pub const fn workload(&self) -> &W {
        &self.workload
    }

    /// Get the workload mutably, e.g. to reconfigure it between runs.
    pub fn workload_mut(&mut self) -> &mut W {
        &mut self.workload
    }

    /// Consume the experiment, returning its workload.
    pub fn into_workload(self) -> W {
        self.workload
    }

    /// Add a metric. A repeated name overwrites the earlier value.
    ///
    /// Returns the value that was replaced, if any.
    pub fn add_metric(
        &mut self,
        name: impl Into<String>,
        value: impl Into<MetricValue>,
    ) -> Option<MetricValue> {
        self.metrics.add(name, value)
    }

    /// Run the workload and write the report.
    ///
    /// The report is written whether the workload passed or not.
    ///
    /// # Errors
    ///
    /// Returns error if the output directory does not exist (checked before
    /// the workload runs) or the report cannot be written.
    pub fn run(&mut self) -> Result<&Report> {
        let output_dir = self.config.output_dir();
        if !output_dir.is_dir() {
            return Err(Error::OutputDirMissing(output_dir.to_path_buf()));
        }

        let span = info_span!("experiment", name = %self.name, project = %self.project);
        let _guard = span.enter();

        debug!("workload started");
        let passed = self.workload.run_workload(&mut self.metrics);
        debug!(passed, "workload finished");

        self.finalize(passed)
    }

    fn finalize(&mut self, passed: bool) -> Result<&Report> {
        let execution_time = self.workload.elapsed_seconds();
        let report = Report::new(
            self.name.clone(),
            self.project.clone(),
            passed,
            execution_time,
            self.metrics.clone(),
        );

        let path = self.config.report_path(&self.name);
        report.write_to(&path, self.config.format())?;
        info!(
            path = %path.display(),
            passed,
            execution_time,
            metrics = report.metrics().len(),
            "report written"
        );

        let report = self.report.insert(report);
        if self.config.verbose() {
            print!("{report}");
        }
        Ok(&*report)
    }

    /// Print the report to stdout.
    pub fn print(&self) {
        if let Err(err) = self.print_to(&mut io::stdout().lock()) {
            warn!(experiment = %self.name, error = %err, "failed to print report");
        }
    }

    /// Print the report to `out`. Before the first run only the name and
    /// project are known.
    ///
    /// # Errors
    ///
    /// Returns error if writing to `out` fails.
    pub fn print_to(&self, out: &mut impl Write) -> io::Result<()> {
        match &self.report {
            Some(report) => write!(out, "{report}"),
            None => {
                writeln!(out, "Test Information:")?;
                writeln!(out, "  name:           {}", self.name)?;
                writeln!(out, "  project:        {}", self.project)?;
                writeln!(out, "  (not run)")
            }
        }
    }
}

fn validate_name(name: &str) -> Result<()> {
    let reason = if name.is_empty() {
        "must not be empty"
    } else if name.contains(['/', '\\']) {
        "must not contain a path separator"
    } else if name == "." || name == ".." {
        "must not be a relative directory"
    } else {
        return Ok(());
    };
    Err(Error::InvalidName {
        name: name.to_string(),
        reason,
    })
}
