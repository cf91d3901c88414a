//! Output path and report format configuration
//!
//! A [`HarnessConfig`] is handed to every experiment explicitly, so a batch
//! of experiments shares one output convention without global state.
//!
//! ```rust
//! use metrics_harness::{HarnessConfig, ReportFormat};
//!
//! let config = HarnessConfig::builder()
//!     .output_dir("target/METRICS")
//!     .format(ReportFormat::JsonPretty)
//!     .verbose(true)
//!     .build();
//!
//! assert!(config.report_path("utest_demo").ends_with("utest_demo.json"));
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::Result;

/// Default directory reports are written to, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "../RESULTS";

/// Structured-text format used for report files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportFormat {
    /// Compact single-line JSON object
    #[default]
    Json,
    /// Indented JSON object
    JsonPretty,
}

impl ReportFormat {
    /// File extension for this format, without the leading dot.
    #[must_use]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Json | Self::JsonPretty => "json",
        }
    }
}

/// Where and how experiment reports are written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    output_dir: PathBuf,
    format: ReportFormat,
    verbose: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            format: ReportFormat::default(),
            verbose: false,
        }
    }
}

impl HarnessConfig {
    /// Create a configuration writing compact JSON into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            ..Self::default()
        }
    }

    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> HarnessConfigBuilder {
        HarnessConfigBuilder::default()
    }

    /// Load a configuration from a JSON file. Missing keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a valid configuration.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Directory reports are written to.
    #[must_use]
    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Report serialization format.
    #[must_use]
    pub const fn format(&self) -> ReportFormat {
        self.format
    }

    /// Whether `run()` prints the finalized report.
    #[must_use]
    pub const fn verbose(&self) -> bool {
        self.verbose
    }

    /// Path of the report file for an experiment: `<output_dir>/<name>.<ext>`.
    #[must_use]
    pub fn report_path(&self, name: &str) -> PathBuf {
        self.output_dir
            .join(format!("{name}.{}", self.format.extension()))
    }

    /// Create the output directory and its parents.
    ///
    /// Meant for driver programs; experiments never create directories.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be created.
    pub fn ensure_output_dir(&self) -> Result<()> {
        if !self.output_dir.is_dir() {
            fs::create_dir_all(&self.output_dir)?;
            info!(dir = %self.output_dir.display(), "created output directory");
        }
        Ok(())
    }
}

/// Builder for `HarnessConfig`.
#[derive(Debug, Default)]
pub struct HarnessConfigBuilder {
    config: HarnessConfig,
}

impl HarnessConfigBuilder {
    /// Set the output directory.
    #[must_use]
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Set the report format.
    #[must_use]
    pub const fn format(mut self, format: ReportFormat) -> Self {
        self.config.format = format;
        self
    }

    /// Print each finalized report after it is written.
    #[must_use]
    pub const fn verbose(mut self, verbose: bool) -> Self {
        self.config.verbose = verbose;
        self
    }

    /// Build the `HarnessConfig`.
    #[must_use]
    pub fn build(self) -> HarnessConfig {
        self.config
    }
}
