//! Error types for metrics-harness
//!
//! Toyota Way: Clear error messages with actionable guidance (Respect for People)

use std::path::PathBuf;

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Harness error types
///
/// A workload that fails numerically is not an error: it reports
/// `passed = false` and the report is still written.
#[derive(Error, Debug)]
pub enum Error {
    /// Experiment name cannot be used as a report file name
    #[error("Invalid experiment name {name:?}: {reason}")]
    InvalidName {
        /// Rejected name
        name: String,
        /// Why it was rejected
        reason: &'static str,
    },

    /// Project tag is empty
    #[error("Invalid project tag: must not be empty")]
    InvalidProject,

    /// Output directory does not exist (the harness never creates it during a run)
    #[error("Output directory {} does not exist\nCreate it before running the experiment (see HarnessConfig::ensure_output_dir)", .0.display())]
    OutputDirMissing(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Report (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
