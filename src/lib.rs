//! # metrics-harness: Timed Experiment Reports
//!
//! A small harness that wraps a long-running numerical workload (multibody,
//! FSI or FEA simulation driven through an external engine), records whether
//! it passed, how long its hot loop took and any named metrics, and writes
//! one JSON report per experiment.
//!
//! ## Report Layout
//!
//! ```text
//! <output_dir>/<name>.json
//! {
//!   "name": "utest_demo",
//!   "project": "demo",
//!   "passed": true,
//!   "execution_time": 0.0123,
//!   "metrics": { "num_steps": 200 }
//! }
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use metrics_harness::{Experiment, HarnessConfig, Metrics, Stopwatch, Workload};
//!
//! struct Beam {
//!     timer: Stopwatch,
//! }
//!
//! impl Workload for Beam {
//!     fn run_workload(&mut self, metrics: &mut Metrics) -> bool {
//!         let num_steps = 200;
//!         for _ in 0..num_steps {
//!             self.timer.time(|| { /* step the solver */ });
//!         }
//!         metrics.add("num_steps", num_steps);
//!         true
//!     }
//!
//!     fn elapsed_seconds(&self) -> f64 {
//!         self.timer.elapsed_seconds()
//!     }
//! }
//!
//! let config = HarnessConfig::new("../METRICS");
//! config.ensure_output_dir()?;
//!
//! let mut test = Experiment::new("utest_FEA_ANCFBeam", "Chrono::FEA", Beam { timer: Stopwatch::new() }, config)?;
//! test.run()?;
//! test.print();
//! # Ok::<(), metrics_harness::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod config;
pub mod error;
pub mod experiment;
pub mod float;
pub mod metric;
pub mod report;
pub mod store;
pub mod workload;

pub use config::{HarnessConfig, HarnessConfigBuilder, ReportFormat};
pub use error::{Error, Result};
pub use experiment::Experiment;
pub use metric::{MetricValue, Metrics};
pub use report::Report;
pub use store::ReportStore;
pub use workload::{Stopwatch, Workload};
