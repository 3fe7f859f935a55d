//! maternal-tracking
//!
//! Experiment tracking for training runs: parameters, metrics and artifact
//! files recorded per run. [`TrackingSink`] is the seam the training driver
//! writes through; [`LocalTracker`] is the file-backed implementation.

pub mod error;
pub mod local;
pub mod run;

use std::collections::BTreeMap;
use std::path::Path;

pub use error::TrackingError;
pub use local::LocalTracker;
pub use run::{MetricPoint, Run, RunStatus};

/// Destination for run records.
///
/// Every method except `start_run` addresses a run that was started and not
/// yet ended; anything else is [`TrackingError::RunNotActive`].
pub trait TrackingSink {
    /// Open a run and return its id.
    fn start_run(&mut self, run_name: &str) -> Result<String, TrackingError>;

    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<(), TrackingError>;

    fn log_metric(
        &mut self,
        run_id: &str,
        key: &str,
        value: f64,
        step: u64,
    ) -> Result<(), TrackingError>;

    /// Attach a local file to the run, optionally under a sub-directory.
    fn log_artifact(
        &mut self,
        run_id: &str,
        local_path: &Path,
        artifact_path: Option<&str>,
    ) -> Result<(), TrackingError>;

    /// Close the run with its final status.
    fn end_run(&mut self, run_id: &str, status: RunStatus) -> Result<(), TrackingError>;

    fn log_params(
        &mut self,
        run_id: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<(), TrackingError> {
        for (key, value) in params {
            self.log_param(run_id, key, value)?;
        }
        Ok(())
    }
}
