//! File-backed tracker.
//!
//! Layout:
//!
//! ```text
//! <dir>/<experiment>/<run_id>/run.json
//! <dir>/<experiment>/<run_id>/artifacts/[<artifact_path>/]<file name>
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};
use uuid::Uuid;

use crate::error::TrackingError;
use crate::run::{MetricPoint, Run, RunStatus};
use crate::TrackingSink;

const RUN_FILE: &str = "run.json";
const ARTIFACTS_DIR: &str = "artifacts";

#[derive(Debug)]
pub struct LocalTracker {
    experiment: String,
    experiment_dir: PathBuf,
    active: HashMap<String, Run>,
}

impl LocalTracker {
    pub fn new(dir: impl AsRef<Path>, experiment: &str) -> Self {
        LocalTracker {
            experiment: experiment.to_string(),
            experiment_dir: dir.as_ref().join(experiment),
            active: HashMap::new(),
        }
    }

    pub fn experiment(&self) -> &str {
        &self.experiment
    }

    pub fn run_dir(&self, run_id: &str) -> PathBuf {
        self.experiment_dir.join(run_id)
    }

    /// Read a persisted run, active or finished.
    pub fn load_run(&self, run_id: &str) -> Result<Run, TrackingError> {
        let path = self.run_dir(run_id).join(RUN_FILE);
        if !path.exists() {
            return Err(TrackingError::RunNotFound(run_id.to_string()));
        }
        let bytes = fs::read(&path).map_err(|e| TrackingError::io(&path, e))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Every persisted run of this experiment, oldest first.
    pub fn list_runs(&self) -> Result<Vec<Run>, TrackingError> {
        if !self.experiment_dir.exists() {
            return Ok(Vec::new());
        }
        let entries = fs::read_dir(&self.experiment_dir)
            .map_err(|e| TrackingError::io(&self.experiment_dir, e))?;

        let mut runs = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TrackingError::io(&self.experiment_dir, e))?;
            let path = entry.path().join(RUN_FILE);
            if path.is_file() {
                let bytes = fs::read(&path).map_err(|e| TrackingError::io(&path, e))?;
                runs.push(serde_json::from_slice::<Run>(&bytes)?);
            }
        }
        runs.sort_by(|a, b| a.started_at.cmp(&b.started_at));
        Ok(runs)
    }

    fn active_run(&mut self, run_id: &str) -> Result<&mut Run, TrackingError> {
        self.active
            .get_mut(run_id)
            .ok_or_else(|| TrackingError::RunNotActive(run_id.to_string()))
    }

    fn persist(&self, run: &Run) -> Result<(), TrackingError> {
        let dir = self.run_dir(&run.run_id);
        fs::create_dir_all(&dir).map_err(|e| TrackingError::io(&dir, e))?;
        let path = dir.join(RUN_FILE);
        let json = serde_json::to_string_pretty(run)?;
        fs::write(&path, json).map_err(|e| TrackingError::io(&path, e))
    }
}

impl TrackingSink for LocalTracker {
    fn start_run(&mut self, run_name: &str) -> Result<String, TrackingError> {
        let run_id = Uuid::new_v4().simple().to_string();
        let run = Run::new(run_id.clone(), run_name, &self.experiment);
        self.persist(&run)?;
        info!(run_id = %run_id, run_name, experiment = %self.experiment, "tracking run started");
        self.active.insert(run_id.clone(), run);
        Ok(run_id)
    }

    fn log_param(&mut self, run_id: &str, key: &str, value: &str) -> Result<(), TrackingError> {
        self.active_run(run_id)?
            .params
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn log_metric(
        &mut self,
        run_id: &str,
        key: &str,
        value: f64,
        step: u64,
    ) -> Result<(), TrackingError> {
        self.active_run(run_id)?
            .metrics
            .entry(key.to_string())
            .or_default()
            .push(MetricPoint { value, step });
        Ok(())
    }

    fn log_artifact(
        &mut self,
        run_id: &str,
        local_path: &Path,
        artifact_path: Option<&str>,
    ) -> Result<(), TrackingError> {
        if !self.active.contains_key(run_id) {
            return Err(TrackingError::RunNotActive(run_id.to_string()));
        }
        let Some(file_name) = local_path.file_name().filter(|_| local_path.is_file()) else {
            return Err(TrackingError::ArtifactNotFound(
                local_path.display().to_string(),
            ));
        };

        let mut dest_dir = self.run_dir(run_id).join(ARTIFACTS_DIR);
        let mut relative = PathBuf::new();
        if let Some(sub) = artifact_path {
            dest_dir.push(sub);
            relative.push(sub);
        }
        relative.push(file_name);

        fs::create_dir_all(&dest_dir).map_err(|e| TrackingError::io(&dest_dir, e))?;
        let dest = dest_dir.join(file_name);
        fs::copy(local_path, &dest).map_err(|e| TrackingError::io(local_path, e))?;
        debug!(run_id, artifact = %relative.display(), "artifact logged");

        self.active_run(run_id)?
            .artifacts
            .push(relative.to_string_lossy().replace('\\', "/"));
        Ok(())
    }

    fn end_run(&mut self, run_id: &str, status: RunStatus) -> Result<(), TrackingError> {
        let mut run = self
            .active
            .remove(run_id)
            .ok_or_else(|| TrackingError::RunNotActive(run_id.to_string()))?;
        run.status = status;
        run.ended_at = Some(jiff::Timestamp::now());
        self.persist(&run)?;
        info!(run_id, status = ?status, "tracking run ended");
        Ok(())
    }
}
