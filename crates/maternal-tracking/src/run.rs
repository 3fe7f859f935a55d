use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunStatus {
    Running,
    Completed,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub value: f64,
    pub step: u64,
}

/// One tracked run, as persisted to `run.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Run {
    pub run_id: String,
    pub run_name: String,
    pub experiment: String,
    pub status: RunStatus,
    pub params: BTreeMap<String, String>,
    pub metrics: BTreeMap<String, Vec<MetricPoint>>,
    /// Artifact paths relative to the run's `artifacts/` directory.
    pub artifacts: Vec<String>,
    pub started_at: jiff::Timestamp,
    pub ended_at: Option<jiff::Timestamp>,
}

impl Run {
    pub(crate) fn new(run_id: String, run_name: &str, experiment: &str) -> Self {
        Run {
            run_id,
            run_name: run_name.to_string(),
            experiment: experiment.to_string(),
            status: RunStatus::Running,
            params: BTreeMap::new(),
            metrics: BTreeMap::new(),
            artifacts: Vec::new(),
            started_at: jiff::Timestamp::now(),
            ended_at: None,
        }
    }

    /// Most recently logged value of a metric.
    pub fn latest_metric(&self, key: &str) -> Option<f64> {
        self.metrics.get(key)?.last().map(|p| p.value)
    }
}
