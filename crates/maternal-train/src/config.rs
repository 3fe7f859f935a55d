//! `configs/train.yaml`.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::TrainError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainConfig {
    pub data: DataConfig,
    pub train: SplitConfig,
    pub output: OutputConfig,
    #[serde(default)]
    pub tracking: TrackingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    pub raw_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitConfig {
    /// Held-out fraction, strictly between 0 and 1.
    pub test_size: f64,
    pub random_state: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub model_dir: PathBuf,
    pub report_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingConfig {
    #[serde(default = "default_tracking_dir")]
    pub dir: PathBuf,
    #[serde(default = "default_experiment")]
    pub experiment: String,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        TrackingConfig {
            dir: default_tracking_dir(),
            experiment: default_experiment(),
        }
    }
}

fn default_tracking_dir() -> PathBuf {
    PathBuf::from("mlruns")
}

fn default_experiment() -> String {
    "maternal_risk".to_string()
}

impl TrainConfig {
    pub fn load(path: &Path) -> Result<Self, TrainError> {
        let contents = std::fs::read_to_string(path).map_err(|source| TrainError::ConfigRead {
            path: path.display().to_string(),
            source,
        })?;
        let config: TrainConfig =
            serde_yaml::from_str(&contents).map_err(|source| TrainError::ConfigParse {
                path: path.display().to_string(),
                source,
            })?;
        config.check()?;
        tracing::debug!(path = %path.display(), "config loaded");
        Ok(config)
    }

    fn check(&self) -> Result<(), TrainError> {
        let test_size = self.train.test_size;
        if !(test_size > 0.0 && test_size < 1.0) {
            return Err(TrainError::InvalidConfig(format!(
                "train.test_size must be between 0 and 1 (exclusive), got {test_size}"
            )));
        }
        Ok(())
    }
}
