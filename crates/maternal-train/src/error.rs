use thiserror::Error;

use maternal_core::error::CoreError;
use maternal_data::DataError;
use maternal_eval::EvalError;
use maternal_models::error::ModelError;
use maternal_tracking::TrackingError;

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("failed to read config at {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config at {path}: {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("data validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("cannot split dataset: {0}")]
    Split(String),

    #[error(transparent)]
    Data(#[from] DataError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Label(#[from] CoreError),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrainError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        TrainError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
