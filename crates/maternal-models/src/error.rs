use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("unknown model '{key}', available: {available}")]
    UnknownModel { key: String, available: String },

    #[error("training set is empty")]
    EmptyTrainingSet,

    #[error("{what} mismatch: expected {expected}, got {actual}")]
    ShapeMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("{model} fit failed: {reason}")]
    Fit { model: &'static str, reason: String },

    #[error("pipeline was trained on features {found:?}, expected {expected:?}")]
    FeatureMismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ModelError {
    pub(crate) fn fit(model: &'static str, err: impl std::fmt::Display) -> Self {
        ModelError::Fit {
            model,
            reason: err.to_string(),
        }
    }
}
