use thiserror::Error;

#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("run not found: {0}")]
    RunNotFound(String),

    #[error("run is not active: {0}")]
    RunNotActive(String),

    #[error("artifact not found: {0}")]
    ArtifactNotFound(String),

    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl TrackingError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        TrackingError::Io {
            path: path.display().to_string(),
            source,
        }
    }
}
